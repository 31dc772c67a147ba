// File: ./src/config.rs
use crate::controller::DraftDefaults;
use crate::grid::{CalendarView, SlotGrid};
use crate::model::{PaletteColor, Urgency};
use crate::storage::LocalStorage;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_color: PaletteColor,
    pub default_urgency: Urgency,
    pub default_view: CalendarView,
    /// Overrides `<data_dir>/events.json`.
    pub data_file: Option<PathBuf>,
    pub grid: SlotGrid,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_color: PaletteColor::Blue,
            default_urgency: Urgency::Medium,
            default_view: CalendarView::Week,
            data_file: None,
            grid: SlotGrid::default(),
        }
    }
}

impl Config {
    pub fn get_path() -> Option<PathBuf> {
        LocalStorage::project_dirs().map(|proj| proj.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Loads `~/.config/slotcal/config.toml` (platform equivalent).
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        match Self::get_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let g = &self.grid;
        if g.day_end_hour > 24 {
            bail!("grid.day_end_hour must be at most 24, got {}", g.day_end_hour);
        }
        if g.day_start_hour >= g.day_end_hour {
            bail!(
                "grid.day_start_hour ({}) must be before grid.day_end_hour ({})",
                g.day_start_hour,
                g.day_end_hour
            );
        }
        if g.slot_minutes == 0 || 60 % g.slot_minutes != 0 {
            bail!("grid.slot_minutes must divide an hour, got {}", g.slot_minutes);
        }
        Ok(())
    }

    pub fn draft_defaults(&self) -> DraftDefaults {
        DraftDefaults {
            color: self.default_color,
            urgency: self.default_urgency,
        }
    }

    pub fn data_path(&self) -> Option<PathBuf> {
        self.data_file.clone().or_else(LocalStorage::default_path)
    }
}
