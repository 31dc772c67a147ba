use anyhow::{Context, Result};
use slotcal::config::Config;
use slotcal::storage::LocalStorage;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "slotcal.log";

// The terminal belongs to the TUI, so logs go to a file in the data dir.
fn init_logging() -> Result<()> {
    let Some(proj) = LocalStorage::project_dirs() else {
        return Ok(());
    };
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    let log_path = data_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;
    slotcal::tui::install_panic_hook();

    let config = Config::load().context("Failed to load configuration")?;
    slotcal::tui::run(config)
}
