// File: ./src/model/event.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier of a stored event. Assigned by the store, never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display fill of an event. The order here is the order shown in pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteColor {
    #[default]
    Blue,
    Green,
    Red,
    Yellow,
    Purple,
}

impl PaletteColor {
    pub const ALL: [PaletteColor; 5] = [
        PaletteColor::Blue,
        PaletteColor::Green,
        PaletteColor::Red,
        PaletteColor::Yellow,
        PaletteColor::Purple,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PaletteColor::Blue => "Blue",
            PaletteColor::Green => "Green",
            PaletteColor::Red => "Red",
            PaletteColor::Yellow => "Yellow",
            PaletteColor::Purple => "Purple",
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            PaletteColor::Blue => "#0070F3",
            PaletteColor::Green => "#17C964",
            PaletteColor::Red => "#F31260",
            PaletteColor::Yellow => "#F5A524",
            PaletteColor::Purple => "#7828C8",
        }
    }

    /// Next entry in palette order, wrapping around. Negative steps go back.
    pub fn cycle(self, step: i8) -> Self {
        cycle_in(&Self::ALL, self, step)
    }
}

/// Ordered priority tag. Each tier has its own accent color, independent of
/// the event's [`PaletteColor`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

impl Urgency {
    pub const ALL: [Urgency; 3] = [Urgency::Low, Urgency::Medium, Urgency::High];

    pub fn label(self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
        }
    }

    pub fn accent_hex(self) -> &'static str {
        match self {
            Urgency::Low => "#10b981",
            Urgency::Medium => "#f59e0b",
            Urgency::High => "#dc2626",
        }
    }

    pub fn cycle(self, step: i8) -> Self {
        cycle_in(&Self::ALL, self, step)
    }
}

fn cycle_in<T: Copy + PartialEq>(all: &[T], current: T, step: i8) -> T {
    let len = all.len() as i64;
    let pos = all.iter().position(|c| *c == current).unwrap_or(0) as i64;
    let next = (pos + step as i64).rem_euclid(len);
    all[next as usize]
}

/// A calendar record as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub color: PaletteColor,
    #[serde(default)]
    pub urgency: Urgency,
}

impl Event {
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start < end && start < self.end
    }
}
