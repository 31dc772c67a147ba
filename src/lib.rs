pub mod color_utils;
pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod model;
pub mod render;
pub mod storage;
pub mod store;

#[cfg(feature = "tui")]
pub mod tui;

pub use controller::{Controller, Dialog, DraftDefaults, Mode, ModeKind};
pub use error::{ControllerError, StoreError, ValidationError};
pub use model::{Draft, DraftChange, Event, EventId, PaletteColor, Urgency};
pub use store::{EventStore, MemoryStore, SharedStore};
