// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod draft;
pub mod event;

pub use draft::{Draft, DraftChange, ValidDraft};
pub use event::{Event, EventId, PaletteColor, Urgency};
