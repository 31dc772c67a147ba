// File: ./src/store/mod.rs
//! Canonical event collection and the only mutation surface for it.
//!
//! The controller talks to any [`EventStore`]; whether events live in memory,
//! in a JSON file or behind a mutex is decided by whoever builds the
//! controller.

mod memory;
mod shared;

pub use memory::MemoryStore;
pub use shared::SharedStore;

use crate::error::StoreResult;
use crate::model::{Draft, Event, EventId};

pub trait EventStore {
    /// Events in insertion order. Replaced events keep their position.
    fn list(&self) -> Vec<Event>;

    fn get(&self, id: &EventId) -> Option<Event>;

    /// Validates the draft, assigns a fresh id and appends.
    fn add(&mut self, draft: &Draft) -> StoreResult<Event>;

    /// Swaps the whole record at `id` for the draft, keeping the id.
    fn replace(&mut self, id: &EventId, draft: &Draft) -> StoreResult<Event>;

    /// Removing an id that is not (or no longer) present is `NotFound`.
    fn remove(&mut self, id: &EventId) -> StoreResult<()>;
}
