// File: ./src/store/memory.rs
use super::EventStore;
use crate::error::{StoreError, StoreResult};
use crate::model::{Draft, Event, EventId};
use std::collections::HashSet;
use tracing::info;

/// Plain in-memory store backed by a `Vec`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    events: Vec<Event>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from previously saved events, keeping their ids.
    pub fn from_events(events: Vec<Event>) -> StoreResult<Self> {
        let mut seen = HashSet::new();
        for event in &events {
            if !seen.insert(event.id.clone()) {
                return Err(StoreError::DuplicateId(event.id.clone()));
            }
            Draft::from_event(event).validate()?;
        }
        Ok(Self { events })
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn position(&self, id: &EventId) -> Option<usize> {
        self.events.iter().position(|e| &e.id == id)
    }

    fn fresh_id(&self) -> EventId {
        let mut id = EventId::new();
        while self.position(&id).is_some() {
            id = EventId::new();
        }
        id
    }
}

impl EventStore for MemoryStore {
    fn list(&self) -> Vec<Event> {
        self.events.clone()
    }

    fn get(&self, id: &EventId) -> Option<Event> {
        self.position(id).map(|idx| self.events[idx].clone())
    }

    fn add(&mut self, draft: &Draft) -> StoreResult<Event> {
        let valid = draft.validate()?;
        let event = valid.into_event(self.fresh_id());
        info!(id = %event.id, title = %event.title, "event added");
        self.events.push(event.clone());
        Ok(event)
    }

    fn replace(&mut self, id: &EventId, draft: &Draft) -> StoreResult<Event> {
        let idx = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let valid = draft.validate()?;
        let event = valid.into_event(id.clone());
        info!(id = %event.id, title = %event.title, "event replaced");
        self.events[idx] = event.clone();
        Ok(event)
    }

    fn remove(&mut self, id: &EventId) -> StoreResult<()> {
        let idx = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        self.events.remove(idx);
        info!(%id, "event removed");
        Ok(())
    }
}
