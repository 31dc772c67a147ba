// File: ./src/store/shared.rs
use super::EventStore;
use crate::error::StoreResult;
use crate::model::{Draft, Event, EventId};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle that serializes access to one store across threads.
#[derive(Debug, Default)]
pub struct SharedStore<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: EventStore> SharedStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    // Stores only mutate after every check has passed, so a poisoned lock
    // still guards a consistent list.
    fn lock(&self) -> MutexGuard<'_, S> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: EventStore> EventStore for SharedStore<S> {
    fn list(&self) -> Vec<Event> {
        self.lock().list()
    }

    fn get(&self, id: &EventId) -> Option<Event> {
        self.lock().get(id)
    }

    fn add(&mut self, draft: &Draft) -> StoreResult<Event> {
        self.lock().add(draft)
    }

    fn replace(&mut self, id: &EventId, draft: &Draft) -> StoreResult<Event> {
        self.lock().replace(id, draft)
    }

    fn remove(&mut self, id: &EventId) -> StoreResult<()> {
        self.lock().remove(id)
    }
}
