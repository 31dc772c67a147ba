//! Error types for slotcal.

use crate::controller::{Gesture, ModeKind};
use crate::model::EventId;
use chrono::NaiveDateTime;
use thiserror::Error;

/// A draft that cannot be committed as-is. Always recoverable by editing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Event must end after it starts ({start} >= {end})")]
    NonPositiveDuration {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Errors returned by an [`EventStore`](crate::store::EventStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Event not found: {0}")]
    NotFound(EventId),

    #[error("Duplicate event id: {0}")]
    DuplicateId(EventId),

    #[error("Storage error: {0}")]
    Persistence(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Persistence(e.to_string())
    }
}

/// Errors returned by the interaction [`Controller`](crate::controller::Controller).
/// On any of these the controller mode is left as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    #[error("{gesture} is not allowed while {mode}")]
    Rejected { gesture: Gesture, mode: ModeKind },

    #[error("Picked slot is empty or inverted ({start} >= {end})")]
    InvalidSlot {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type ControllerResult<T> = Result<T, ControllerError>;
