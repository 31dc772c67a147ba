// File: ./src/controller.rs
//! Create/edit dialog state machine.
//!
//! Grid gestures come in one at a time. Each is accepted only in the modes
//! listed below; anything else is rejected with
//! [`ControllerError::Rejected`] and leaves the controller untouched.
//!
//! | gesture          | Idle | Creating | Editing |
//! |------------------|------|----------|---------|
//! | `on_slot_pick`   | yes  |          |         |
//! | `on_event_pick`  | yes  |          |         |
//! | `on_field_change`|      | yes      | yes     |
//! | `on_commit`      |      | yes      | yes     |
//! | `on_delete`      |      |          | yes     |
//! | `on_cancel`      |      | yes      | yes     |

use crate::error::{ControllerError, ControllerResult};
use crate::model::{Draft, DraftChange, Event, EventId, PaletteColor, Urgency};
use crate::store::EventStore;
use chrono::NaiveDateTime;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Creating { draft: Draft },
    Editing { target: EventId, draft: Draft },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Idle,
    Creating,
    Editing,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModeKind::Idle => "idle",
            ModeKind::Creating => "creating",
            ModeKind::Editing => "editing",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    SlotPick,
    EventPick,
    FieldChange,
    Commit,
    Delete,
    Cancel,
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gesture::SlotPick => "slot pick",
            Gesture::EventPick => "event pick",
            Gesture::FieldChange => "field change",
            Gesture::Commit => "commit",
            Gesture::Delete => "delete",
            Gesture::Cancel => "cancel",
        })
    }
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Idle => ModeKind::Idle,
            Mode::Creating { .. } => ModeKind::Creating,
            Mode::Editing { .. } => ModeKind::Editing,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            Mode::Idle => None,
            Mode::Creating { draft } | Mode::Editing { draft, .. } => Some(draft),
        }
    }
}

/// What the dialog should show for the current mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog<'a> {
    pub title: &'static str,
    pub commit_label: &'static str,
    pub can_delete: bool,
    pub draft: &'a Draft,
}

/// Values a new draft starts from on slot pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DraftDefaults {
    pub color: PaletteColor,
    pub urgency: Urgency,
}

pub struct Controller<S> {
    store: S,
    mode: Mode,
    defaults: DraftDefaults,
}

impl<S: EventStore> Controller<S> {
    pub fn new(store: S) -> Self {
        Self::with_defaults(store, DraftDefaults::default())
    }

    pub fn with_defaults(store: S, defaults: DraftDefaults) -> Self {
        Self {
            store,
            mode: Mode::Idle,
            defaults,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.mode.draft()
    }

    pub fn is_idle(&self) -> bool {
        self.mode == Mode::Idle
    }

    pub fn dialog(&self) -> Option<Dialog<'_>> {
        match &self.mode {
            Mode::Idle => None,
            Mode::Creating { draft } => Some(Dialog {
                title: "Add New Event",
                commit_label: "Add",
                can_delete: false,
                draft,
            }),
            Mode::Editing { draft, .. } => Some(Dialog {
                title: "Edit Event",
                commit_label: "Update",
                can_delete: true,
                draft,
            }),
        }
    }

    fn reject(&self, gesture: Gesture) -> ControllerError {
        let mode = self.mode.kind();
        warn!(%gesture, %mode, "gesture rejected");
        ControllerError::Rejected { gesture, mode }
    }

    pub fn on_slot_pick(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> ControllerResult<()> {
        if !self.is_idle() {
            return Err(self.reject(Gesture::SlotPick));
        }
        if start >= end {
            warn!(%start, %end, "ignoring empty slot pick");
            return Err(ControllerError::InvalidSlot { start, end });
        }
        let draft = Draft::for_slot(start, end, self.defaults.color, self.defaults.urgency);
        debug!(%start, %end, "creating");
        self.mode = Mode::Creating { draft };
        Ok(())
    }

    pub fn on_event_pick(&mut self, event: &Event) -> ControllerResult<()> {
        if !self.is_idle() {
            return Err(self.reject(Gesture::EventPick));
        }
        debug!(id = %event.id, "editing");
        self.mode = Mode::Editing {
            target: event.id.clone(),
            draft: Draft::from_event(event),
        };
        Ok(())
    }

    pub fn on_field_change(&mut self, change: DraftChange) -> ControllerResult<()> {
        if self.is_idle() {
            return Err(self.reject(Gesture::FieldChange));
        }
        if let Mode::Creating { draft } | Mode::Editing { draft, .. } = &mut self.mode {
            *draft = draft.with(change);
        }
        Ok(())
    }

    /// Stores the draft. On success the dialog closes and the stored event is
    /// returned; on failure the dialog stays open with the draft intact.
    pub fn on_commit(&mut self) -> ControllerResult<Event> {
        let stored = match &self.mode {
            Mode::Idle => return Err(self.reject(Gesture::Commit)),
            Mode::Creating { draft } => {
                draft.validate()?;
                self.store.add(draft)?
            }
            Mode::Editing { target, draft } => {
                draft.validate()?;
                self.store.replace(target, draft)?
            }
        };
        debug!(id = %stored.id, "committed");
        self.mode = Mode::Idle;
        Ok(stored)
    }

    pub fn on_delete(&mut self) -> ControllerResult<()> {
        let Mode::Editing { target, .. } = &self.mode else {
            return Err(self.reject(Gesture::Delete));
        };
        self.store.remove(target)?;
        debug!(id = %target, "deleted");
        self.mode = Mode::Idle;
        Ok(())
    }

    pub fn on_cancel(&mut self) -> ControllerResult<()> {
        if self.is_idle() {
            return Err(self.reject(Gesture::Cancel));
        }
        debug!(mode = %self.mode.kind(), "cancelled");
        self.mode = Mode::Idle;
        Ok(())
    }
}
