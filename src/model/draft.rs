// File: ./src/model/draft.rs
// Edit buffer behind the create/edit dialog
use crate::error::ValidationError;
use crate::model::event::{Event, PaletteColor, Urgency};
use chrono::NaiveDateTime;

/// Scratch copy of the editable event fields.
///
/// Drafts are never mutated through a shared reference: [`Draft::with`]
/// returns a new value and the owner swaps it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub color: PaletteColor,
    pub urgency: Urgency,
}

/// A single dialog field edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftChange {
    Title(String),
    Description(String),
    Start(NaiveDateTime),
    End(NaiveDateTime),
    Color(PaletteColor),
    Urgency(Urgency),
}

/// Draft fields that passed validation, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub title: String,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub color: PaletteColor,
    pub urgency: Urgency,
}

impl Draft {
    /// Blank draft for a freshly picked slot.
    pub fn for_slot(
        start: NaiveDateTime,
        end: NaiveDateTime,
        color: PaletteColor,
        urgency: Urgency,
    ) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            start,
            end,
            color,
            urgency,
        }
    }

    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            start: event.start,
            end: event.end,
            color: event.color,
            urgency: event.urgency,
        }
    }

    pub fn with(&self, change: DraftChange) -> Self {
        let mut next = self.clone();
        match change {
            DraftChange::Title(t) => next.title = t,
            DraftChange::Description(d) => next.description = d,
            DraftChange::Start(s) => next.start = s,
            DraftChange::End(e) => next.end = e,
            DraftChange::Color(c) => next.color = c,
            DraftChange::Urgency(u) => next.urgency = u,
        }
        next
    }

    /// Whitespace-only titles count as empty. An empty description becomes `None`.
    pub fn validate(&self) -> Result<ValidDraft, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.start >= self.end {
            return Err(ValidationError::NonPositiveDuration {
                start: self.start,
                end: self.end,
            });
        }
        let description = if self.description.is_empty() {
            None
        } else {
            Some(self.description.clone())
        };
        Ok(ValidDraft {
            title: self.title.clone(),
            description,
            start: self.start,
            end: self.end,
            color: self.color,
            urgency: self.urgency,
        })
    }
}

impl ValidDraft {
    pub fn into_event(self, id: crate::model::EventId) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            start: self.start,
            end: self.end,
            color: self.color,
            urgency: self.urgency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 20)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn draft() -> Draft {
        Draft::for_slot(at(9, 0), at(10, 0), PaletteColor::Blue, Urgency::Medium)
    }

    #[test]
    fn with_leaves_original_untouched() {
        let d = draft();
        let next = d.with(DraftChange::Title("Standup".to_string()));
        assert_eq!(d.title, "");
        assert_eq!(next.title, "Standup");
        assert_eq!(next.start, d.start);
    }

    #[test]
    fn validate_rejects_blank_title() {
        let d = draft().with(DraftChange::Title("   ".to_string()));
        assert_eq!(d.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn validate_rejects_zero_and_negative_duration() {
        let d = draft().with(DraftChange::Title("x".to_string()));
        let zero = d.with(DraftChange::End(at(9, 0)));
        assert!(matches!(
            zero.validate(),
            Err(ValidationError::NonPositiveDuration { .. })
        ));
        let negative = d.with(DraftChange::End(at(8, 0)));
        assert!(matches!(
            negative.validate(),
            Err(ValidationError::NonPositiveDuration { .. })
        ));
    }

    #[test]
    fn empty_description_commits_as_none() {
        let valid = draft()
            .with(DraftChange::Title("Standup".to_string()))
            .validate()
            .unwrap();
        assert_eq!(valid.description, None);
    }
}
