use chrono::{NaiveDate, NaiveDateTime};
use slotcal::controller::Gesture;
use slotcal::{
    Controller, ControllerError, DraftChange, EventStore, MemoryStore, ModeKind, Urgency,
    ValidationError,
};

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 20)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn with_standup() -> Controller<MemoryStore> {
    let mut c = Controller::new(MemoryStore::new());
    c.on_slot_pick(at(9, 0), at(10, 0)).unwrap();
    c.on_field_change(DraftChange::Title("Standup".to_string()))
        .unwrap();
    c.on_commit().unwrap();
    c
}

#[test]
fn create_standup_from_slot_pick() {
    let mut c = Controller::new(MemoryStore::new());

    // 1. Pick the slot
    c.on_slot_pick(at(9, 0), at(10, 0)).unwrap();
    assert_eq!(c.mode().kind(), ModeKind::Creating);
    let draft = c.draft().unwrap();
    assert_eq!(draft.start, at(9, 0));
    assert_eq!(draft.end, at(10, 0));
    assert_eq!(draft.urgency, Urgency::Medium);
    assert!(draft.title.is_empty());

    // 2. Fill in and commit
    c.on_field_change(DraftChange::Title("Standup".to_string()))
        .unwrap();
    let stored = c.on_commit().unwrap();

    // 3. Store holds exactly that event, dialog closed
    let events = c.store().list();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0], stored);
    assert_eq!(events[0].title, "Standup");
    assert_eq!((events[0].start, events[0].end), (at(9, 0), at(10, 0)));
    assert!(c.is_idle());
    assert!(c.draft().is_none());
}

#[test]
fn edit_urgency_keeps_id_and_title() {
    let mut c = with_standup();
    let original = c.store().list()[0].clone();

    c.on_event_pick(&original).unwrap();
    assert_eq!(c.mode().kind(), ModeKind::Editing);
    match c.mode() {
        slotcal::Mode::Editing { target, .. } => assert_eq!(target, &original.id),
        other => panic!("expected editing, got {:?}", other),
    }

    c.on_field_change(DraftChange::Urgency(Urgency::High))
        .unwrap();
    c.on_commit().unwrap();

    let events = c.store().list();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, original.id);
    assert_eq!(events[0].urgency, Urgency::High);
    assert_eq!(events[0].title, "Standup");
    assert!(c.is_idle());
}

#[test]
fn delete_while_editing() {
    let mut c = with_standup();
    let event = c.store().list()[0].clone();

    c.on_event_pick(&event).unwrap();
    c.on_delete().unwrap();

    assert!(c.store().list().iter().all(|e| e.id != event.id));
    assert!(c.is_idle());
}

#[test]
fn zero_length_commit_changes_nothing() {
    let mut c = with_standup();
    let before = c.store().list();

    // Creating
    c.on_slot_pick(at(11, 0), at(12, 0)).unwrap();
    c.on_field_change(DraftChange::Title("Empty".to_string()))
        .unwrap();
    c.on_field_change(DraftChange::End(at(11, 0))).unwrap();
    let err = c.on_commit().unwrap_err();
    assert!(matches!(
        err,
        ControllerError::Validation(ValidationError::NonPositiveDuration { .. })
    ));
    assert_eq!(c.mode().kind(), ModeKind::Creating);
    assert_eq!(c.store().list(), before);
    assert_eq!(c.draft().unwrap().title, "Empty", "input must survive a failed commit");
    c.on_cancel().unwrap();

    // Editing
    c.on_event_pick(&before[0]).unwrap();
    c.on_field_change(DraftChange::Start(at(10, 30))).unwrap();
    assert!(c.on_commit().is_err());
    assert_eq!(c.mode().kind(), ModeKind::Editing);
    assert_eq!(c.store().list(), before);
}

#[test]
fn slot_pick_is_rejected_while_dialog_open() {
    let mut c = with_standup();
    let event = c.store().list()[0].clone();

    c.on_slot_pick(at(13, 0), at(14, 0)).unwrap();
    c.on_field_change(DraftChange::Title("Draft".to_string()))
        .unwrap();
    let before = c.mode().clone();
    assert_eq!(
        c.on_slot_pick(at(15, 0), at(16, 0)),
        Err(ControllerError::Rejected {
            gesture: Gesture::SlotPick,
            mode: ModeKind::Creating
        })
    );
    assert_eq!(c.mode(), &before);
    assert_eq!(
        c.on_event_pick(&event),
        Err(ControllerError::Rejected {
            gesture: Gesture::EventPick,
            mode: ModeKind::Creating
        })
    );
    c.on_cancel().unwrap();

    c.on_event_pick(&event).unwrap();
    let before = c.mode().clone();
    assert!(matches!(
        c.on_slot_pick(at(15, 0), at(16, 0)),
        Err(ControllerError::Rejected {
            mode: ModeKind::Editing,
            ..
        })
    ));
    assert_eq!(c.mode(), &before);
}

#[test]
fn delete_is_rejected_while_creating() {
    let mut c = with_standup();
    c.on_slot_pick(at(13, 0), at(14, 0)).unwrap();
    assert_eq!(
        c.on_delete(),
        Err(ControllerError::Rejected {
            gesture: Gesture::Delete,
            mode: ModeKind::Creating
        })
    );
    assert_eq!(c.store().list().len(), 1);
    assert_eq!(c.mode().kind(), ModeKind::Creating);
}

#[test]
fn cancel_discards_draft_without_touching_store() {
    let mut c = with_standup();
    let before = c.store().list();
    let event = before[0].clone();

    c.on_event_pick(&event).unwrap();
    c.on_field_change(DraftChange::Title("Renamed".to_string()))
        .unwrap();
    c.on_cancel().unwrap();

    assert!(c.is_idle());
    assert_eq!(c.store().list(), before);

    // A later pick starts from the stored record, not the discarded draft.
    c.on_event_pick(&event).unwrap();
    assert_eq!(c.draft().unwrap().title, "Standup");
}
