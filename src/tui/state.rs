use crate::config::Config;
use crate::controller::{Controller, ModeKind};
use crate::error::ControllerResult;
use crate::grid::{CalendarView, SlotGrid, events_overlapping};
use crate::model::{DraftChange, Event};
use crate::store::EventStore;
use crate::tui::action::Action;
use chrono::{Duration, NaiveDate, NaiveDateTime};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Field {
    Title,
    Description,
    End,
    Color,
    Urgency,
}

impl Field {
    const ORDER: [Field; 5] = [
        Field::Title,
        Field::Description,
        Field::End,
        Field::Color,
        Field::Urgency,
    ];

    fn step(self, delta: i32) -> Self {
        let len = Self::ORDER.len() as i32;
        let pos = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0) as i32;
        Self::ORDER[(pos + delta).rem_euclid(len) as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Event Title",
            Field::Description => "Description",
            Field::End => "Ends",
            Field::Color => "Event Color",
            Field::Urgency => "Urgency Level",
        }
    }
}

pub struct AppState<S> {
    pub controller: Controller<S>,
    pub grid: SlotGrid,
    pub view: CalendarView,
    pub anchor: NaiveDate,
    pub cursor_day: usize,
    pub cursor_slot: usize,
    /// Which of the events overlapping the cursor slot is selected.
    pub stack_index: usize,
    pub field: Field,
    pub message: String,
    pub should_quit: bool,
}

impl<S: EventStore> AppState<S> {
    pub fn new(controller: Controller<S>, config: &Config, today: NaiveDate) -> Self {
        // Month pages do not fit as day columns; they open as a week.
        let view = match config.default_view {
            CalendarView::Month => CalendarView::Week,
            v => v,
        };
        let dates = view.visible_dates(today);
        let cursor_day = dates.iter().position(|d| *d == today).unwrap_or(0);
        Self {
            controller,
            grid: config.grid,
            view,
            anchor: today,
            cursor_day,
            cursor_slot: 0,
            stack_index: 0,
            field: Field::Title,
            message: "Enter: Pick | arrows: Move | [/]: Page | v: View | q: Quit".to_string(),
            should_quit: false,
        }
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.view.visible_dates(self.anchor)
    }

    pub fn dialog_open(&self) -> bool {
        !self.controller.is_idle()
    }

    pub fn events(&self) -> Vec<Event> {
        self.controller.store().list()
    }

    pub fn cursor_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let date = *self.dates().get(self.cursor_day)?;
        self.grid.slot_range(date, self.cursor_slot)
    }

    /// The event under the cursor, honouring `stack_index` when several
    /// events share the slot.
    pub fn selected_event(&self) -> Option<Event> {
        let (start, end) = self.cursor_range()?;
        let events = self.events();
        let hits = events_overlapping(&events, start, end);
        if hits.is_empty() {
            return None;
        }
        Some(hits[self.stack_index % hits.len()].clone())
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveCursor { days, slots } => {
                self.stack_index = 0;
                self.move_cursor(days, slots);
            }
            Action::Page(step) => {
                self.stack_index = 0;
                self.anchor = self.view.shift(self.anchor, step);
            }
            Action::ToggleView => {
                self.stack_index = 0;
                self.toggle_view();
            }
            Action::Pick => self.pick(),
            Action::PickSlot => self.pick_slot(),
            Action::NextInSlot => self.next_in_slot(),
            Action::NextField => self.field = self.field.step(1),
            Action::PrevField => self.field = self.field.step(-1),
            Action::Input(c) => self.edit_text(|s| s.push(c)),
            Action::Backspace => self.edit_text(|s| {
                s.pop();
            }),
            Action::Cycle(step) => self.cycle(step),
            Action::Commit => self.commit(),
            Action::Cancel => {
                if self.controller.on_cancel().is_ok() {
                    self.message = "Cancelled.".to_string();
                }
            }
            Action::Delete => match self.controller.on_delete() {
                Ok(()) => self.message = "Deleted.".to_string(),
                Err(e) => self.message = format!("Error: {}", e),
            },
        }
    }

    fn move_cursor(&mut self, days: i32, slots: i32) {
        let day_count = self.dates().len() as i32;
        let slot_count = self.grid.slots_per_day() as i32;
        if day_count == 0 || slot_count == 0 {
            return;
        }
        let day = self.cursor_day as i32 + days;
        if day < 0 {
            self.anchor = self.view.shift(self.anchor, -1);
            self.cursor_day = (self.dates().len() as i32 - 1).max(0) as usize;
        } else if day >= day_count {
            self.anchor = self.view.shift(self.anchor, 1);
            self.cursor_day = 0;
        } else {
            self.cursor_day = day as usize;
        }
        self.cursor_slot = (self.cursor_slot as i32 + slots).clamp(0, slot_count - 1) as usize;
    }

    fn toggle_view(&mut self) {
        let focused = self.dates().get(self.cursor_day).copied();
        self.view = match self.view {
            CalendarView::Day => CalendarView::Week,
            _ => CalendarView::Day,
        };
        if let Some(date) = focused {
            self.anchor = date;
            self.cursor_day = self.dates().iter().position(|d| *d == date).unwrap_or(0);
        }
    }

    fn pick(&mut self) {
        let result = match self.selected_event() {
            Some(event) => self.controller.on_event_pick(&event),
            None => match self.cursor_range() {
                Some((start, end)) => self.controller.on_slot_pick(start, end),
                None => return,
            },
        };
        self.opened(result);
    }

    fn pick_slot(&mut self) {
        let Some((start, end)) = self.cursor_range() else {
            return;
        };
        let result = self.controller.on_slot_pick(start, end);
        self.opened(result);
    }

    fn opened(&mut self, result: ControllerResult<()>) {
        match result {
            Ok(()) => {
                self.field = Field::Title;
                self.message = "Tab: Field | Left/Right: Change | Enter: Save | Esc: Cancel".to_string();
            }
            Err(e) => self.message = format!("Error: {}", e),
        }
    }

    fn next_in_slot(&mut self) {
        let Some((start, end)) = self.cursor_range() else {
            return;
        };
        let events = self.events();
        let hits = events_overlapping(&events, start, end);
        if hits.is_empty() {
            self.message = "No events in this slot.".to_string();
            return;
        }
        self.stack_index = (self.stack_index + 1) % hits.len();
        let event = hits[self.stack_index];
        self.message = format!(
            "{}/{}: \"{}\" | Enter: Edit | n: New here",
            self.stack_index + 1,
            hits.len(),
            event.title
        );
    }

    fn change_field(&mut self, change: DraftChange) {
        if let Err(e) = self.controller.on_field_change(change) {
            self.message = format!("Error: {}", e);
        }
    }

    fn edit_text(&mut self, f: impl FnOnce(&mut String)) {
        let Some(draft) = self.controller.draft() else {
            return;
        };
        let change = match self.field {
            Field::Title => {
                let mut title = draft.title.clone();
                f(&mut title);
                DraftChange::Title(title)
            }
            Field::Description => {
                let mut description = draft.description.clone();
                f(&mut description);
                DraftChange::Description(description)
            }
            _ => return,
        };
        self.change_field(change);
    }

    fn cycle(&mut self, step: i8) {
        let Some(draft) = self.controller.draft() else {
            return;
        };
        let change = match self.field {
            Field::End => DraftChange::End(
                draft.end + Duration::minutes(step as i64 * self.grid.slot_minutes as i64),
            ),
            Field::Color => DraftChange::Color(draft.color.cycle(step)),
            Field::Urgency => DraftChange::Urgency(draft.urgency.cycle(step)),
            _ => return,
        };
        self.change_field(change);
    }

    fn commit(&mut self) {
        let was = self.controller.mode().kind();
        match self.controller.on_commit() {
            Ok(event) => {
                let verb = if was == ModeKind::Editing { "Updated" } else { "Added" };
                self.message = format!("{} \"{}\".", verb, event.title);
            }
            Err(e) => self.message = format!("Error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Urgency;
    use crate::store::MemoryStore;

    fn app() -> AppState<MemoryStore> {
        let config = Config::default();
        let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        AppState::new(Controller::new(MemoryStore::new()), &config, today)
    }

    fn type_str(app: &mut AppState<MemoryStore>, s: &str) {
        for c in s.chars() {
            app.apply(Action::Input(c));
        }
    }

    #[test]
    fn cursor_starts_on_today() {
        let app = app();
        assert_eq!(app.cursor_day, 3);
        let (start, _) = app.cursor_range().unwrap();
        assert_eq!(start.to_string(), "2025-03-20 08:00:00");
    }

    #[test]
    fn create_then_reopen_and_edit() {
        let mut app = app();
        app.apply(Action::Pick);
        assert!(app.dialog_open());
        type_str(&mut app, "Standup");
        app.apply(Action::NextField);
        app.apply(Action::NextField);
        app.apply(Action::Cycle(1));
        app.apply(Action::Commit);
        assert!(!app.dialog_open());

        let events = app.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Standup");
        assert_eq!(events[0].end - events[0].start, Duration::minutes(60));

        app.apply(Action::Pick);
        assert_eq!(app.controller.mode().kind(), ModeKind::Editing);
        app.apply(Action::PrevField);
        app.apply(Action::Cycle(1));
        app.apply(Action::Commit);
        assert_eq!(app.events()[0].urgency, Urgency::High);
        assert_eq!(app.message, "Updated \"Standup\".");
    }

    #[test]
    fn shrinking_to_zero_length_is_refused() {
        let mut app = app();
        app.apply(Action::Pick);
        type_str(&mut app, "Oops");
        app.apply(Action::NextField);
        app.apply(Action::NextField);
        app.apply(Action::Cycle(-1));
        app.apply(Action::Commit);
        assert!(app.dialog_open());
        assert!(app.message.starts_with("Error:"));
        assert!(app.events().is_empty());
    }

    #[test]
    fn moving_past_the_week_pages() {
        let mut app = app();
        app.cursor_day = 6;
        app.apply(Action::MoveCursor { days: 1, slots: 0 });
        assert_eq!(app.cursor_day, 0);
        assert_eq!(app.dates()[0], NaiveDate::from_ymd_opt(2025, 3, 24).unwrap());
    }

    fn add_at_cursor(app: &mut AppState<MemoryStore>, action: Action, title: &str, extra_slots: i8) {
        app.apply(action);
        type_str(app, title);
        app.apply(Action::NextField);
        app.apply(Action::NextField);
        app.apply(Action::Cycle(extra_slots));
        app.apply(Action::Commit);
        assert!(!app.dialog_open(), "{}", app.message);
    }

    #[test]
    fn covered_event_can_be_reached_and_deleted() {
        let mut app = app();
        // Long 08:00-09:00, then Short 08:00-08:30 created in the occupied slot.
        add_at_cursor(&mut app, Action::Pick, "Long", 1);
        add_at_cursor(&mut app, Action::PickSlot, "Short", 0);
        assert_eq!(app.events().len(), 2);

        // Enter alone opens the first event in store order.
        app.apply(Action::Pick);
        assert_eq!(app.controller.draft().unwrap().title, "Long");
        app.apply(Action::Cancel);

        app.apply(Action::NextInSlot);
        assert!(app.message.starts_with("2/2"), "{}", app.message);
        assert_eq!(app.selected_event().unwrap().title, "Short");
        app.apply(Action::Pick);
        assert_eq!(app.controller.mode().kind(), ModeKind::Editing);
        assert_eq!(app.controller.draft().unwrap().title, "Short");

        app.apply(Action::Delete);
        let titles: Vec<_> = app.events().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, ["Long"]);
    }

    #[test]
    fn moving_resets_the_slot_selection() {
        let mut app = app();
        add_at_cursor(&mut app, Action::Pick, "Long", 1);
        add_at_cursor(&mut app, Action::PickSlot, "Short", 0);
        app.apply(Action::NextInSlot);
        assert_eq!(app.stack_index, 1);
        app.apply(Action::MoveCursor { days: 0, slots: 1 });
        assert_eq!(app.stack_index, 0);
        assert_eq!(app.selected_event().unwrap().title, "Long");
    }

    #[test]
    fn field_change_errors_reach_the_status_line() {
        let mut app = app();
        app.apply(Action::Pick);
        app.apply(Action::Cancel);
        // Idle again, so the controller rejects the edit.
        app.change_field(DraftChange::Title("x".to_string()));
        assert!(app.message.starts_with("Error:"), "{}", app.message);
    }
}
