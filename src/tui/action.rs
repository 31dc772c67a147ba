use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveCursor { days: i32, slots: i32 },
    Page(i32),
    ToggleView,
    Pick,
    /// Create at the cursor even when the slot already holds events.
    PickSlot,
    /// Select the next event stacked in the cursor slot.
    NextInSlot,
    NextField,
    PrevField,
    Input(char),
    Backspace,
    Cycle(i8),
    Commit,
    Cancel,
    Delete,
    Quit,
}

/// Translates a key press into an action. With the dialog open, printable
/// keys go to the focused text field instead of navigation.
pub fn map_key(key: KeyEvent, dialog_open: bool) -> Option<Action> {
    if dialog_open {
        return match key.code {
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Delete)
            }
            KeyCode::Enter => Some(Action::Commit),
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Tab | KeyCode::Down => Some(Action::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(Action::PrevField),
            KeyCode::Left => Some(Action::Cycle(-1)),
            KeyCode::Right => Some(Action::Cycle(1)),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveCursor { days: -1, slots: 0 }),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveCursor { days: 1, slots: 0 }),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveCursor { days: 0, slots: -1 }),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveCursor { days: 0, slots: 1 }),
        KeyCode::Char('[') | KeyCode::PageUp => Some(Action::Page(-1)),
        KeyCode::Char(']') | KeyCode::PageDown => Some(Action::Page(1)),
        KeyCode::Char('v') => Some(Action::ToggleView),
        KeyCode::Enter => Some(Action::Pick),
        KeyCode::Char('n') => Some(Action::PickSlot),
        KeyCode::Tab => Some(Action::NextInSlot),
        _ => None,
    }
}
