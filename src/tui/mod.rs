// File: ./src/tui/mod.rs
pub mod action;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::controller::Controller;
use crate::storage::FileStore;
use action::map_key;
use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use state::AppState;
use std::{io, time::Duration};
use tracing::info;

/// Leaves raw mode and the alternate screen before the default hook prints,
/// so panics stay readable and end up in the log.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        tracing::error!("PANIC: {}", panic_info);
        default_hook(panic_info);
    }));
}

pub fn run(config: Config) -> Result<()> {
    let path = config
        .data_path()
        .context("No data directory available; set data_file in config.toml")?;
    let store = FileStore::open(&path)
        .with_context(|| format!("Failed to open events at {}", path.display()))?;
    info!(path = %path.display(), "loaded events");

    let controller = Controller::with_defaults(store, config.draft_defaults());
    let mut app_state = AppState::new(controller, &config, Local::now().date_naive());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app_state);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<S: crate::store::EventStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app_state: &mut AppState<S>,
) -> Result<()> {
    while !app_state.should_quit {
        terminal.draw(|f| view::draw(f, &*app_state))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(action) = map_key(key, app_state.dialog_open())
        {
            app_state.apply(action);
        }
    }
    Ok(())
}
