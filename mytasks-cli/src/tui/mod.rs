//! Interactive terminal UI

mod app;
mod theme;
mod ui;

use std::io;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use tracing::{debug, info};

use mytasks_core::{KeyValueStore, TaskList};

use crate::error::{CliError, Result};

use app::App;

/// Run the UI until the user quits, restoring the terminal afterwards
pub fn run<S: KeyValueStore>(list: TaskList<S>) -> Result<()> {
    enable_raw_mode().map_err(|e| CliError::terminal("Failed to enable raw mode", e))?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode().ok();
        return Err(CliError::terminal("Failed to setup terminal", e));
    }

    let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => terminal,
        Err(e) => {
            disable_raw_mode().ok();
            execute!(io::stdout(), LeaveAlternateScreen).ok();
            return Err(CliError::terminal("Failed to create terminal", e));
        }
    };

    info!("tui started");
    let mut app = App::new(list);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();
    info!("tui stopped");

    result
}

fn run_app<B: Backend, S: KeyValueStore>(terminal: &mut Terminal<B>, app: &mut App<S>) -> Result<()> {
    while !app.should_quit {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| CliError::terminal("Failed to draw", e))?;

        let event = event::read().map_err(|e| CliError::terminal("Failed to read event", e))?;
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            debug!(code = ?key.code, "key");
            app.handle_key(key);
        }
    }

    Ok(())
}
