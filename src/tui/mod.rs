//! Terminal User Interface (TUI) for pomoclock.
//!
//! Shows the clock, the weekly history and the settings overlay. Built with
//! ratatui and crossterm; the cycle itself runs on the runtime thread.

mod app;
mod event;
mod settings;
mod ui;

pub use app::{App, SettingsPresence, View};
pub use settings::{SettingsField, SettingsPanel};

use std::io;

use crossbeam_channel::Receiver;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{info, warn};

use crate::config::{Config, Paths};
use crate::error::PomoError;
use crate::features::cycle::{CycleController, DisplayUpdate, NotificationSink, SystemClock};
use crate::features::history::SqliteSessionStore;
use crate::features::notify::{DesktopNotifier, SilentNotifier};
use crate::runtime::{self, ChannelDisplay, Command, CycleHandle};
use crate::storage::Database;

/// Run the TUI application.
///
/// `quiet` replaces sounds and desktop notifications with nothing.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the database cannot be
/// opened, or the terminal fails.
pub fn run(config: Config, paths: &Paths, quiet: bool) -> Result<(), PomoError> {
    let cycle = config.timer.cycle_config()?;

    let recorder = SqliteSessionStore::with_database(Database::open_at(&paths.database)?);
    let reader = SqliteSessionStore::with_database(Database::open_at(&paths.database)?);

    let notifier: Box<dyn NotificationSink> = if quiet {
        Box::new(SilentNotifier)
    } else {
        Box::new(DesktopNotifier::new(config.notifications.clone()))
    };

    let (display, updates) = ChannelDisplay::channel();
    let controller = CycleController::new(
        cycle,
        Box::new(SystemClock::new()),
        Box::new(display),
        Box::new(recorder),
        notifier,
    );
    let handle = runtime::spawn(controller, config.timer.tick_interval())?;
    info!(quiet, "clock started");

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| PomoError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let guard = TerminalGuard;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| PomoError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| PomoError::Terminal(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(config, Some(paths.config_file.clone()), Some(reader));
    let result = run_app(&mut terminal, &mut app, &handle, &updates);

    // Restore terminal
    drop(guard);
    terminal.show_cursor().ok();

    if let Err(e) = handle.shutdown() {
        warn!(error = %e, "cycle runtime did not stop cleanly");
    }
    result
}

/// Leaves raw mode and the alternate screen when dropped, including on an
/// early return while the terminal is being set up.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        disable_raw_mode().ok();
        execute!(io::stdout(), LeaveAlternateScreen).ok();
    }
}

/// Run the main application loop.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    handle: &CycleHandle,
    updates: &Receiver<DisplayUpdate>,
) -> Result<(), PomoError> {
    loop {
        app.drain(updates);

        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| PomoError::Terminal(format!("Failed to draw: {e}")))?;
        app.frame = app.frame.wrapping_add(1);

        // Handle events
        if let Some(action) = event::handle_events(app)? {
            match action {
                event::Action::Quit => break,
                event::Action::Start => handle.send(Command::Start)?,
                event::Action::Stop => handle.send(Command::Stop)?,
                event::Action::Reset => handle.send(Command::Reset)?,
                event::Action::CommitSettings => match app.commit_settings() {
                    Ok(Some((cycle, notifications))) => {
                        handle.send(Command::Reconfigure(cycle))?;
                        handle.send(Command::Notifications(notifications))?;
                    }
                    Ok(None) => {}
                    Err(e) => app.status = Some(format!("Invalid settings: {e}")),
                },
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_guard_drop_outside_raw_mode() {
        // Restoring a terminal that was never set up is harmless.
        drop(TerminalGuard);
        drop(TerminalGuard);
    }
}
