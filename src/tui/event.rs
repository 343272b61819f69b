//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::PomoError;
use crate::tui::app::App;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start the clock, or restart the lap while running.
    Start,
    /// Pause, or reset when already paused.
    Stop,
    /// Back to the first work period.
    Reset,
    /// Save the settings overlay.
    CommitSettings,
}

/// Handle terminal events.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App) -> Result<Option<Action>, PomoError> {
    // Short enough for the clock to redraw smoothly
    if event::poll(Duration::from_millis(50))
        .map_err(|e| PomoError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| PomoError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(handle_key(app, key));
            }
        }
    }

    Ok(None)
}

/// Map a key press to an action, updating view state on the way.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if app.settings.is_some() {
        return handle_settings_key(app, key);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('s' | ' ') => return Some(Action::Start),
        KeyCode::Char('x') => return Some(Action::Stop),
        KeyCode::Char('r') => return Some(Action::Reset),
        KeyCode::Char('h') => app.toggle_history(),
        KeyCode::Char('o') => {
            app.present_settings();
        }
        KeyCode::Char('?') => {
            app.status = Some(
                "s/space:start | x:stop | r:reset | h:history | o:settings | q:quit".to_string(),
            );
        }
        _ => {}
    }

    None
}

fn handle_settings_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => app.close_settings(),
        KeyCode::Enter => return Some(Action::CommitSettings),
        KeyCode::Char('o') => {
            app.present_settings();
        }
        code => {
            let panel = app.settings.as_mut()?;
            match code {
                KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => panel.select_next(),
                KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => panel.select_prev(),
                KeyCode::Right | KeyCode::Char('+' | '=' | 'l') => panel.increase(),
                KeyCode::Left | KeyCode::Char('-' | 'h') => panel.decrease(),
                KeyCode::Char(' ') => panel.toggle(),
                _ => {}
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::tui::app::View;
    use crate::tui::settings::SettingsField;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(Config::default(), None, None)
    }

    #[test]
    fn test_clock_keys() {
        let mut app = app();
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('s'))), Some(Action::Start));
        assert_eq!(handle_key(&mut app, press(KeyCode::Char(' '))), Some(Action::Start));
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('x'))), Some(Action::Stop));
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('r'))), Some(Action::Reset));
        assert_eq!(handle_key(&mut app, press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            handle_key(
                &mut app,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_history_key_toggles_view() {
        let mut app = app();
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('h'))), None);
        assert_eq!(app.view, View::History);
    }

    #[test]
    fn test_settings_capture_keys() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('o')));
        assert!(app.settings.is_some());

        // Clock keys are not forwarded while the overlay is open.
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('s'))), None);
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('x'))), None);

        handle_key(&mut app, press(KeyCode::Char('+')));
        handle_key(&mut app, press(KeyCode::Down));
        let panel = app.settings.as_ref().unwrap();
        assert_eq!(panel.timer.work_minutes, 26);
        assert_eq!(panel.field, SettingsField::Break);

        assert_eq!(
            handle_key(&mut app, press(KeyCode::Enter)),
            Some(Action::CommitSettings)
        );

        handle_key(&mut app, press(KeyCode::Esc));
        assert!(app.settings.is_none());
        assert_eq!(app.view, View::Clock);
    }
}
