//! Application state for the TUI.

use std::path::PathBuf;

use chrono::Local;
use crossbeam_channel::Receiver;
use tracing::{info, warn};

use crate::config::{Config, NotificationConfig};
use crate::error::PomoError;
use crate::features::cycle::{CycleConfig, DisplayUpdate, VisualState};
use crate::features::history::{SqliteSessionStore, WeeklyHistory};
use crate::tui::settings::SettingsPanel;

/// Weeks shown in the history view.
pub const HISTORY_WEEKS: usize = 8;

/// Main views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Clock,
    History,
}

/// What [`App::present_settings`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsPresence {
    Opened,
    /// The overlay was already open
    Focused,
}

/// Application state.
///
/// Only the runtime thread changes the cycle; the app mirrors it through
/// display updates.
pub struct App {
    /// Settings as last committed.
    pub config: Config,
    /// Where committed settings are saved. `None` keeps them in memory.
    config_path: Option<PathBuf>,
    /// Read side of the history database.
    history_store: Option<SqliteSessionStore>,
    /// Most recent display update.
    pub display: DisplayUpdate,
    /// Weekly history for the history view.
    pub history: WeeklyHistory,
    /// Current view.
    pub view: View,
    /// The settings overlay, when open.
    pub settings: Option<SettingsPanel>,
    /// Status message to display.
    pub status: Option<String>,
    /// Frame counter, drives blinking.
    pub frame: u64,
}

impl App {
    /// Create a new app instance.
    #[must_use]
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        history_store: Option<SqliteSessionStore>,
    ) -> Self {
        let display = DisplayUpdate::idle(config.timer.long_break_interval);
        let mut app = Self {
            config,
            config_path,
            history_store,
            display,
            history: WeeklyHistory::default(),
            view: View::Clock,
            settings: None,
            status: None,
            frame: 0,
        };
        app.refresh_history();
        app
    }

    /// Take every display update queued by the runtime.
    pub fn drain(&mut self, updates: &Receiver<DisplayUpdate>) {
        while let Ok(update) = updates.try_recv() {
            self.apply_update(update);
        }
    }

    /// Show a display update. A phase completion reloads the history.
    pub fn apply_update(&mut self, update: DisplayUpdate) {
        let completed = update.visual == VisualState::Error;
        self.display = update;
        if completed {
            self.refresh_history();
        }
    }

    /// Reload the weekly history from the database.
    pub fn refresh_history(&mut self) {
        let Some(store) = &self.history_store else {
            return;
        };

        match store.weekly(&Local, Local::now().date_naive(), HISTORY_WEEKS) {
            Ok(history) => self.history = history,
            Err(e) => {
                warn!(error = %e, "failed to load history");
                self.status = Some(format!("History unavailable: {e}"));
            }
        }
    }

    /// Switch between the clock and the history view.
    pub fn toggle_history(&mut self) {
        self.view = match self.view {
            View::Clock => {
                self.refresh_history();
                View::History
            }
            View::History => View::Clock,
        };
    }

    /// Open the settings overlay, or focus it if it is already open.
    pub fn present_settings(&mut self) -> SettingsPresence {
        if self.settings.is_some() {
            self.status = None;
            return SettingsPresence::Focused;
        }

        self.settings = Some(SettingsPanel::from_config(&self.config));
        self.status = Some("Enter: save | Esc: cancel".to_string());
        SettingsPresence::Opened
    }

    /// Close the overlay without saving.
    pub fn close_settings(&mut self) {
        if self.settings.take().is_some() {
            self.status = None;
        }
    }

    /// Validate and save the overlay's settings.
    ///
    /// On success the overlay closes and the new cycle and notification
    /// settings are returned for the runtime. On error the overlay stays
    /// open and nothing is saved.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid cycle or if the file cannot be written.
    pub fn commit_settings(
        &mut self,
    ) -> Result<Option<(CycleConfig, NotificationConfig)>, PomoError> {
        let Some(panel) = &self.settings else {
            return Ok(None);
        };

        let mut next = self.config.clone();
        next.timer = panel.timer;
        next.notifications = panel.notifications.clone();
        let cycle = next.timer.cycle_config()?;

        if let Some(path) = &self.config_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            next.save_to_path(path)?;
        }

        info!(?cycle, "settings committed");
        let notifications = next.notifications.clone();
        self.config = next;
        self.settings = None;
        self.status = Some("Settings saved".to_string());
        Ok(Some((cycle, notifications)))
    }

    /// Interval shown next to the period number.
    ///
    /// Follows the runtime, so a committed change held until the current
    /// phase ends is not shown early.
    #[must_use]
    pub const fn long_break_interval(&self) -> u32 {
        self.display.interval
    }
}
