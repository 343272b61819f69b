//! Collaborators the cycle controller reports to.
//!
//! The controller never renders, plays sounds or writes files itself; it
//! hands its outputs to these sinks.

use chrono::{DateTime, Utc};

use super::phase::{DisplayUpdate, Notice};
use crate::config::NotificationConfig;
use crate::error::PomoError;
use crate::features::history::SessionRecord;

/// Receives display refreshes.
#[cfg_attr(test, mockall::automock)]
pub trait DisplaySink: Send {
    fn update(&mut self, update: DisplayUpdate);
}

/// Persists completed work sessions.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send {
    /// Record a work phase completed at `completed_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be stored.
    fn record(&mut self, completed_at: DateTime<Utc>, duration_minutes: u32)
        -> Result<(), PomoError>;

    /// Every stored record, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be read.
    fn all(&self) -> Result<Vec<SessionRecord>, PomoError>;
}

/// Turns notices into sounds and desktop notifications.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send {
    fn notify(&mut self, notice: Notice);

    /// Stop any sound still playing.
    fn silence(&mut self);

    /// Replace the sound and notification settings.
    fn configure(&mut self, settings: NotificationConfig);
}

