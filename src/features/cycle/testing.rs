//! Recording fakes for the cycle collaborators.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use super::phase::{DisplayUpdate, Notice};
use super::ports::{DisplaySink, NotificationSink, SessionStore};
use crate::config::NotificationConfig;
use crate::error::PomoError;
use crate::features::history::SessionRecord;

#[derive(Clone, Default)]
pub struct RecordingDisplay(pub Arc<Mutex<Vec<DisplayUpdate>>>);

impl DisplaySink for RecordingDisplay {
    fn update(&mut self, update: DisplayUpdate) {
        self.0.lock().unwrap().push(update);
    }
}

impl RecordingDisplay {
    pub fn last(&self) -> DisplayUpdate {
        self.0.lock().unwrap().last().cloned().unwrap()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore(pub Arc<Mutex<Vec<DateTime<Utc>>>>);

impl SessionStore for MemoryStore {
    fn record(&mut self, completed_at: DateTime<Utc>, _duration_minutes: u32) -> Result<(), PomoError> {
        self.0.lock().unwrap().push(completed_at);
        Ok(())
    }

    fn all(&self) -> Result<Vec<SessionRecord>, PomoError> {
        let records = self.0.lock().unwrap();
        Ok(records
            .iter()
            .zip(1..)
            .map(|(completed_at, id)| SessionRecord {
                id,
                completed_at: *completed_at,
                duration_minutes: 25,
            })
            .collect())
    }
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub notices: Arc<Mutex<Vec<Notice>>>,
    pub silenced: Arc<Mutex<usize>>,
    pub configured: Arc<Mutex<Vec<NotificationConfig>>>,
}

impl NotificationSink for RecordingNotifier {
    fn notify(&mut self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }

    fn silence(&mut self) {
        *self.silenced.lock().unwrap() += 1;
    }

    fn configure(&mut self, settings: NotificationConfig) {
        self.configured.lock().unwrap().push(settings);
    }
}
