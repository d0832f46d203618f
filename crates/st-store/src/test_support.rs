//! Recording gateway fakes and store builders for unit tests.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use st_core::{CalendarError, CalendarGateway, ReminderGateway};
use st_widget::SnapshotWriter;

use crate::{DbLocation, StoreSettings, TaskStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledCall {
    pub id: String,
    pub title: String,
    pub body: String,
    pub at: DateTime<Utc>,
}

/// Reminder gateway that only records what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingReminders {
    pub scheduled: Mutex<Vec<ScheduledCall>>,
    pub cancelled: Mutex<Vec<String>>,
}

impl RecordingReminders {
    pub fn scheduled(&self) -> Vec<ScheduledCall> {
        self.scheduled.lock().unwrap().clone()
    }

    pub fn cancelled(&self) -> Vec<String> {
        self.cancelled.lock().unwrap().clone()
    }
}

impl ReminderGateway for RecordingReminders {
    async fn request_authorization(&self) {}

    async fn schedule(&self, title: &str, body: &str, at: DateTime<Utc>) -> String {
        let mut scheduled = self.scheduled.lock().unwrap();
        let id = format!("rem-{}", scheduled.len() + 1);
        scheduled.push(ScheduledCall {
            id: id.clone(),
            title: title.to_owned(),
            body: body.to_owned(),
            at,
        });
        id
    }

    async fn cancel(&self, id: Option<&str>) {
        if let Some(id) = id {
            self.cancelled.lock().unwrap().push(id.to_owned());
        }
    }
}

/// Calendar gateway with switchable access and failure.
#[derive(Debug)]
pub struct RecordingCalendar {
    pub granted: bool,
    pub fail: bool,
    pub added: Mutex<Vec<(String, DateTime<Utc>, DateTime<Utc>)>>,
    pub removed: Mutex<Vec<String>>,
}

impl Default for RecordingCalendar {
    fn default() -> Self {
        Self {
            granted: true,
            fail: false,
            added: Mutex::default(),
            removed: Mutex::default(),
        }
    }
}

impl RecordingCalendar {
    pub fn denied() -> Self {
        Self {
            granted: false,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn added(&self) -> Vec<(String, DateTime<Utc>, DateTime<Utc>)> {
        self.added.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }
}

impl CalendarGateway for RecordingCalendar {
    async fn request_access(&self) -> bool {
        self.granted
    }

    async fn add_event(
        &self,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        _notes: Option<&str>,
    ) -> Result<String, CalendarError> {
        if self.fail {
            return Err(CalendarError::Backend("calendar offline".into()));
        }
        let mut added = self.added.lock().unwrap();
        added.push((title.to_owned(), start, end));
        Ok(format!("evt-{}", added.len()))
    }

    async fn remove_event(&self, id: &str) -> Result<bool, CalendarError> {
        if self.fail {
            return Err(CalendarError::Backend("calendar offline".into()));
        }
        self.removed.lock().unwrap().push(id.to_owned());
        Ok(true)
    }
}

pub type TestStore = TaskStore<RecordingReminders, RecordingCalendar>;

/// Loaded in-memory store with default settings and no snapshot file.
pub async fn loaded_store() -> TestStore {
    loaded_store_with(RecordingCalendar::default(), SnapshotWriter::disabled()).await
}

pub async fn loaded_store_with(calendar: RecordingCalendar, snapshot: SnapshotWriter) -> TestStore {
    let mut store = TaskStore::new(
        DbLocation::InMemory,
        RecordingReminders::default(),
        calendar,
        snapshot,
        StoreSettings::default(),
    );
    store.load().await;
    assert!(store.is_loaded(), "in-memory store should load");
    store
}

/// A snapshot writer into a fresh temp dir; keep the dir alive for the test.
pub fn temp_snapshot() -> (tempfile::TempDir, PathBuf, SnapshotWriter) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nextTask.json");
    let writer = SnapshotWriter::new(path.clone());
    (dir, path, writer)
}

/// Drop the tasks table so every subsequent task query or write fails.
pub async fn break_tasks_table(store: &TestStore) {
    store
        .db()
        .unwrap()
        .conn()
        .execute("DROP TABLE tasks", ())
        .await
        .unwrap();
}
