use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::TaskCategory;
use crate::reminder::Reminder;

/// A short task note with an optional due-date reminder and calendar event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub category: TaskCategory,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default)]
    pub is_in_calendar: bool,
    pub calendar_event_id: Option<String>,
    #[serde(default)]
    pub reminder: Reminder,
    /// Identifier of the currently scheduled reminder, if any.
    pub notification_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// A fresh task with a new id, due at `now`, in the default category.
    #[must_use]
    pub fn new(title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            due_date: now,
            category: TaskCategory::default(),
            is_done: false,
            is_in_calendar: false,
            calendar_event_id: None,
            reminder: Reminder::Off,
            notification_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// When the configured reminder should fire, if one is set.
    #[must_use]
    pub fn reminder_at(&self) -> Option<DateTime<Utc>> {
        self.reminder.fire_at(self.due_date)
    }
}
