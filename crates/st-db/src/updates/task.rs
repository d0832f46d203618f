//! Task update builder.

use chrono::{DateTime, Utc};
use serde::Serialize;
use st_core::{Reminder, Task, TaskCategory};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder: Option<Reminder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_in_calendar: Option<bool>,
}

impl TaskUpdate {
    /// Whether no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.category.is_none()
            && self.reminder.is_none()
            && self.is_done.is_none()
            && self.is_in_calendar.is_none()
    }

    /// Write every `Some` field onto `task` and bump `updated_at`.
    ///
    /// An empty description is stored as no description. Clearing
    /// `is_in_calendar` also drops the stored calendar event id.
    pub fn apply(&self, task: &mut Task, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            task.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            task.description = description.clone().filter(|d| !d.is_empty());
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(reminder) = self.reminder {
            task.reminder = reminder;
        }
        if let Some(is_done) = self.is_done {
            task.is_done = is_done;
        }
        if let Some(is_in_calendar) = self.is_in_calendar {
            task.is_in_calendar = is_in_calendar;
            if !is_in_calendar {
                task.calendar_event_id = None;
            }
        }
        task.updated_at = now;
    }
}

#[derive(Debug, Default)]
pub struct TaskUpdateBuilder(TaskUpdate);

impl TaskUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TaskUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub const fn due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.0.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub const fn category(mut self, category: TaskCategory) -> Self {
        self.0.category = Some(category);
        self
    }

    #[must_use]
    pub const fn reminder(mut self, reminder: Reminder) -> Self {
        self.0.reminder = Some(reminder);
        self
    }

    #[must_use]
    pub const fn is_done(mut self, is_done: bool) -> Self {
        self.0.is_done = Some(is_done);
        self
    }

    #[must_use]
    pub const fn is_in_calendar(mut self, is_in_calendar: bool) -> Self {
        self.0.is_in_calendar = Some(is_in_calendar);
        self
    }

    #[must_use]
    pub fn build(self) -> TaskUpdate {
        self.0
    }
}
