use chrono::{DateTime, Utc};
use st_core::{Reminder, Task, TaskCategory};

/// Caller-supplied fields for [`crate::TaskStore::create`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to the creation time.
    pub due_date: Option<DateTime<Utc>>,
    /// Defaults to [`TaskCategory::Other`].
    pub category: Option<TaskCategory>,
    pub reminder: Reminder,
}

impl NewTask {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn due(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub const fn category(mut self, category: TaskCategory) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub const fn reminder(mut self, reminder: Reminder) -> Self {
        self.reminder = reminder;
        self
    }

    pub(crate) fn into_task(self, now: DateTime<Utc>) -> Task {
        Task {
            description: self.description.filter(|d| !d.is_empty()),
            due_date: self.due_date.unwrap_or(now),
            category: self.category.unwrap_or_default(),
            reminder: self.reminder,
            ..Task::new(self.title, now)
        }
    }
}
