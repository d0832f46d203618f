use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Task;
use crate::enums::TaskCategory;

/// Maximum number of tasks carried by a widget snapshot.
pub const SNAPSHOT_LIMIT: usize = 5;

/// What the widget surface displays: the next few tasks and when the list was
/// generated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskSnapshot {
    pub date: DateTime<Utc>,
    pub tasks: Vec<TaskSnapshotItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskSnapshotItem {
    pub id: Uuid,
    pub title: String,
    pub category: TaskCategory,
}

impl TaskSnapshot {
    /// Project the first [`SNAPSHOT_LIMIT`] tasks in the order given.
    #[must_use]
    pub fn from_tasks(tasks: &[Task], date: DateTime<Utc>) -> Self {
        Self {
            date,
            tasks: tasks
                .iter()
                .take(SNAPSHOT_LIMIT)
                .map(TaskSnapshotItem::from)
                .collect(),
        }
    }
}

impl From<&Task> for TaskSnapshotItem {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            category: task.category,
        }
    }
}
