//! Task repository: insert, lookup, full-row update, delete, filtered query.

use st_core::{Reminder, Task, TaskCategory};
use uuid::Uuid;

use crate::TaskDb;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_bool, get_opt_string, parse_datetime, parse_uuid};

const SELECT_COLS: &str = "id, title, description, due_date, category, is_done, is_in_calendar, \
     calendar_event_id, reminder_offset_secs, notification_id, created_at, updated_at";

/// Predicate for [`TaskDb::query_tasks`].
///
/// An empty `search_text` matches every title; `is_done: None` matches both
/// open and completed tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub search_text: String,
    pub is_done: Option<bool>,
}

impl TaskQuery {
    /// Every task.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Titles containing `text`, ignoring case.
    #[must_use]
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: text.into(),
            is_done: None,
        }
    }

    #[must_use]
    pub const fn done(mut self, is_done: bool) -> Self {
        self.is_done = Some(is_done);
        self
    }

    /// Case-insensitive (Unicode-aware) title match plus the done filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(is_done) = self.is_done {
            if task.is_done != is_done {
                return false;
            }
        }
        self.search_text.is_empty()
            || task
                .title
                .to_lowercase()
                .contains(&self.search_text.to_lowercase())
    }
}

/// Optional text columns holding `''` read back as `None`, so a row written
/// by hand with an empty event or notification id counts as having none.
fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    Ok(Task {
        id: parse_uuid(&row.get::<String>(0)?)?,
        title: row.get(1)?,
        description: get_opt_string(row, 2)?,
        due_date: parse_datetime(&row.get::<String>(3)?)?,
        category: get_opt_string(row, 4)?
            .map_or(TaskCategory::Other, |raw| TaskCategory::from_stored(&raw)),
        is_done: get_bool(row, 5)?,
        is_in_calendar: get_bool(row, 6)?,
        calendar_event_id: get_opt_string(row, 7)?,
        reminder: Reminder::from_column(row.get::<Option<i64>>(8)?),
        notification_id: get_opt_string(row, 9)?,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
        updated_at: parse_datetime(&row.get::<String>(11)?)?,
    })
}

impl TaskDb {
    /// Insert a new task row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails (including a duplicate id).
    pub async fn insert_task(&self, task: &Task) -> Result<(), DatabaseError> {
        let id = task.id.to_string();
        self.conn()
            .execute(
                &format!(
                    "INSERT INTO tasks ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
                ),
                libsql::params![
                    id.as_str(),
                    task.title.as_str(),
                    task.description.as_deref(),
                    format_datetime(task.due_date),
                    task.category.as_str(),
                    i64::from(task.is_done),
                    i64::from(task.is_in_calendar),
                    task.calendar_event_id.as_deref(),
                    task.reminder.to_column(),
                    task.notification_id.as_deref(),
                    format_datetime(task.created_at),
                    format_datetime(task.updated_at)
                ],
            )
            .await?;
        tracing::debug!(task_id = %task.id, "task inserted");
        Ok(())
    }

    /// Look up a task by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no such task exists.
    pub async fn get_task(&self, id: Uuid) -> Result<Task, DatabaseError> {
        let id = id.to_string();
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1"),
                [id.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_task(&row)
    }

    /// Overwrite every mutable column of an existing task.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the task no longer exists, or the
    /// underlying error if the update fails.
    pub async fn update_task(&self, task: &Task) -> Result<(), DatabaseError> {
        let id = task.id.to_string();
        let changed = self
            .conn()
            .execute(
                "UPDATE tasks SET title = ?1, description = ?2, due_date = ?3, category = ?4, \
                 is_done = ?5, is_in_calendar = ?6, calendar_event_id = ?7, \
                 reminder_offset_secs = ?8, notification_id = ?9, updated_at = ?10 \
                 WHERE id = ?11",
                libsql::params![
                    task.title.as_str(),
                    task.description.as_deref(),
                    format_datetime(task.due_date),
                    task.category.as_str(),
                    i64::from(task.is_done),
                    i64::from(task.is_in_calendar),
                    task.calendar_event_id.as_deref(),
                    task.reminder.to_column(),
                    task.notification_id.as_deref(),
                    format_datetime(task.updated_at),
                    id.as_str()
                ],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        tracing::debug!(task_id = %task.id, "task updated");
        Ok(())
    }

    /// Delete a task. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn delete_task(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let id = id.to_string();
        let changed = self
            .conn()
            .execute("DELETE FROM tasks WHERE id = ?1", [id.as_str()])
            .await?;
        tracing::debug!(task_id = %id, removed = changed > 0, "task delete");
        Ok(changed > 0)
    }

    /// Tasks matching `query`, ordered by due date (earliest first).
    ///
    /// The done flag is filtered in SQL; the title match runs in Rust so case
    /// folding covers non-ASCII titles too.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be parsed.
    pub async fn query_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, DatabaseError> {
        let mut rows = match query.is_done {
            Some(is_done) => {
                self.conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM tasks WHERE is_done = ?1 \
                             ORDER BY due_date, created_at"
                        ),
                        [i64::from(is_done)],
                    )
                    .await?
            }
            None => {
                self.conn()
                    .query(
                        &format!("SELECT {SELECT_COLS} FROM tasks ORDER BY due_date, created_at"),
                        (),
                    )
                    .await?
            }
        };

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            let task = row_to_task(&row)?;
            if query.matches(&task) {
                tasks.push(task);
            }
        }
        Ok(tasks)
    }

    /// Number of stored tasks.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_tasks(&self) -> Result<u64, DatabaseError> {
        let mut rows = self.conn().query("SELECT COUNT(*) FROM tasks", ()).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count: i64 = row.get(0)?;
        u64::try_from(count).map_err(|e| DatabaseError::Other(e.into()))
    }
}
