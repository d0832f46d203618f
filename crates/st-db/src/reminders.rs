//! Database-backed reminder queue.
//!
//! Implements [`ReminderGateway`] by persisting pending reminders in the
//! `reminders` table. A front end polls [`ReminderQueue::take_due`] to deliver
//! the ones whose time has come.

use chrono::{DateTime, Utc};
use serde::Serialize;
use st_core::ReminderGateway;
use uuid::Uuid;

use crate::TaskDb;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, parse_datetime};

/// A reminder waiting to be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledReminder {
    pub id: String,
    pub title: String,
    pub body: String,
    pub fire_at: DateTime<Utc>,
}

fn row_to_reminder(row: &libsql::Row) -> Result<ScheduledReminder, DatabaseError> {
    Ok(ScheduledReminder {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        fire_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

pub struct ReminderQueue {
    db: TaskDb,
}

impl ReminderQueue {
    #[must_use]
    pub const fn new(db: TaskDb) -> Self {
        Self { db }
    }

    /// Every pending reminder, earliest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn pending(&self) -> Result<Vec<ScheduledReminder>, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                "SELECT id, title, body, fire_at FROM reminders ORDER BY fire_at",
                (),
            )
            .await?;
        let mut reminders = Vec::new();
        while let Some(row) = rows.next().await? {
            reminders.push(row_to_reminder(&row)?);
        }
        Ok(reminders)
    }

    /// Remove and return every reminder due at or before `now`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or delete fails.
    pub async fn take_due(&self, now: DateTime<Utc>) -> Result<Vec<ScheduledReminder>, DatabaseError> {
        let cutoff = format_datetime(now);
        let mut rows = self
            .db
            .conn()
            .query(
                "SELECT id, title, body, fire_at FROM reminders WHERE fire_at <= ?1 ORDER BY fire_at",
                [cutoff.as_str()],
            )
            .await?;
        let mut due = Vec::new();
        while let Some(row) = rows.next().await? {
            due.push(row_to_reminder(&row)?);
        }
        drop(rows);

        for reminder in &due {
            self.db
                .conn()
                .execute("DELETE FROM reminders WHERE id = ?1", [reminder.id.as_str()])
                .await?;
        }
        Ok(due)
    }

    async fn insert(
        &self,
        id: &str,
        title: &str,
        body: &str,
        at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        self.db
            .conn()
            .execute(
                "INSERT INTO reminders (id, title, body, fire_at, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![id, title, body, format_datetime(at), format_datetime(Utc::now())],
            )
            .await?;
        Ok(())
    }
}

impl ReminderGateway for ReminderQueue {
    async fn request_authorization(&self) {
        tracing::debug!("local reminder queue needs no authorization");
    }

    async fn schedule(&self, title: &str, body: &str, at: DateTime<Utc>) -> String {
        let id = Uuid::new_v4().to_string();
        match self.insert(&id, title, body, at).await {
            Ok(()) => tracing::debug!(reminder_id = %id, %at, "reminder scheduled"),
            Err(e) => tracing::warn!(reminder_id = %id, "failed to schedule reminder: {e}"),
        }
        id
    }

    async fn cancel(&self, id: Option<&str>) {
        let Some(id) = id else { return };
        match self
            .db
            .conn()
            .execute("DELETE FROM reminders WHERE id = ?1", [id])
            .await
        {
            Ok(removed) => tracing::debug!(reminder_id = %id, removed, "reminder cancelled"),
            Err(e) => tracing::warn!(reminder_id = %id, "failed to cancel reminder: {e}"),
        }
    }
}
