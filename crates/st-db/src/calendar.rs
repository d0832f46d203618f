//! Database-backed local calendar.
//!
//! Implements [`CalendarGateway`] over the `calendar_events` table. Access is
//! granted or denied up front (from configuration) rather than prompting.

use chrono::{DateTime, Utc};
use serde::Serialize;
use st_core::{CalendarError, CalendarGateway};
use uuid::Uuid;

use crate::TaskDb;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, parse_datetime};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub notes: Option<String>,
}

pub struct LocalCalendar {
    db: TaskDb,
    access_granted: bool,
}

impl LocalCalendar {
    #[must_use]
    pub const fn new(db: TaskDb, access_granted: bool) -> Self {
        Self { db, access_granted }
    }

    /// All stored events, earliest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn events(&self) -> Result<Vec<CalendarEvent>, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                "SELECT id, title, starts_at, ends_at, notes FROM calendar_events ORDER BY starts_at",
                (),
            )
            .await?;
        let mut events = Vec::new();
        while let Some(row) = rows.next().await? {
            events.push(CalendarEvent {
                id: row.get(0)?,
                title: row.get(1)?,
                starts_at: parse_datetime(&row.get::<String>(2)?)?,
                ends_at: parse_datetime(&row.get::<String>(3)?)?,
                notes: get_opt_string(&row, 4)?,
            });
        }
        Ok(events)
    }
}

fn backend(e: impl std::fmt::Display) -> CalendarError {
    CalendarError::Backend(e.to_string())
}

impl CalendarGateway for LocalCalendar {
    async fn request_access(&self) -> bool {
        self.access_granted
    }

    async fn add_event(
        &self,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        notes: Option<&str>,
    ) -> Result<String, CalendarError> {
        if !self.access_granted {
            return Err(CalendarError::AccessDenied);
        }
        if end < start {
            return Err(CalendarError::Backend(
                "event ends before it starts".into(),
            ));
        }
        let id = Uuid::new_v4().to_string();
        self.db
            .conn()
            .execute(
                "INSERT INTO calendar_events (id, title, starts_at, ends_at, notes, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    title,
                    format_datetime(start),
                    format_datetime(end),
                    notes,
                    format_datetime(Utc::now())
                ],
            )
            .await
            .map_err(backend)?;
        tracing::debug!(event_id = %id, "calendar event added");
        Ok(id)
    }

    async fn remove_event(&self, id: &str) -> Result<bool, CalendarError> {
        if !self.access_granted {
            return Err(CalendarError::AccessDenied);
        }
        let removed = self
            .db
            .conn()
            .execute("DELETE FROM calendar_events WHERE id = ?1", [id])
            .await
            .map_err(backend)?;
        Ok(removed > 0)
    }
}
