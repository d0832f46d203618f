//! # st-db
//!
//! libSQL persistence for simple-task.
//!
//! Owns the embedded database lifecycle (file-backed or in-memory, embedded
//! migrations run on every open) and provides:
//! - the task repository (`repos::task`) used by the task store,
//! - `ReminderQueue`, a database-backed [`st_core::ReminderGateway`],
//! - `LocalCalendar`, a database-backed [`st_core::CalendarGateway`].

pub mod calendar;
pub mod error;
pub mod helpers;
mod migrations;
pub mod reminders;
pub mod repos;
pub mod updates;

use std::path::PathBuf;

use error::DatabaseError;
use libsql::Builder;

pub use calendar::{CalendarEvent, LocalCalendar};
pub use reminders::{ReminderQueue, ScheduledReminder};
pub use repos::task::TaskQuery;
pub use updates::task::{TaskUpdate, TaskUpdateBuilder};

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// Throwaway database, discarded on drop.
    InMemory,
    /// libSQL file on disk. Parent directories are created on open.
    File(PathBuf),
}

/// Central database handle for all simple-task state.
pub struct TaskDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    location: DbLocation,
}

impl TaskDb {
    /// Open the database at `location` and run migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the parent directory cannot be created, the
    /// database cannot be opened, or migrations fail.
    pub async fn open(location: &DbLocation) -> Result<Self, DatabaseError> {
        let db = match location {
            DbLocation::InMemory => Builder::new_local(":memory:").build().await?,
            DbLocation::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Other(e.into()))?;
                }
                Builder::new_local(path).build().await?
            }
        };
        let conn = db.connect()?;

        let task_db = Self {
            db,
            conn,
            location: location.clone(),
        };
        task_db.run_migrations().await?;
        tracing::debug!(location = ?task_db.location, "database opened");
        Ok(task_db)
    }

    /// Open a local database at the given path; `":memory:"` selects an
    /// in-memory database.
    ///
    /// # Errors
    ///
    /// Same as [`Self::open`].
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let location = if path == ":memory:" {
            DbLocation::InMemory
        } else {
            DbLocation::File(PathBuf::from(path))
        };
        Self::open(&location).await
    }

    /// Open a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Same as [`Self::open`].
    pub async fn in_memory() -> Result<Self, DatabaseError> {
        Self::open(&DbLocation::InMemory).await
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    #[must_use]
    pub const fn location(&self) -> &DbLocation {
        &self.location
    }
}
