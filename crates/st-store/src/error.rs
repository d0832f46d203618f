//! Task store error types.

use st_core::CalendarError;
use st_db::error::DatabaseError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The database has not been opened yet (or failed to open).
    #[error("Task store is not loaded")]
    NotLoaded,

    /// No task with this id exists in memory or in the database.
    #[error("Task not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// The background open task panicked or was aborted.
    #[error("Background load failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
