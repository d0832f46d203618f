//! Snapshot I/O errors. Logged by the writer, never surfaced to callers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot path has no parent directory: {0}")]
    NoParent(String),
}
