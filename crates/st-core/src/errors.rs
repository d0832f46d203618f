//! Cross-cutting error types for simple-task.
//!
//! Domain-specific errors (`DatabaseError`, `StoreError`, `ConfigError`) are
//! defined in their respective crates. The CLI converges everything into
//! `anyhow::Error`.

use thiserror::Error;

/// Errors that can be raised by any simple-task crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (unknown category, malformed reminder, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors surfaced by a [`CalendarGateway`](crate::gateway::CalendarGateway).
///
/// Calendar failures are explicit values: the caller decides whether the
/// task should be flagged as being in the calendar.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// The user (or configuration) did not grant calendar access.
    #[error("Calendar access denied")]
    AccessDenied,

    /// The calendar backend failed to store or remove the event.
    #[error("Calendar backend error: {0}")]
    Backend(String),
}
