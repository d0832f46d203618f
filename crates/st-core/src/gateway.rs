//! Contracts for the two external services the task store drives.
//!
//! Both are injected into the store at construction time so tests can swap in
//! recording fakes. The libSQL-backed implementations live in `st-db`.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::errors::CalendarError;

/// Local reminder scheduling.
///
/// Scheduling never fails from the caller's point of view: an identifier is
/// always returned and any backend failure is logged by the implementation.
pub trait ReminderGateway {
    /// Ask for permission to deliver reminders. Fire-and-forget.
    fn request_authorization(&self) -> impl Future<Output = ()>;

    /// Schedule a reminder and return its identifier.
    fn schedule(
        &self,
        title: &str,
        body: &str,
        at: DateTime<Utc>,
    ) -> impl Future<Output = String>;

    /// Cancel a scheduled reminder. `None` or an unknown id is a no-op.
    fn cancel(&self, id: Option<&str>) -> impl Future<Output = ()>;
}

/// Calendar event export.
pub trait CalendarGateway {
    /// Whether calendar access is granted.
    fn request_access(&self) -> impl Future<Output = bool>;

    /// Add an event and return its identifier.
    fn add_event(
        &self,
        title: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        notes: Option<&str>,
    ) -> impl Future<Output = Result<String, CalendarError>>;

    /// Remove an event. `Ok(false)` when no such event exists.
    fn remove_event(&self, id: &str) -> impl Future<Output = Result<bool, CalendarError>>;
}
