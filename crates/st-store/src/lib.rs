//! # st-store
//!
//! The task store: the authoritative in-memory view of all tasks for a
//! session, mirrored from the libSQL database.
//!
//! Every create/update/delete
//! 1. writes to the database,
//! 2. cancels and (re)schedules the task's reminder through the injected
//!    [`st_core::ReminderGateway`],
//! 3. re-fetches the task list and refreshes the widget snapshot with the
//!    next five tasks by due date.
//!
//! Failures are recorded on the store (`last_error`) and returned; the store
//! never rolls back in-memory state because of a persistence failure.

mod error;
mod new_task;
mod settings;
mod store;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use new_task::NewTask;
pub use settings::StoreSettings;
pub use store::{LoadState, TaskStore};

pub use st_db::{DbLocation, TaskQuery, TaskUpdate, TaskUpdateBuilder};
