//! Entity structs for simple-task domain objects.
//!
//! `Task` maps to the `tasks` table in the libSQL database. The snapshot types
//! are a disposable projection written for the widget surface.

mod snapshot;
mod task;

pub use snapshot::{SNAPSHOT_LIMIT, TaskSnapshot, TaskSnapshotItem};
pub use task::Task;
