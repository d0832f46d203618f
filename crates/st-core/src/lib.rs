//! # st-core
//!
//! Core types and contracts shared across all simple-task crates:
//! - The `Task` entity and the widget snapshot projection
//! - Category, filter, and reminder enums
//! - Reminder and calendar gateway traits (implemented in `st-db`, faked in tests)
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod gateway;
pub mod reminder;

pub use entities::{SNAPSHOT_LIMIT, Task, TaskSnapshot, TaskSnapshotItem};
pub use enums::{TaskCategory, TaskFilter};
pub use errors::{CalendarError, CoreError};
pub use gateway::{CalendarGateway, ReminderGateway};
pub use reminder::Reminder;
