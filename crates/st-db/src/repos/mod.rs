//! Repository modules implementing CRUD operations on `TaskDb`.
//!
//! Each module adds methods to `TaskDb` via `impl TaskDb` blocks.

pub mod task;
