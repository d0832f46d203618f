//! # st-widget
//!
//! Shared snapshot file between the app and the home-screen widget.
//!
//! The writer projects the first five tasks it is given to
//! `{id, title, category}`, stamps the list with the current time, and
//! replaces the file atomically (temp file in the same directory, then
//! rename). The reader returns `None` for anything it cannot use.
//!
//! The widget is best-effort: write failures are logged, never returned.

mod error;
mod reader;
mod writer;

pub use error::SnapshotError;
pub use reader::SnapshotReader;
pub use writer::SnapshotWriter;
