use std::path::{Path, PathBuf};

use st_core::TaskSnapshot;

/// Reads the widget snapshot file written by [`crate::SnapshotWriter`].
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    path: PathBuf,
}

impl SnapshotReader {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current snapshot, or `None` if the file is absent or unparsable.
    #[must_use]
    pub fn read(&self) -> Option<TaskSnapshot> {
        let bytes = std::fs::read(&self.path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), "ignoring unreadable snapshot: {e}");
                None
            }
        }
    }
}
