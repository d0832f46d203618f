use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use st_core::{Task, TaskSnapshot};

use crate::error::SnapshotError;

/// Writes the widget snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    path: PathBuf,
    enabled: bool,
}

impl SnapshotWriter {
    /// A writer targeting the file at `path`. The parent directory is created
    /// on first write.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self {
            path,
            enabled: true,
        }
    }

    /// A writer that does nothing (widget disabled, or tests).
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            path: PathBuf::new(),
            enabled: false,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the snapshot with the first five of `tasks`, in the order given.
    ///
    /// Returns the snapshot that was written, or `None` when disabled or when
    /// the write failed (the failure is logged).
    pub fn write(&self, tasks: &[Task]) -> Option<TaskSnapshot> {
        if !self.enabled {
            return None;
        }
        let snapshot = TaskSnapshot::from_tasks(tasks, Utc::now());
        match self.persist(&snapshot) {
            Ok(()) => {
                tracing::debug!(
                    path = %self.path.display(),
                    count = snapshot.tasks.len(),
                    "widget snapshot written"
                );
                Some(snapshot)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "failed to write widget snapshot: {e}");
                None
            }
        }
    }

    fn persist(&self, snapshot: &TaskSnapshot) -> Result<(), SnapshotError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| SnapshotError::NoParent(self.path.display().to_string()))?;
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, snapshot)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| SnapshotError::Io(e.error))?;
        Ok(())
    }
}
