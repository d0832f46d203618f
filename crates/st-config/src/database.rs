//! Database location configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Special path value that selects a throwaway in-memory database.
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the libSQL file. Empty means the platform data directory.
    #[serde(default)]
    pub path: String,
}

impl DatabaseConfig {
    /// Whether this config selects an in-memory database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }

    /// Resolved database path, falling back to `<data_dir>/simple-task/tasks.db`.
    ///
    /// Returns `None` for in-memory databases or when no data directory exists.
    #[must_use]
    pub fn resolved_path(&self) -> Option<PathBuf> {
        if self.is_in_memory() {
            return None;
        }
        if !self.path.is_empty() {
            return Some(PathBuf::from(&self.path));
        }
        dirs::data_dir().map(|p| p.join("simple-task").join("tasks.db"))
    }
}
