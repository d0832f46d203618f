//! Widget snapshot location.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the snapshot inside the shared directory.
pub const SNAPSHOT_FILE_NAME: &str = "nextTask.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WidgetConfig {
    /// Whether the snapshot is refreshed after every mutation.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Directory shared with the widget process. Empty means the platform data
    /// directory.
    #[serde(default)]
    pub shared_dir: String,
}

const fn default_enabled() -> bool {
    true
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            shared_dir: String::new(),
        }
    }
}

impl WidgetConfig {
    #[must_use]
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        if !self.shared_dir.is_empty() {
            return Some(PathBuf::from(&self.shared_dir));
        }
        dirs::data_dir().map(|p| p.join("simple-task").join("widget"))
    }

    /// Full path of the snapshot file.
    #[must_use]
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.resolved_dir().map(|dir| dir.join(SNAPSHOT_FILE_NAME))
    }
}
