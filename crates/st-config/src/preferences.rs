//! User preferences toggled from the settings surface.

use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Preferences {
    /// Dark appearance for front ends that render one.
    #[serde(default)]
    pub dark_mode: bool,

    /// Whether create/update schedule reminders at all.
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            notifications_enabled: default_true(),
        }
    }
}
