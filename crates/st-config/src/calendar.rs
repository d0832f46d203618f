//! Calendar export settings.

use serde::{Deserialize, Serialize};

const fn default_enabled() -> bool {
    true
}

const fn default_event_minutes() -> u32 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalendarConfig {
    /// Whether calendar access is granted to the local calendar backend.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Length of exported events, starting at the task's due date.
    #[serde(default = "default_event_minutes")]
    pub event_minutes: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            event_minutes: default_event_minutes(),
        }
    }
}
