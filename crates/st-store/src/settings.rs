use chrono::TimeDelta;
use st_config::StConfig;

/// Knobs the store reads on every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    /// When false, create/update never schedule reminders.
    pub notifications_enabled: bool,
    /// Length of calendar events exported for a task.
    pub event_duration: TimeDelta,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            event_duration: TimeDelta::hours(1),
        }
    }
}

impl StoreSettings {
    #[must_use]
    pub fn from_config(config: &StConfig) -> Self {
        Self {
            notifications_enabled: config.preferences.notifications_enabled,
            event_duration: TimeDelta::minutes(i64::from(config.calendar.event_minutes)),
        }
    }
}
