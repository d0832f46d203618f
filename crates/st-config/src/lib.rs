//! # st-config
//!
//! Layered configuration loading for simple-task using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SIMPLETASK_*` prefix, `__` as separator)
//! 2. Project-level `.simple-task/config.toml`
//! 3. User-level `~/.config/simple-task/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SIMPLETASK_DATABASE__PATH` -> `database.path`,
//! `SIMPLETASK_PREFERENCES__NOTIFICATIONS_ENABLED` -> `preferences.notifications_enabled`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use st_config::StConfig;
//!
//! let config = StConfig::load_with_dotenv().expect("config");
//! if config.preferences.notifications_enabled {
//!     println!("reminders on");
//! }
//! ```

mod calendar;
mod database;
mod error;
mod preferences;
mod widget;

pub use calendar::CalendarConfig;
pub use database::{DatabaseConfig, IN_MEMORY};
pub use error::ConfigError;
pub use preferences::Preferences;
pub use widget::{SNAPSHOT_FILE_NAME, WidgetConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

impl StConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".simple-task/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SIMPLETASK_").split("__"))
    }

    /// Reject values that would make the store misbehave.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero-length calendar event.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.calendar.event_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "calendar.event_minutes".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("simple-task").join("config.toml"))
    }
}
