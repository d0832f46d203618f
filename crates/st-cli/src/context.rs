use std::path::PathBuf;

use anyhow::Context;
use st_config::{IN_MEMORY, StConfig};
use st_core::ReminderGateway;
use st_db::{LocalCalendar, ReminderQueue, TaskDb};
use st_store::{DbLocation, LoadState, StoreSettings, TaskStore};
use st_widget::SnapshotWriter;

use crate::cli::GlobalFlags;

pub type Store = TaskStore<ReminderQueue, LocalCalendar>;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: StConfig,
    pub store: Store,
}

impl AppContext {
    /// Open the gateways, build the store and load it.
    pub async fn init(config: StConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let location = resolve_location(&config, flags.db.as_deref())?;
        tracing::debug!(?location, "opening task store");

        let reminders = ReminderQueue::new(
            TaskDb::open(&location)
                .await
                .context("failed to open reminder queue")?,
        );
        let calendar = LocalCalendar::new(
            TaskDb::open(&location)
                .await
                .context("failed to open local calendar")?,
            config.calendar.enabled,
        );

        let settings = StoreSettings::from_config(&config);
        if settings.notifications_enabled {
            reminders.request_authorization().await;
        }

        let mut store = TaskStore::new(
            location,
            reminders,
            calendar,
            snapshot_writer(&config),
            settings,
        );
        if store.load().await == LoadState::Failed {
            anyhow::bail!(
                "failed to load tasks: {}",
                store.last_error().unwrap_or("unknown error")
            );
        }

        Ok(Self { config, store })
    }
}

/// Where the database lives: `--db` wins over `database.path`.
pub fn resolve_location(config: &StConfig, db_override: Option<&str>) -> anyhow::Result<DbLocation> {
    if let Some(path) = db_override {
        return Ok(if path == IN_MEMORY {
            DbLocation::InMemory
        } else {
            DbLocation::File(PathBuf::from(path))
        });
    }
    if config.database.is_in_memory() {
        return Ok(DbLocation::InMemory);
    }
    config
        .database
        .resolved_path()
        .map(DbLocation::File)
        .context("no data directory found; set database.path or SIMPLETASK_DATABASE__PATH")
}

pub fn snapshot_writer(config: &StConfig) -> SnapshotWriter {
    if !config.widget.enabled {
        return SnapshotWriter::disabled();
    }
    config
        .widget
        .snapshot_path()
        .map_or_else(SnapshotWriter::disabled, SnapshotWriter::new)
}
