//! `TaskStore`: in-memory task list plus reminder, calendar, and snapshot
//! orchestration.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use st_core::{CalendarError, CalendarGateway, ReminderGateway, Task, TaskFilter};
use st_db::error::DatabaseError;
use st_db::{DbLocation, TaskDb, TaskQuery, TaskUpdate, TaskUpdateBuilder};
use st_widget::SnapshotWriter;
use tokio::sync::watch;
use uuid::Uuid;

use crate::error::StoreError;
use crate::new_task::NewTask;
use crate::settings::StoreSettings;

/// Lifecycle of the underlying database handle.
///
/// ```text
/// unloaded → loading → loaded
///                    → failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
    Failed,
}

/// Single-writer task store. Every mutating method takes `&mut self`.
pub struct TaskStore<R, C> {
    location: DbLocation,
    db: Option<TaskDb>,
    reminders: R,
    calendar: C,
    snapshot: SnapshotWriter,
    settings: StoreSettings,
    tasks: Vec<Task>,
    state: LoadState,
    last_error: Option<String>,
    dirty: HashSet<Uuid>,
    revision: watch::Sender<u64>,
}

impl<R: ReminderGateway, C: CalendarGateway> TaskStore<R, C> {
    /// Build an unloaded store. Call [`Self::load`] before anything else.
    #[must_use]
    pub fn new(
        location: DbLocation,
        reminders: R,
        calendar: C,
        snapshot: SnapshotWriter,
        settings: StoreSettings,
    ) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            location,
            db: None,
            reminders,
            calendar,
            snapshot,
            settings,
            tasks: Vec::new(),
            state: LoadState::Unloaded,
            last_error: None,
            dirty: HashSet::new(),
            revision,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Current in-memory task list, as returned by the last successful fetch.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks passing `filter`, evaluated against `now`.
    #[must_use]
    pub fn visible(&self, filter: TaskFilter, now: DateTime<Utc>) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.matches(t, now)).collect()
    }

    #[must_use]
    pub const fn load_state(&self) -> LoadState {
        self.state
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self.state, LoadState::Loaded)
    }

    /// Human-readable message of the most recent failure.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Whether [`Self::edit`] left changes that [`Self::save`] would flush.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Receiver whose value is bumped every time the task list changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    #[must_use]
    pub const fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    pub const fn set_notifications_enabled(&mut self, enabled: bool) {
        self.settings.notifications_enabled = enabled;
    }

    #[must_use]
    pub const fn reminders(&self) -> &R {
        &self.reminders
    }

    #[must_use]
    pub const fn calendar(&self) -> &C {
        &self.calendar
    }

    /// The open database, if loaded.
    #[must_use]
    pub const fn db(&self) -> Option<&TaskDb> {
        self.db.as_ref()
    }

    // -----------------------------------------------------------------------
    // Load / fetch / save
    // -----------------------------------------------------------------------

    /// Open the database on a background task, then fetch every task.
    ///
    /// Never fails: on error the store moves to [`LoadState::Failed`] with an
    /// empty list and the message is available from [`Self::last_error`].
    pub async fn load(&mut self) -> LoadState {
        if self.db.is_some() {
            let _ = self.fetch(&TaskQuery::all()).await;
            return self.state;
        }

        self.state = LoadState::Loading;
        let location = self.location.clone();
        let opened = tokio::spawn(async move { TaskDb::open(&location).await }).await;

        match opened.map_err(StoreError::from).and_then(|r| r.map_err(StoreError::from)) {
            Ok(db) => {
                self.db = Some(db);
                self.state = LoadState::Loaded;
                tracing::debug!(location = ?self.location, "task store loaded");
                let _ = self.fetch(&TaskQuery::all()).await;
            }
            Err(e) => {
                tracing::warn!(location = ?self.location, "task store failed to load: {e}");
                self.state = LoadState::Failed;
                self.tasks.clear();
                self.last_error = Some(e.to_string());
                self.notify();
            }
        }
        self.state
    }

    /// Replace the in-memory list with the tasks matching `query`.
    ///
    /// On failure the previous list is kept. Tasks with unsaved edits keep
    /// their in-memory values.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotLoaded` before a successful load, or the
    /// database error.
    pub async fn fetch(&mut self, query: &TaskQuery) -> Result<(), StoreError> {
        let result = match &self.db {
            Some(db) => db.query_tasks(query).await.map_err(StoreError::from),
            None => Err(StoreError::NotLoaded),
        };
        let fetched = self.record(result)?;

        let mut tasks = fetched;
        self.overlay_dirty(&mut tasks);
        self.tasks = tasks;
        self.notify();
        Ok(())
    }

    /// Mutate a task in memory only; [`Self::save`] persists it.
    ///
    /// Reminders and the widget snapshot are not touched. Use
    /// [`Self::update`] for changes that should reschedule.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the task is not in the in-memory list.
    pub fn edit(&mut self, id: Uuid, f: impl FnOnce(&mut Task)) -> Result<(), StoreError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return self.record(Err(StoreError::NotFound(id)));
        };
        f(task);
        task.updated_at = Utc::now();
        self.dirty.insert(id);
        self.notify();
        Ok(())
    }

    /// Persist tasks changed through [`Self::edit`], if any. Returns how many
    /// were written.
    ///
    /// A failure leaves the in-memory values (and their dirty mark) in place.
    ///
    /// # Errors
    ///
    /// Returns the first database error encountered.
    pub async fn save(&mut self) -> Result<usize, StoreError> {
        if self.dirty.is_empty() {
            return Ok(0);
        }
        let result = self.save_inner().await;
        self.record(result)
    }

    async fn save_inner(&mut self) -> Result<usize, StoreError> {
        let db = self.db.as_ref().ok_or(StoreError::NotLoaded)?;
        let mut saved = Vec::new();
        let mut failure = None;
        for id in &self.dirty {
            let Some(task) = self.tasks.iter().find(|t| t.id == *id) else {
                saved.push(*id);
                continue;
            };
            match db.update_task(task).await {
                Ok(()) => saved.push(*id),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }
        for id in &saved {
            self.dirty.remove(id);
        }
        if let Some(e) = failure {
            return Err(e.into());
        }
        tracing::debug!(count = saved.len(), "pending task edits saved");
        self.write_snapshot().await;
        Ok(saved.len())
    }

    // -----------------------------------------------------------------------
    // Create / update / delete
    // -----------------------------------------------------------------------

    /// Create, persist, and (if enabled) schedule a reminder for a new task.
    ///
    /// On success the task is stored and present in [`Self::tasks`]. On a
    /// persistence failure nothing is added and any reminder just scheduled is
    /// cancelled again.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotLoaded` or the database error.
    pub async fn create(&mut self, new: NewTask) -> Result<Task, StoreError> {
        let result = self.create_inner(new).await;
        self.record(result)
    }

    async fn create_inner(&mut self, new: NewTask) -> Result<Task, StoreError> {
        if self.db.is_none() {
            return Err(StoreError::NotLoaded);
        }
        let mut task = new.into_task(Utc::now());
        task.notification_id = self.schedule_reminder(&task).await;

        let inserted = match &self.db {
            Some(db) => db.insert_task(&task).await,
            None => return Err(StoreError::NotLoaded),
        };
        if let Err(e) = inserted {
            self.reminders.cancel(task.notification_id.as_deref()).await;
            return Err(e.into());
        }
        tracing::debug!(task_id = %task.id, reminder = %task.reminder, "task created");

        if !self.refresh().await && self.get(task.id).is_none() {
            self.tasks.push(task.clone());
            self.tasks.sort_by_key(|t| t.due_date);
            self.notify();
            self.write_snapshot().await;
        }
        Ok(task)
    }

    /// Apply `update` to a task, reschedule its reminder, and persist.
    ///
    /// The existing reminder is always cancelled first; a new one is scheduled
    /// only when the resulting reminder is set and notifications are enabled.
    /// A persistence failure is returned but the in-memory change stays (and
    /// is retried by [`Self::save`]).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound`, `StoreError::NotLoaded`, or the
    /// database error.
    pub async fn update(&mut self, id: Uuid, update: TaskUpdate) -> Result<Task, StoreError> {
        let result = self.update_inner(id, update).await;
        self.record(result)
    }

    async fn update_inner(&mut self, id: Uuid, update: TaskUpdate) -> Result<Task, StoreError> {
        let mut task = self.current(id).await?;
        tracing::debug!(
            task_id = %id,
            changes = %serde_json::to_string(&update).unwrap_or_default(),
            "updating task"
        );

        let dropped_event = match update.is_in_calendar {
            Some(false) => task.calendar_event_id.clone(),
            _ => None,
        };
        update.apply(&mut task, Utc::now());

        self.reminders.cancel(task.notification_id.as_deref()).await;
        task.notification_id = self.schedule_reminder(&task).await;

        if let Some(event_id) = dropped_event {
            self.remove_calendar_event(&event_id).await;
        }

        self.persist_in_memory(task.clone()).await?;
        self.refresh().await;
        Ok(task)
    }

    /// Mark a task done or open again.
    ///
    /// # Errors
    ///
    /// Same as [`Self::update`].
    pub async fn set_done(&mut self, id: Uuid, done: bool) -> Result<Task, StoreError> {
        self.update(id, TaskUpdateBuilder::new().is_done(done).build())
            .await
    }

    /// Cancel the reminder, remove the calendar event, and delete the task.
    ///
    /// Deleting a task that no longer exists is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotLoaded` or the database error. The task is
    /// removed from the in-memory list even when the database delete fails.
    pub async fn delete(&mut self, task: &Task) -> Result<(), StoreError> {
        let result = self.delete_inner(task.id).await;
        self.record(result)
    }

    async fn delete_inner(&mut self, id: Uuid) -> Result<(), StoreError> {
        let current = match self.current(id).await {
            Ok(task) => task,
            Err(StoreError::NotFound(_)) => {
                tracing::debug!(task_id = %id, "delete of missing task ignored");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        self.reminders
            .cancel(current.notification_id.as_deref())
            .await;
        if let Some(event_id) = current.calendar_event_id.as_deref() {
            self.remove_calendar_event(event_id).await;
        }

        self.tasks.retain(|t| t.id != id);
        self.dirty.remove(&id);
        self.notify();

        let deleted = match &self.db {
            Some(db) => db.delete_task(id).await,
            None => return Err(StoreError::NotLoaded),
        };
        deleted?;
        tracing::debug!(task_id = %id, "task deleted");

        self.refresh().await;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Calendar export
    // -----------------------------------------------------------------------

    /// Export a task to the calendar as an event starting at its due date.
    ///
    /// Already-exported tasks are returned unchanged. A calendar failure
    /// leaves the task untouched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Calendar` when access is denied or the backend
    /// fails, otherwise the lookup/database error.
    pub async fn add_to_calendar(&mut self, id: Uuid) -> Result<Task, StoreError> {
        let result = self.add_to_calendar_inner(id).await;
        self.record(result)
    }

    async fn add_to_calendar_inner(&mut self, id: Uuid) -> Result<Task, StoreError> {
        let mut task = self.current(id).await?;
        if task.is_in_calendar && task.calendar_event_id.is_some() {
            return Ok(task);
        }
        if !self.calendar.request_access().await {
            return Err(CalendarError::AccessDenied.into());
        }

        let end = task.due_date + self.settings.event_duration;
        let event_id = self
            .calendar
            .add_event(&task.title, task.due_date, end, task.description.as_deref())
            .await?;
        tracing::debug!(task_id = %id, event_id = %event_id, "task exported to calendar");

        task.is_in_calendar = true;
        task.calendar_event_id = Some(event_id);
        task.updated_at = Utc::now();
        self.persist_in_memory(task.clone()).await?;
        Ok(task)
    }

    /// Remove a task's calendar event and clear its calendar flag.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Calendar` if the backend refuses, otherwise the
    /// lookup/database error.
    pub async fn remove_from_calendar(&mut self, id: Uuid) -> Result<Task, StoreError> {
        let result = self.remove_from_calendar_inner(id).await;
        self.record(result)
    }

    async fn remove_from_calendar_inner(&mut self, id: Uuid) -> Result<Task, StoreError> {
        let mut task = self.current(id).await?;
        if let Some(event_id) = task.calendar_event_id.as_deref() {
            let removed = self.calendar.remove_event(event_id).await?;
            if !removed {
                tracing::debug!(task_id = %id, event_id, "calendar event was already gone");
            }
        }
        task.is_in_calendar = false;
        task.calendar_event_id = None;
        task.updated_at = Utc::now();
        self.persist_in_memory(task.clone()).await?;
        Ok(task)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Latest known version of a task: in-memory first, then the database.
    async fn current(&self, id: Uuid) -> Result<Task, StoreError> {
        if let Some(task) = self.get(id) {
            return Ok(task.clone());
        }
        let db = self.db.as_ref().ok_or(StoreError::NotLoaded)?;
        match db.get_task(id).await {
            Ok(task) => Ok(task),
            Err(DatabaseError::NoResult) => Err(StoreError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Install `task` in the in-memory list, then write it through.
    ///
    /// The task stays marked dirty if the write fails.
    async fn persist_in_memory(&mut self, task: Task) -> Result<(), StoreError> {
        let id = task.id;
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(slot) => *slot = task,
            None => self.tasks.push(task),
        }
        self.dirty.insert(id);
        self.notify();

        let written = match (&self.db, self.tasks.iter().find(|t| t.id == id)) {
            (Some(db), Some(task)) => db.update_task(task).await,
            (None, _) => return Err(StoreError::NotLoaded),
            (Some(_), None) => return Err(StoreError::NotFound(id)),
        };
        written?;
        self.dirty.remove(&id);
        Ok(())
    }

    async fn schedule_reminder(&self, task: &Task) -> Option<String> {
        if !self.settings.notifications_enabled {
            return None;
        }
        if !task.reminder.is_set() {
            return None;
        }
        let Some(at) = task.reminder_at() else {
            tracing::warn!(
                task_id = %task.id,
                reminder = %task.reminder,
                "reminder time out of range; not scheduled"
            );
            return None;
        };
        let body = format!("Due {}", task.due_date.format("%Y-%m-%d %H:%M UTC"));
        Some(self.reminders.schedule(&task.title, &body, at).await)
    }

    async fn remove_calendar_event(&self, event_id: &str) {
        match self.calendar.remove_event(event_id).await {
            Ok(_) => tracing::debug!(event_id, "calendar event removed"),
            Err(e) => tracing::warn!(event_id, "failed to remove calendar event: {e}"),
        }
    }

    /// Re-fetch every task and rewrite the widget snapshot. Returns whether
    /// the fetch succeeded.
    async fn refresh(&mut self) -> bool {
        let fetched = self.fetch(&TaskQuery::all()).await.is_ok();
        self.write_snapshot().await;
        fetched
    }

    /// Rewrite the widget snapshot from every stored task, not just the ones
    /// the last (possibly filtered) fetch returned. Unsaved edits win over
    /// stored rows.
    async fn write_snapshot(&self) {
        if !self.snapshot.is_enabled() {
            return;
        }
        let stored = match &self.db {
            Some(db) => db.query_tasks(&TaskQuery::all()).await,
            None => Ok(self.tasks.clone()),
        };
        let mut upcoming = stored.unwrap_or_else(|e| {
            tracing::warn!("snapshot falls back to in-memory tasks: {e}");
            self.tasks.clone()
        });
        self.overlay_dirty(&mut upcoming);
        upcoming.sort_by_key(|t| t.due_date);
        self.snapshot.write(&upcoming);
    }

    /// Replace fetched rows with their in-memory version when unsaved edits
    /// exist.
    fn overlay_dirty(&self, tasks: &mut [Task]) {
        for task in tasks.iter_mut().filter(|t| self.dirty.contains(&t.id)) {
            if let Some(local) = self.get(task.id) {
                *task = local.clone();
            }
        }
    }

    fn notify(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    fn record<T>(&mut self, result: Result<T, StoreError>) -> Result<T, StoreError> {
        if let Err(e) = &result {
            tracing::warn!("task store operation failed: {e}");
            self.last_error = Some(e.to_string());
        }
        result
    }
}
