use std::collections::HashSet;

use chrono::{TimeDelta, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use st_core::{CalendarError, Reminder, TaskCategory, TaskFilter};
use st_widget::{SnapshotReader, SnapshotWriter};
use uuid::Uuid;

use crate::test_support::{
    RecordingCalendar, RecordingReminders, break_tasks_table, loaded_store, loaded_store_with,
    temp_snapshot,
};
use crate::{
    DbLocation, LoadState, NewTask, StoreError, StoreSettings, TaskQuery, TaskStore,
    TaskUpdateBuilder,
};

// ---------------------------------------------------------------------------
// load
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_opens_empty_store() {
    let store = loaded_store().await;
    assert_eq!(store.load_state(), LoadState::Loaded);
    assert!(store.tasks().is_empty());
    assert_eq!(store.last_error(), None);
}

#[tokio::test]
async fn load_failure_marks_store_failed() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut store = TaskStore::new(
        DbLocation::File(blocker.join("tasks.db")),
        RecordingReminders::default(),
        RecordingCalendar::default(),
        SnapshotWriter::disabled(),
        StoreSettings::default(),
    );
    let state = store.load().await;

    assert_eq!(state, LoadState::Failed);
    assert!(!store.is_loaded());
    assert!(store.tasks().is_empty());
    assert!(store.last_error().is_some());

    store.clear_error();
    assert_eq!(store.last_error(), None);
}

#[tokio::test]
async fn load_reads_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let location = DbLocation::File(dir.path().join("tasks.db"));

    let mut first = TaskStore::new(
        location.clone(),
        RecordingReminders::default(),
        RecordingCalendar::default(),
        SnapshotWriter::disabled(),
        StoreSettings::default(),
    );
    first.load().await;
    let created = first.create(NewTask::new("Persisted")).await.unwrap();
    drop(first);

    let mut second = TaskStore::new(
        location,
        RecordingReminders::default(),
        RecordingCalendar::default(),
        SnapshotWriter::disabled(),
        StoreSettings::default(),
    );
    second.load().await;
    assert_eq!(second.tasks(), &[created]);
}

#[tokio::test]
async fn operations_before_load_fail() {
    let mut store = TaskStore::new(
        DbLocation::InMemory,
        RecordingReminders::default(),
        RecordingCalendar::default(),
        SnapshotWriter::disabled(),
        StoreSettings::default(),
    );
    assert_eq!(store.load_state(), LoadState::Unloaded);

    let err = store.create(NewTask::new("Too early")).await.unwrap_err();
    assert!(matches!(err, StoreError::NotLoaded));
    assert!(store.reminders().scheduled().is_empty());
    assert!(store.last_error().is_some());
}

// ---------------------------------------------------------------------------
// create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_ids_are_unique() {
    let mut store = loaded_store().await;
    let mut ids = HashSet::new();
    for i in 0..20 {
        let task = store.create(NewTask::new(format!("Task {i}"))).await.unwrap();
        ids.insert(task.id);
    }
    assert_eq!(ids.len(), 20);
    assert_eq!(store.tasks().len(), 20);
}

#[tokio::test]
async fn create_schedules_one_reminder_before_due() {
    let mut store = loaded_store().await;
    let now = Utc::now();
    let due = now + TimeDelta::seconds(3600);

    let task = store
        .create(
            NewTask::new("Test")
                .description("Reminder")
                .due(due)
                .category(TaskCategory::Work)
                .reminder(Reminder::from_offset_secs(-1800)),
        )
        .await
        .unwrap();

    let scheduled = store.reminders().scheduled();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].title, "Test");
    assert_eq!(scheduled[0].at, now + TimeDelta::seconds(1800));
    assert!(scheduled[0].body.starts_with("Due "));
    assert_eq!(task.notification_id.as_deref(), Some(scheduled[0].id.as_str()));
    assert!(!task.is_in_calendar);
    assert_eq!(store.get(task.id), Some(&task));
}

#[rstest]
#[case::at_due_time(Reminder::AtDueTime, 0)]
#[case::five_minutes(Reminder::FIVE_MINUTES_BEFORE, -300)]
#[case::one_hour(Reminder::ONE_HOUR_BEFORE, -3600)]
#[case::one_day(Reminder::ONE_DAY_BEFORE, -86_400)]
#[tokio::test]
async fn reminder_fires_at_offset_from_due(#[case] reminder: Reminder, #[case] offset: i64) {
    let mut store = loaded_store().await;
    let due = Utc::now() + TimeDelta::days(3);

    store
        .create(NewTask::new("Preset").due(due).reminder(reminder))
        .await
        .unwrap();

    let scheduled = store.reminders().scheduled();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].at, due + TimeDelta::seconds(offset));
}

#[tokio::test]
async fn create_without_reminder_schedules_nothing() {
    let mut store = loaded_store().await;
    let task = store.create(NewTask::new("Quiet")).await.unwrap();

    assert!(store.reminders().scheduled().is_empty());
    assert_eq!(task.notification_id, None);
}

#[tokio::test]
async fn notifications_disabled_skips_scheduling() {
    let mut store = loaded_store().await;
    store.set_notifications_enabled(false);

    let task = store
        .create(NewTask::new("Muted").reminder(Reminder::THIRTY_MINUTES_BEFORE))
        .await
        .unwrap();

    assert!(store.reminders().scheduled().is_empty());
    assert_eq!(task.notification_id, None);
    assert_eq!(task.reminder, Reminder::THIRTY_MINUTES_BEFORE);
}

#[tokio::test]
async fn out_of_range_reminder_is_skipped() {
    let mut store = loaded_store().await;
    let far: Reminder = "99999999999d".parse().unwrap();

    let task = store.create(NewTask::new("Far").reminder(far)).await.unwrap();

    assert!(store.reminders().scheduled().is_empty());
    assert_eq!(task.notification_id, None);
    assert_eq!(task.reminder, far);
    assert!(store.get(task.id).is_some());
}

#[tokio::test]
async fn create_failure_leaves_no_partial_task() {
    let mut store = loaded_store().await;
    break_tasks_table(&store).await;

    let err = store
        .create(NewTask::new("Doomed").reminder(Reminder::AtDueTime))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Database(_)));
    assert!(store.tasks().is_empty());
    assert!(store.last_error().is_some());

    // The reminder scheduled for the failed task is cancelled again.
    let scheduled = store.reminders().scheduled();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(store.reminders().cancelled(), vec![scheduled[0].id.clone()]);
}

// ---------------------------------------------------------------------------
// fetch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_search_is_case_insensitive() {
    let mut store = loaded_store().await;
    for title in ["Buy ABC milk", "abcdef", "Call mom"] {
        store.create(NewTask::new(title)).await.unwrap();
    }

    store.fetch(&TaskQuery::search("abc")).await.unwrap();
    let mut titles: Vec<_> = store.tasks().iter().map(|t| t.title.as_str()).collect();
    titles.sort_unstable();
    assert_eq!(titles, vec!["Buy ABC milk", "abcdef"]);
}

#[tokio::test]
async fn unfiltered_fetch_returns_every_category() {
    let mut store = loaded_store().await;
    for category in TaskCategory::ALL {
        store
            .create(NewTask::new(category.label()).category(category))
            .await
            .unwrap();
    }

    store.fetch(&TaskQuery::all()).await.unwrap();
    let categories: HashSet<_> = store.tasks().iter().map(|t| t.category).collect();
    assert_eq!(categories.len(), TaskCategory::ALL.len());
}

#[tokio::test]
async fn fetch_orders_by_due_date() {
    let mut store = loaded_store().await;
    let now = Utc::now();
    for hours in [5, 1, 3] {
        store
            .create(NewTask::new(format!("in {hours}h")).due(now + TimeDelta::hours(hours)))
            .await
            .unwrap();
    }

    let titles: Vec<_> = store.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["in 1h", "in 3h", "in 5h"]);
}

#[tokio::test]
async fn fetch_filters_on_done_flag() {
    let mut store = loaded_store().await;
    let finished = store.create(NewTask::new("Finished")).await.unwrap();
    store.create(NewTask::new("Open")).await.unwrap();
    store.set_done(finished.id, true).await.unwrap();

    store.fetch(&TaskQuery::all().done(true)).await.unwrap();
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].id, finished.id);

    store.fetch(&TaskQuery::all().done(false)).await.unwrap();
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].title, "Open");
}

#[tokio::test]
async fn fetch_failure_keeps_previous_list() {
    let mut store = loaded_store().await;
    store.create(NewTask::new("One")).await.unwrap();
    store.create(NewTask::new("Two")).await.unwrap();
    break_tasks_table(&store).await;

    let result = store.fetch(&TaskQuery::all()).await;

    assert!(result.is_err());
    assert_eq!(store.tasks().len(), 2);
    assert!(store.last_error().is_some());
}

#[tokio::test]
async fn all_fields_survive_persist_and_fetch() {
    let mut store = loaded_store().await;
    let task = store
        .create(
            NewTask::new("Quarterly review")
                .description("Prepare slides")
                .due(Utc::now() + TimeDelta::days(7))
                .category(TaskCategory::Important)
                .reminder(Reminder::ONE_HOUR_BEFORE),
        )
        .await
        .unwrap();
    let task = store.add_to_calendar(task.id).await.unwrap();
    assert!(task.notification_id.is_some());
    assert!(task.calendar_event_id.is_some());

    store.fetch(&TaskQuery::all()).await.unwrap();
    assert_eq!(store.get(task.id), Some(&task));

    let stored = store.db().unwrap().get_task(task.id).await.unwrap();
    assert_eq!(stored, task);
}

// ---------------------------------------------------------------------------
// update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_to_off_cancels_and_clears() {
    let mut store = loaded_store().await;
    let task = store
        .create(NewTask::new("Dentist").reminder(Reminder::from_offset_secs(-1800)))
        .await
        .unwrap();
    let first_id = task.notification_id.clone().unwrap();

    let updated = store
        .update(task.id, TaskUpdateBuilder::new().reminder(Reminder::Off).build())
        .await
        .unwrap();

    assert_eq!(store.reminders().cancelled(), vec![first_id]);
    assert_eq!(store.reminders().scheduled().len(), 1);
    assert_eq!(updated.notification_id, None);
    assert_eq!(updated.reminder, Reminder::Off);
    assert_eq!(store.get(task.id).unwrap().notification_id, None);
}

#[tokio::test]
async fn update_reschedules_for_new_due_date() {
    let mut store = loaded_store().await;
    let due = Utc::now() + TimeDelta::hours(2);
    let task = store
        .create(
            NewTask::new("Standup")
                .due(due)
                .reminder(Reminder::FIVE_MINUTES_BEFORE),
        )
        .await
        .unwrap();

    let new_due = due + TimeDelta::days(1);
    let updated = store
        .update(task.id, TaskUpdateBuilder::new().due_date(new_due).build())
        .await
        .unwrap();

    let scheduled = store.reminders().scheduled();
    assert_eq!(scheduled.len(), 2);
    assert_eq!(scheduled[1].at, new_due - TimeDelta::minutes(5));
    assert_eq!(store.reminders().cancelled(), vec![scheduled[0].id.clone()]);
    assert_eq!(updated.notification_id.as_deref(), Some(scheduled[1].id.as_str()));
}

#[tokio::test]
async fn update_applies_fields_and_persists() {
    let mut store = loaded_store().await;
    let task = store
        .create(NewTask::new("Draft").description("old"))
        .await
        .unwrap();

    store
        .update(
            task.id,
            TaskUpdateBuilder::new()
                .title("Final")
                .description(None)
                .category(TaskCategory::Work)
                .build(),
        )
        .await
        .unwrap();

    let stored = store.db().unwrap().get_task(task.id).await.unwrap();
    assert_eq!(stored.title, "Final");
    assert_eq!(stored.description, None);
    assert_eq!(stored.category, TaskCategory::Work);
    assert!(stored.updated_at >= task.updated_at);
}

#[tokio::test]
async fn update_unknown_task_is_not_found() {
    let mut store = loaded_store().await;
    let missing = Uuid::new_v4();

    let err = store
        .update(missing, TaskUpdateBuilder::new().title("x").build())
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::NotFound(id) if id == missing));
    assert!(store.reminders().cancelled().is_empty());
}

#[tokio::test]
async fn update_failure_keeps_in_memory_change() {
    let mut store = loaded_store().await;
    let task = store.create(NewTask::new("Before")).await.unwrap();
    break_tasks_table(&store).await;

    let result = store
        .update(task.id, TaskUpdateBuilder::new().title("After").build())
        .await;

    assert!(result.is_err());
    assert!(store.last_error().is_some());
    assert_eq!(store.get(task.id).unwrap().title, "After");
    assert!(store.has_changes());
}

#[tokio::test]
async fn clearing_calendar_flag_removes_event() {
    let mut store = loaded_store().await;
    let task = store.create(NewTask::new("Meeting")).await.unwrap();
    store.add_to_calendar(task.id).await.unwrap();

    let updated = store
        .update(task.id, TaskUpdateBuilder::new().is_in_calendar(false).build())
        .await
        .unwrap();

    assert!(!updated.is_in_calendar);
    assert_eq!(updated.calendar_event_id, None);
    assert_eq!(store.calendar().removed(), vec!["evt-1".to_owned()]);
}

// ---------------------------------------------------------------------------
// delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_cancels_reminder_exactly_once() {
    let mut store = loaded_store().await;
    let task = store
        .create(
            NewTask::new("Test")
                .due(Utc::now() + TimeDelta::hours(1))
                .reminder(Reminder::THIRTY_MINUTES_BEFORE),
        )
        .await
        .unwrap();
    let notification = task.notification_id.clone().unwrap();

    store.delete(&task).await.unwrap();

    assert_eq!(store.reminders().cancelled(), vec![notification]);
    store.fetch(&TaskQuery::all()).await.unwrap();
    assert!(store.get(task.id).is_none());
}

#[tokio::test]
async fn delete_is_idempotent() {
    let mut store = loaded_store().await;
    let task = store
        .create(NewTask::new("Once").reminder(Reminder::AtDueTime))
        .await
        .unwrap();

    store.delete(&task).await.unwrap();
    store.delete(&task).await.unwrap();

    assert_eq!(store.reminders().cancelled().len(), 1);
    assert_eq!(store.last_error(), None);
    assert_eq!(store.db().unwrap().count_tasks().await.unwrap(), 0);
}

#[tokio::test]
async fn delete_removes_calendar_event() {
    let mut store = loaded_store().await;
    let task = store.create(NewTask::new("Exported")).await.unwrap();
    let task = store.add_to_calendar(task.id).await.unwrap();

    store.delete(&task).await.unwrap();

    assert_eq!(store.calendar().removed(), vec!["evt-1".to_owned()]);
}

#[tokio::test]
async fn delete_succeeds_when_calendar_fails() {
    let mut store =
        loaded_store_with(RecordingCalendar::failing(), SnapshotWriter::disabled()).await;
    let mut task = store.create(NewTask::new("Stuck event")).await.unwrap();
    store
        .edit(task.id, |t| {
            t.is_in_calendar = true;
            t.calendar_event_id = Some("evt-9".into());
        })
        .unwrap();
    store.save().await.unwrap();
    task = store.get(task.id).unwrap().clone();

    store.delete(&task).await.unwrap();
    assert!(store.tasks().is_empty());
}

// ---------------------------------------------------------------------------
// edit / save
// ---------------------------------------------------------------------------

#[tokio::test]
async fn edit_then_save_flushes_dirty_tasks() {
    let mut store = loaded_store().await;
    let task = store.create(NewTask::new("Original")).await.unwrap();
    assert!(!store.has_changes());
    assert_eq!(store.save().await.unwrap(), 0);

    store.edit(task.id, |t| t.title = "Renamed".into()).unwrap();
    assert!(store.has_changes());

    // A fetch before saving keeps the unsaved edit.
    store.fetch(&TaskQuery::all()).await.unwrap();
    assert_eq!(store.get(task.id).unwrap().title, "Renamed");

    assert_eq!(store.save().await.unwrap(), 1);
    assert!(!store.has_changes());
    let stored = store.db().unwrap().get_task(task.id).await.unwrap();
    assert_eq!(stored.title, "Renamed");
}

#[tokio::test]
async fn edit_unknown_task_is_not_found() {
    let mut store = loaded_store().await;
    let err = store.edit(Uuid::new_v4(), |_| {}).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn save_failure_keeps_edits() {
    let mut store = loaded_store().await;
    let task = store.create(NewTask::new("Keep me")).await.unwrap();
    store.edit(task.id, |t| t.is_done = true).unwrap();
    break_tasks_table(&store).await;

    assert!(store.save().await.is_err());
    assert!(store.has_changes());
    assert!(store.get(task.id).unwrap().is_done);
    assert!(store.last_error().is_some());
}

// ---------------------------------------------------------------------------
// calendar
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_to_calendar_spans_event_duration() {
    let mut store = loaded_store().await;
    let due = Utc::now() + TimeDelta::days(1);
    let task = store.create(NewTask::new("Lunch").due(due)).await.unwrap();

    let exported = store.add_to_calendar(task.id).await.unwrap();

    assert!(exported.is_in_calendar);
    assert_eq!(exported.calendar_event_id.as_deref(), Some("evt-1"));
    assert_eq!(
        store.calendar().added(),
        vec![("Lunch".to_owned(), due, due + TimeDelta::hours(1))]
    );

    // Exporting again is a no-op.
    store.add_to_calendar(task.id).await.unwrap();
    assert_eq!(store.calendar().added().len(), 1);
}

#[tokio::test]
async fn remove_from_calendar_clears_flags() {
    let mut store = loaded_store().await;
    let task = store.create(NewTask::new("Gym")).await.unwrap();
    store.add_to_calendar(task.id).await.unwrap();

    let removed = store.remove_from_calendar(task.id).await.unwrap();

    assert!(!removed.is_in_calendar);
    assert_eq!(removed.calendar_event_id, None);
    assert_eq!(store.calendar().removed(), vec!["evt-1".to_owned()]);
    let stored = store.db().unwrap().get_task(task.id).await.unwrap();
    assert!(!stored.is_in_calendar);
}

#[tokio::test]
async fn calendar_denied_leaves_task_untouched() {
    let mut store =
        loaded_store_with(RecordingCalendar::denied(), SnapshotWriter::disabled()).await;
    let task = store.create(NewTask::new("Private")).await.unwrap();

    let err = store.add_to_calendar(task.id).await.unwrap_err();

    assert!(matches!(err, StoreError::Calendar(CalendarError::AccessDenied)));
    assert_eq!(store.get(task.id), Some(&task));
    assert!(store.last_error().is_some());
}

#[tokio::test]
async fn calendar_failure_leaves_task_untouched() {
    let mut store =
        loaded_store_with(RecordingCalendar::failing(), SnapshotWriter::disabled()).await;
    let task = store.create(NewTask::new("Offline")).await.unwrap();

    let err = store.add_to_calendar(task.id).await.unwrap_err();

    assert!(matches!(err, StoreError::Calendar(CalendarError::Backend(_))));
    assert!(!store.get(task.id).unwrap().is_in_calendar);
}

// ---------------------------------------------------------------------------
// snapshot, notifications, filters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn snapshot_holds_next_five_by_due_date() {
    let (_dir, path, writer) = temp_snapshot();
    let mut store = loaded_store_with(RecordingCalendar::default(), writer).await;
    let now = Utc::now();
    let before_write = Utc::now();

    for hours in [7, 2, 6, 1, 5, 3, 4] {
        store
            .create(NewTask::new(format!("in {hours}h")).due(now + TimeDelta::hours(hours)))
            .await
            .unwrap();
    }

    let snapshot = SnapshotReader::new(path).read().unwrap();
    let titles: Vec<_> = snapshot.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["in 1h", "in 2h", "in 3h", "in 4h", "in 5h"]);
    assert!(snapshot.date >= before_write);
}

#[tokio::test]
async fn snapshot_follows_delete() {
    let (_dir, path, writer) = temp_snapshot();
    let mut store = loaded_store_with(RecordingCalendar::default(), writer).await;
    let task = store.create(NewTask::new("Gone soon")).await.unwrap();
    store.create(NewTask::new("Stays")).await.unwrap();

    store.delete(&task).await.unwrap();

    let snapshot = SnapshotReader::new(path).read().unwrap();
    assert_eq!(snapshot.tasks.len(), 1);
    assert_eq!(snapshot.tasks[0].title, "Stays");
}

#[tokio::test]
async fn save_after_filtered_fetch_keeps_full_snapshot() {
    let (_dir, path, writer) = temp_snapshot();
    let mut store = loaded_store_with(RecordingCalendar::default(), writer).await;
    let now = Utc::now();
    store
        .create(NewTask::new("soon").due(now + TimeDelta::hours(1)))
        .await
        .unwrap();
    let later = store
        .create(NewTask::new("later").due(now + TimeDelta::hours(2)))
        .await
        .unwrap();

    store.fetch(&TaskQuery::search("later")).await.unwrap();
    assert_eq!(store.tasks().len(), 1);
    store.edit(later.id, |t| t.title = "later edited".into()).unwrap();
    assert_eq!(store.save().await.unwrap(), 1);

    let snapshot = SnapshotReader::new(path).read().unwrap();
    let titles: Vec<_> = snapshot.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["soon", "later edited"]);
}

#[tokio::test]
async fn mutations_bump_revision() {
    let mut store = loaded_store().await;
    let mut rx = store.subscribe();
    let start = *rx.borrow_and_update();

    let task = store.create(NewTask::new("Watched")).await.unwrap();
    let after_create = *rx.borrow_and_update();
    assert!(after_create > start);

    store.delete(&task).await.unwrap();
    assert!(*rx.borrow_and_update() > after_create);
}

#[tokio::test]
async fn visible_applies_day_filters() {
    let mut store = loaded_store().await;
    let now = Utc::now();
    let today = store.create(NewTask::new("Today").due(now)).await.unwrap();
    let past = store
        .create(NewTask::new("Last week").due(now - TimeDelta::days(7)))
        .await
        .unwrap();

    let ids = |filter: TaskFilter| -> Vec<Uuid> { store.visible(filter, now).iter().map(|t| t.id).collect() };
    assert_eq!(ids(TaskFilter::Today), vec![today.id]);
    assert_eq!(ids(TaskFilter::Past), vec![past.id]);
    assert_eq!(ids(TaskFilter::All).len(), 2);
}
