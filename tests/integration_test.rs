// Integration tests for the schedule, completion and sleep flows
// Exercises the services over the store the way the app drives them

mod fixtures;

use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;

use fixtures::{dates, night, once_task, timed_task, untimed_task};
use habitgrid::grid::{
    DayColumn, DragController, DragKind, GridMetrics, LayoutBox, Overlay,
};
use habitgrid::models::completion::TaskCompletion;
use habitgrid::models::settings::Settings;
use habitgrid::models::sleep::SleepEntry;
use habitgrid::models::task::Task;
use habitgrid::services::completion::{is_completed, toggle, ToggleOutcome};
use habitgrid::services::schedule::{commit_drag, day_schedule};
use habitgrid::services::settings::SettingsService;
use habitgrid::services::sleep;
use habitgrid::services::store::{
    ChangeListener, DataStore, MemoryStore, StoreError, StoreResult,
};

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Store wrapper that rejects task updates, for exercising the failure
/// paths the UI surfaces as toasts.
struct RejectingStore {
    inner: MemoryStore,
    reject_task_updates: bool,
}

impl RejectingStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            reject_task_updates: false,
        }
    }
}

impl DataStore for RejectingStore {
    fn create_task(&mut self, task: Task) -> StoreResult<Task> {
        self.inner.create_task(task)
    }
    fn get_task(&self, id: i64) -> StoreResult<Task> {
        self.inner.get_task(id)
    }
    fn update_task(&mut self, task: &Task) -> StoreResult<Task> {
        if self.reject_task_updates {
            return Err(StoreError::Backend("write rejected".to_string()));
        }
        self.inner.update_task(task)
    }
    fn delete_task(&mut self, id: i64) -> StoreResult<()> {
        self.inner.delete_task(id)
    }
    fn list_tasks(&self) -> Vec<Task> {
        self.inner.list_tasks()
    }
    fn create_completion(&mut self, completion: TaskCompletion) -> StoreResult<TaskCompletion> {
        self.inner.create_completion(completion)
    }
    fn delete_completion(&mut self, id: i64) -> StoreResult<()> {
        self.inner.delete_completion(id)
    }
    fn list_completions(&self) -> Vec<TaskCompletion> {
        self.inner.list_completions()
    }
    fn completions_on(&self, date: NaiveDate) -> Vec<TaskCompletion> {
        self.inner.completions_on(date)
    }
    fn create_sleep_entry(&mut self, entry: SleepEntry) -> StoreResult<SleepEntry> {
        self.inner.create_sleep_entry(entry)
    }
    fn delete_sleep_entry(&mut self, id: i64) -> StoreResult<()> {
        self.inner.delete_sleep_entry(id)
    }
    fn list_sleep_entries(&self) -> Vec<SleepEntry> {
        self.inner.list_sleep_entries()
    }
    fn subscribe(&mut self, listener: ChangeListener) {
        self.inner.subscribe(listener)
    }
}

#[test]
fn test_drag_gesture_commits_through_the_store() {
    let mut store = MemoryStore::new();
    let task = store.create_task(timed_task("Gym", "09:00", 60)).unwrap();
    let id = task.id.unwrap();

    let metrics = GridMetrics::day_view();
    let mut controller = DragController::new(metrics);
    let mut overlay = Overlay::new();
    let columns = vec![DayColumn::new(dates::wednesday(), 0.0, 300.0)];

    // Drag the 09:00 bar down one hour and release.
    let origin = LayoutBox::new(metrics.time_to_top(t(9, 0)), metrics.minutes_to_height(60));
    controller.begin(DragKind::Move, id, origin, 0, 100.0, &columns, &mut overlay);
    controller.update(100.0 + metrics.px_per_hour, 0, &columns, &[], &mut overlay);
    let commit = controller.finish().unwrap();

    let updated = commit_drag(&mut store, &mut overlay, &commit).unwrap();
    assert_eq!(updated.scheduled_time.as_deref(), Some("10:00"));
    assert!(overlay.is_empty());

    // The next materialization renders the committed position.
    let schedule = day_schedule(&store, &overlay, dates::wednesday());
    assert_eq!(schedule.timed.len(), 1);
    assert_eq!(schedule.timed[0].time, t(10, 0));
    assert!(!schedule.timed[0].preview);
}

#[test]
fn test_rejected_commit_reverts_to_committed_position() {
    let mut store = RejectingStore::new();
    let task = store.create_task(timed_task("Gym", "09:00", 60)).unwrap();
    let id = task.id.unwrap();

    let metrics = GridMetrics::day_view();
    let mut controller = DragController::new(metrics);
    let mut overlay = Overlay::new();
    let columns = vec![DayColumn::new(dates::wednesday(), 0.0, 300.0)];

    let origin = LayoutBox::new(metrics.time_to_top(t(9, 0)), metrics.minutes_to_height(60));
    controller.begin(DragKind::Move, id, origin, 0, 100.0, &columns, &mut overlay);
    controller.update(100.0 + metrics.px_per_hour, 0, &columns, &[], &mut overlay);
    let commit = controller.finish().unwrap();

    store.reject_task_updates = true;
    let result = commit_drag(&mut store, &mut overlay, &commit);

    assert!(matches!(result, Err(StoreError::Backend(_))));
    assert!(overlay.is_empty());

    // The committed model is untouched; the grid falls back to 09:00.
    let schedule = day_schedule(&store, &overlay, dates::wednesday());
    assert_eq!(schedule.timed[0].time, t(9, 0));
}

#[test]
fn test_completion_toggle_updates_schedule_and_counters() {
    let mut store = MemoryStore::new();
    let task = store.create_task(timed_task("Read", "21:30", 30)).unwrap();
    let id = task.id.unwrap();
    let date = dates::wednesday();

    let outcome = toggle(&mut store, id, date, t(21, 45)).unwrap();
    assert!(matches!(outcome, ToggleOutcome::Completed(_)));
    assert!(is_completed(&store, id, date));

    // A completed task drops off that day's grid, and only that day's.
    assert!(day_schedule(&store, &Overlay::new(), date).timed.is_empty());
    assert_eq!(
        day_schedule(&store, &Overlay::new(), dates::saturday())
            .timed
            .len(),
        1
    );

    // Toggle back: the schedule and every counter return exactly.
    toggle(&mut store, id, date, t(21, 50)).unwrap();
    let restored = store.get_task(id).unwrap();
    assert_eq!(restored.streak, 0);
    assert_eq!(restored.best_streak, 0);
    assert_eq!(restored.total_completions, 0);
    assert_eq!(day_schedule(&store, &Overlay::new(), date).timed.len(), 1);
}

#[test]
fn test_failed_counter_write_undoes_the_completion_row() {
    let mut store = RejectingStore::new();
    let task = store.create_task(timed_task("Read", "21:30", 30)).unwrap();
    let id = task.id.unwrap();

    store.reject_task_updates = true;
    let result = toggle(&mut store, id, dates::wednesday(), t(22, 0));

    assert!(result.is_err());
    assert!(!is_completed(&store, id, dates::wednesday()));
    assert_eq!(store.get_task(id).unwrap().streak, 0);
}

#[test]
fn test_materialization_rules() {
    let mut store = MemoryStore::new();
    store
        .create_task(once_task("Dentist", dates::wednesday(), "14:00"))
        .unwrap();
    store.create_task(untimed_task("Meditate")).unwrap();

    // A malformed time string routes a task to the untimed list.
    let mut broken = timed_task("Broken", "09:00", 30);
    broken.scheduled_time = Some("9 am".to_string());
    assert!(broken.parsed_time().is_none());
    assert!(broken.occurs_on(dates::wednesday()));

    let schedule = day_schedule(&store, &Overlay::new(), dates::wednesday());
    assert_eq!(schedule.timed.len(), 1);
    assert_eq!(schedule.timed[0].task.name, "Dentist");
    assert_eq!(schedule.untimed.len(), 1);
    assert_eq!(schedule.untimed[0].name, "Meditate");

    // The one-off appears on no other day.
    let saturday = day_schedule(&store, &Overlay::new(), dates::saturday());
    assert!(saturday.timed.is_empty());

    // A once task without a date materializes nowhere.
    let mut undated = once_task("Ghost", dates::wednesday(), "10:00");
    undated.scheduled_date = None;
    assert!(!undated.occurs_on(dates::wednesday()));
}

#[test]
fn test_sleep_week_flow() {
    let mut store = MemoryStore::new();
    for offset in 0..7 {
        let date = dates::monday() + chrono::Days::new(offset);
        sleep::log_night(&mut store, night(date, "23:00", "07:00")).unwrap();
    }

    assert_eq!(sleep::weekly_score(&store, dates::monday()), Some(10.0));

    // Re-logging a night replaces it instead of duplicating.
    sleep::log_night(&mut store, night(dates::monday(), "02:00", "06:00")).unwrap();
    assert_eq!(store.list_sleep_entries().len(), 7);
    let score = sleep::weekly_score(&store, dates::monday()).unwrap();
    assert!(score < 10.0);
}

#[test]
fn test_settings_persistence_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");

    // Simulate first app launch: nothing on disk, defaults apply.
    {
        let service = SettingsService::with_path(path.clone());
        let mut settings = service.load();
        assert_eq!(settings, Settings::default());

        settings.current_view = "Day".to_string();
        settings.show_sleep_panel = false;
        service.save(&settings).unwrap();
    }

    // Second launch picks the changes back up.
    {
        let service = SettingsService::with_path(path);
        let settings = service.load();
        assert_eq!(settings.current_view, "Day");
        assert!(!settings.show_sleep_panel);
        assert_eq!(settings.day_px_per_hour, 64.0);
    }
}
