//! Day materialization and drag commits.
//!
//! Turns the flat task list into what one day column actually shows:
//! timed items for the grid, untimed items for the sidebar, with any
//! in-flight drag overlay merged on top of the committed model. Commits
//! write the dragged position back through the store; on failure the
//! overlay entry is dropped so the grid falls back to the last committed
//! position instead of showing a phantom.

use chrono::{NaiveDate, NaiveTime};
use log::{debug, error};

use crate::grid::{DragCommit, Overlay};
use crate::models::task::{Frequency, Task};
use crate::services::store::{DataStore, StoreResult};
use crate::utils::time::{format_date, format_time};

/// One task placed on the grid for a specific day.
#[derive(Clone, Debug, PartialEq)]
pub struct GridItem {
    pub task: Task,
    pub time: NaiveTime,
    pub duration_min: i64,
    /// True while this position comes from an uncommitted drag.
    pub preview: bool,
}

/// Everything one day column renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DaySchedule {
    pub timed: Vec<GridItem>,
    pub untimed: Vec<Task>,
}

/// Materialize the schedule for one day.
///
/// A task appears when it is active, its frequency lands on `date`, and
/// it has not been completed that day. Tasks with a parseable scheduled
/// time become grid items; the rest go to the untimed list. Overlay
/// entries targeting this day override time and duration.
pub fn day_schedule(store: &dyn DataStore, overlay: &Overlay, date: NaiveDate) -> DaySchedule {
    let completed: Vec<i64> = store
        .completions_on(date)
        .iter()
        .map(|c| c.task_id)
        .collect();

    let mut schedule = DaySchedule::default();
    for task in store.list_tasks() {
        if !task.is_active || !task.occurs_on(date) {
            continue;
        }
        if task.id.is_some_and(|id| completed.contains(&id)) {
            continue;
        }

        let override_entry = task
            .id
            .and_then(|id| overlay.get(id))
            .filter(|entry| entry.day == date);

        if let Some(entry) = override_entry {
            schedule.timed.push(GridItem {
                time: entry.time,
                duration_min: entry.duration_min,
                preview: true,
                task,
            });
        } else if let Some(time) = task.parsed_time() {
            schedule.timed.push(GridItem {
                time,
                duration_min: task.effective_duration(),
                preview: false,
                task,
            });
        } else {
            schedule.untimed.push(task);
        }
    }

    schedule.timed.sort_by_key(|item| item.time);
    schedule
}

/// Materialize seven consecutive days starting at `week_start`.
pub fn week_schedule(
    store: &dyn DataStore,
    overlay: &Overlay,
    week_start: NaiveDate,
) -> Vec<(NaiveDate, DaySchedule)> {
    (0..7)
        .filter_map(|offset| week_start.checked_add_days(chrono::Days::new(offset)))
        .map(|date| (date, day_schedule(store, overlay, date)))
        .collect()
}

/// Write a finished drag back to the store and retire its overlay entry.
///
/// The overlay entry is removed on both paths. On success the store now
/// holds the new position, so the override is redundant; on failure the
/// grid must revert to the committed position rather than keep showing a
/// location the backend never accepted.
pub fn commit_drag(
    store: &mut dyn DataStore,
    overlay: &mut Overlay,
    commit: &DragCommit,
) -> StoreResult<Task> {
    let result = apply_commit(store, commit);
    overlay.remove(commit.task_id);
    if let Err(err) = &result {
        error!("drag commit for task {} failed: {err}", commit.task_id);
    }
    result
}

fn apply_commit(store: &mut dyn DataStore, commit: &DragCommit) -> StoreResult<Task> {
    let mut task = store.get_task(commit.task_id)?;
    task.scheduled_time = Some(format_time(commit.time));
    task.duration_minutes = Some(commit.duration_minutes);
    // Recurring tasks derive their day from frequency; only one-off tasks
    // carry an explicit date that a cross-day drag can change.
    if task.frequency == Frequency::Once {
        task.scheduled_date = Some(format_date(commit.date));
    }
    debug!(
        "committing task {} at {} for {} min",
        commit.task_id,
        format_time(commit.time),
        commit.duration_minutes
    );
    store.update_task(&task)
}
