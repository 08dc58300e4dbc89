//! Completion toggling with streak bookkeeping.
//!
//! Checking a task off creates a completion row and bumps the task's
//! streak counters; unchecking deletes the row and reverses the delta.
//! Both writes happen in one call, with a compensating undo if the
//! second write fails, so the row and the counters never disagree.

use chrono::{NaiveDate, NaiveTime};
use log::{error, info};

use crate::models::completion::TaskCompletion;
use crate::models::task::Task;
use crate::services::store::{DataStore, StoreResult};

/// What a toggle actually did.
#[derive(Clone, Debug, PartialEq)]
pub enum ToggleOutcome {
    Completed(TaskCompletion),
    Uncompleted,
}

/// Whether the task already has a completion row for `date`.
pub fn is_completed(store: &dyn DataStore, task_id: i64, date: NaiveDate) -> bool {
    store
        .completions_on(date)
        .iter()
        .any(|c| c.matches(task_id, date))
}

/// Flip the completion state of a task for one day.
///
/// Completing writes the row first, then the counter delta; unchecking
/// removes the row first, then reverts the delta. Either way, a failed
/// counter write undoes the row change before the error propagates.
pub fn toggle(
    store: &mut dyn DataStore,
    task_id: i64,
    date: NaiveDate,
    now: NaiveTime,
) -> StoreResult<ToggleOutcome> {
    let mut task = store.get_task(task_id)?;

    let existing = store
        .completions_on(date)
        .into_iter()
        .find(|c| c.matches(task_id, date));

    match existing {
        None => complete(store, &mut task, date, now).map(ToggleOutcome::Completed),
        Some(row) => {
            uncomplete(store, &mut task, row, date, now)?;
            Ok(ToggleOutcome::Uncompleted)
        }
    }
}

fn complete(
    store: &mut dyn DataStore,
    task: &mut Task,
    date: NaiveDate,
    now: NaiveTime,
) -> StoreResult<TaskCompletion> {
    let row = store.create_completion(TaskCompletion::new(
        task.id.unwrap_or_default(),
        &task.name,
        date,
        now,
    ))?;

    task.record_completion();
    if let Err(err) = store.update_task(task) {
        error!("streak update for '{}' failed, undoing completion: {err}", task.name);
        if let Some(id) = row.id {
            // Compensate; a failure here leaves an orphan row that the
            // next toggle will reuse, which beats a silent double count.
            if let Err(undo_err) = store.delete_completion(id) {
                error!("could not undo completion {id}: {undo_err}");
            }
        }
        return Err(err);
    }

    info!("'{}' completed, streak {}", task.name, task.streak);
    Ok(row)
}

fn uncomplete(
    store: &mut dyn DataStore,
    task: &mut Task,
    row: TaskCompletion,
    date: NaiveDate,
    now: NaiveTime,
) -> StoreResult<()> {
    if let Some(id) = row.id {
        store.delete_completion(id)?;
    }

    task.revert_completion();
    if let Err(err) = store.update_task(task) {
        error!("streak revert for '{}' failed, restoring completion: {err}", task.name);
        let restored = TaskCompletion::new(task.id.unwrap_or_default(), &task.name, date, now);
        if let Err(undo_err) = store.create_completion(restored) {
            error!("could not restore completion for task {:?}: {undo_err}", task.id);
        }
        return Err(err);
    }

    info!("'{}' unchecked, streak {}", task.name, task.streak);
    Ok(())
}
