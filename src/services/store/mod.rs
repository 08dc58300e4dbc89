//! Entity store seam.
//!
//! Persistence lives in an external backend-as-a-service; this crate only
//! sees create/update/delete/list plus change subscriptions. [`DataStore`]
//! is that boundary, and [`MemoryStore`] is the in-process stand-in used
//! by the app and the tests. Change events fan out to subscribers so the
//! grid can invalidate its cached day when another surface edits a task.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::completion::TaskCompletion;
use crate::models::sleep::SleepEntry;
use crate::models::task::Task;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("invalid entity: {0}")]
    Invalid(String),
    #[error("backend rejected write: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Task,
    Completion,
    Sleep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeOp {
    Created,
    Updated,
    Deleted,
}

/// Push invalidation delivered to subscribers after every successful write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    pub entity: EntityKind,
    pub op: ChangeOp,
    pub id: i64,
}

pub type ChangeListener = Box<dyn Fn(ChangeEvent)>;

/// The external store boundary: entity CRUD plus change subscription.
pub trait DataStore {
    fn create_task(&mut self, task: Task) -> StoreResult<Task>;
    fn get_task(&self, id: i64) -> StoreResult<Task>;
    fn update_task(&mut self, task: &Task) -> StoreResult<Task>;
    fn delete_task(&mut self, id: i64) -> StoreResult<()>;
    fn list_tasks(&self) -> Vec<Task>;

    fn create_completion(&mut self, completion: TaskCompletion) -> StoreResult<TaskCompletion>;
    fn delete_completion(&mut self, id: i64) -> StoreResult<()>;
    fn list_completions(&self) -> Vec<TaskCompletion>;
    fn completions_on(&self, date: NaiveDate) -> Vec<TaskCompletion>;

    fn create_sleep_entry(&mut self, entry: SleepEntry) -> StoreResult<SleepEntry>;
    fn delete_sleep_entry(&mut self, id: i64) -> StoreResult<()>;
    fn list_sleep_entries(&self) -> Vec<SleepEntry>;

    fn subscribe(&mut self, listener: ChangeListener);
}

/// In-memory store with monotonically assigned ids.
#[derive(Default)]
pub struct MemoryStore {
    tasks: Vec<Task>,
    completions: Vec<TaskCompletion>,
    sleep_entries: Vec<SleepEntry>,
    next_id: i64,
    listeners: Vec<ChangeListener>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    fn assign_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn notify(&self, entity: EntityKind, op: ChangeOp, id: i64) {
        let event = ChangeEvent { entity, op, id };
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl DataStore for MemoryStore {
    fn create_task(&mut self, mut task: Task) -> StoreResult<Task> {
        task.validate().map_err(StoreError::Invalid)?;
        task.id = Some(self.assign_id());
        self.tasks.push(task.clone());
        self.notify(EntityKind::Task, ChangeOp::Created, task.id.unwrap_or(0));
        Ok(task)
    }

    fn get_task(&self, id: i64) -> StoreResult<Task> {
        self.tasks
            .iter()
            .find(|t| t.id == Some(id))
            .cloned()
            .ok_or(StoreError::NotFound { entity: "task", id })
    }

    fn update_task(&mut self, task: &Task) -> StoreResult<Task> {
        task.validate().map_err(StoreError::Invalid)?;
        let id = task
            .id
            .ok_or_else(|| StoreError::Invalid("task has no id".to_string()))?;
        let slot = self
            .tasks
            .iter_mut()
            .find(|t| t.id == Some(id))
            .ok_or(StoreError::NotFound { entity: "task", id })?;
        *slot = task.clone();
        self.notify(EntityKind::Task, ChangeOp::Updated, id);
        Ok(task.clone())
    }

    fn delete_task(&mut self, id: i64) -> StoreResult<()> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != Some(id));
        if self.tasks.len() == before {
            return Err(StoreError::NotFound { entity: "task", id });
        }
        self.notify(EntityKind::Task, ChangeOp::Deleted, id);
        Ok(())
    }

    fn list_tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    fn create_completion(&mut self, mut completion: TaskCompletion) -> StoreResult<TaskCompletion> {
        let duplicate = self.completions.iter().any(|c| {
            c.task_id == completion.task_id && c.completed_date == completion.completed_date
        });
        if duplicate {
            return Err(StoreError::Invalid(format!(
                "task {} already completed on {}",
                completion.task_id, completion.completed_date
            )));
        }
        completion.id = Some(self.assign_id());
        self.completions.push(completion.clone());
        self.notify(
            EntityKind::Completion,
            ChangeOp::Created,
            completion.id.unwrap_or(0),
        );
        Ok(completion)
    }

    fn delete_completion(&mut self, id: i64) -> StoreResult<()> {
        let before = self.completions.len();
        self.completions.retain(|c| c.id != Some(id));
        if self.completions.len() == before {
            return Err(StoreError::NotFound {
                entity: "completion",
                id,
            });
        }
        self.notify(EntityKind::Completion, ChangeOp::Deleted, id);
        Ok(())
    }

    fn list_completions(&self) -> Vec<TaskCompletion> {
        self.completions.clone()
    }

    fn completions_on(&self, date: NaiveDate) -> Vec<TaskCompletion> {
        let date_str = crate::utils::time::format_date(date);
        self.completions
            .iter()
            .filter(|c| c.completed_date == date_str)
            .cloned()
            .collect()
    }

    fn create_sleep_entry(&mut self, mut entry: SleepEntry) -> StoreResult<SleepEntry> {
        entry.validate().map_err(StoreError::Invalid)?;
        entry.id = Some(self.assign_id());
        self.sleep_entries.push(entry.clone());
        self.notify(EntityKind::Sleep, ChangeOp::Created, entry.id.unwrap_or(0));
        Ok(entry)
    }

    fn delete_sleep_entry(&mut self, id: i64) -> StoreResult<()> {
        let before = self.sleep_entries.len();
        self.sleep_entries.retain(|e| e.id != Some(id));
        if self.sleep_entries.len() == before {
            return Err(StoreError::NotFound { entity: "sleep", id });
        }
        self.notify(EntityKind::Sleep, ChangeOp::Deleted, id);
        Ok(())
    }

    fn list_sleep_entries(&self) -> Vec<SleepEntry> {
        self.sleep_entries.clone()
    }

    fn subscribe(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }
}
