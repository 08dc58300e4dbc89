// Task completion module
// One row per (task, date) marks the task done and pulls it off the grid

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::utils::time::{format_date, format_time};

/// Record that a task was completed on a specific date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCompletion {
    pub id: Option<i64>,
    pub task_id: i64,
    /// Denormalized so history survives task renames/deletes.
    pub task_name: String,
    /// "YYYY-MM-DD"
    pub completed_date: String,
    /// "HH:MM"
    pub completed_at: String,
}

impl TaskCompletion {
    pub fn new(
        task_id: i64,
        task_name: impl Into<String>,
        date: NaiveDate,
        at: NaiveTime,
    ) -> Self {
        Self {
            id: None,
            task_id,
            task_name: task_name.into(),
            completed_date: format_date(date),
            completed_at: format_time(at),
        }
    }

    pub fn matches(&self, task_id: i64, date: NaiveDate) -> bool {
        self.task_id == task_id && self.completed_date == format_date(date)
    }
}
