// Task module
// Habit/event template with a recurrence rule and streak counters

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::time::{parse_date, parse_time};

/// Default scheduling duration when a task carries none.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

/// Life area a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Health,
    Work,
    Learning,
    Personal,
    Social,
    Mindfulness,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Health,
        Category::Work,
        Category::Learning,
        Category::Personal,
        Category::Social,
        Category::Mindfulness,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Health => "Health",
            Category::Work => "Work",
            Category::Learning => "Learning",
            Category::Personal => "Personal",
            Category::Social => "Social",
            Category::Mindfulness => "Mindfulness",
            Category::Other => "Other",
        }
    }
}

/// How often a task materializes on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Frequency {
    Daily,
    Weekdays,
    Weekends,
    /// A single fixed weekday (e.g. every Tuesday).
    Weekly(Weekday),
    /// One-off task pinned to `scheduled_date`.
    Once,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::Daily => "daily",
            Frequency::Weekdays => "weekdays",
            Frequency::Weekends => "weekends",
            Frequency::Weekly(Weekday::Mon) => "monday",
            Frequency::Weekly(Weekday::Tue) => "tuesday",
            Frequency::Weekly(Weekday::Wed) => "wednesday",
            Frequency::Weekly(Weekday::Thu) => "thursday",
            Frequency::Weekly(Weekday::Fri) => "friday",
            Frequency::Weekly(Weekday::Sat) => "saturday",
            Frequency::Weekly(Weekday::Sun) => "sunday",
            Frequency::Once => "once",
        };
        f.write_str(s)
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekdays" => Ok(Frequency::Weekdays),
            "weekends" => Ok(Frequency::Weekends),
            "monday" => Ok(Frequency::Weekly(Weekday::Mon)),
            "tuesday" => Ok(Frequency::Weekly(Weekday::Tue)),
            "wednesday" => Ok(Frequency::Weekly(Weekday::Wed)),
            "thursday" => Ok(Frequency::Weekly(Weekday::Thu)),
            "friday" => Ok(Frequency::Weekly(Weekday::Fri)),
            "saturday" => Ok(Frequency::Weekly(Weekday::Sat)),
            "sunday" => Ok(Frequency::Weekly(Weekday::Sun)),
            "once" => Ok(Frequency::Once),
            other => Err(format!("Unknown frequency: {}", other)),
        }
    }
}

impl TryFrom<String> for Frequency {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Frequency> for String {
    fn from(f: Frequency) -> Self {
        f.to_string()
    }
}

/// Schedulable habit/event template.
///
/// `scheduled_time` and `scheduled_date` are kept as the store's string
/// shapes; malformed values are treated as "unscheduled" by the grid
/// rather than rejected at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<i64>,
    pub name: String,
    pub category: Category,
    pub frequency: Frequency,
    /// "HH:MM", optional; tasks without a usable time go to the untimed list.
    pub scheduled_time: Option<String>,
    /// "YYYY-MM-DD"; required for `once` tasks to ever materialize.
    pub scheduled_date: Option<String>,
    pub duration_minutes: Option<i64>,
    pub is_active: bool,
    pub streak: u32,
    pub best_streak: u32,
    pub total_completions: u32,
}

impl Task {
    /// Create a new active task with required fields.
    ///
    /// # Examples
    /// ```
    /// use habitgrid::models::task::{Task, Category, Frequency};
    ///
    /// let task = Task::new("Morning run", Category::Health, Frequency::Daily).unwrap();
    /// assert!(task.is_active);
    /// ```
    pub fn new(
        name: impl Into<String>,
        category: Category,
        frequency: Frequency,
    ) -> Result<Self, String> {
        let task = Self {
            id: None,
            name: name.into(),
            category,
            frequency,
            scheduled_time: None,
            scheduled_date: None,
            duration_minutes: None,
            is_active: true,
            streak: 0,
            best_streak: 0,
            total_completions: 0,
        };
        task.validate()?;
        Ok(task)
    }

    pub fn builder() -> TaskBuilder {
        TaskBuilder::new()
    }

    /// Validate fields entered through a form or tool call.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Task name cannot be empty".to_string());
        }

        if let Some(time) = self.scheduled_time.as_deref() {
            if !time.is_empty() && parse_time(time).is_none() {
                return Err(format!("Scheduled time must be HH:MM, got '{}'", time));
            }
        }

        if let Some(date) = self.scheduled_date.as_deref() {
            if !date.is_empty() && parse_date(date).is_none() {
                return Err(format!("Scheduled date must be YYYY-MM-DD, got '{}'", date));
            }
        }

        if let Some(minutes) = self.duration_minutes {
            if minutes <= 0 {
                return Err("Duration must be positive".to_string());
            }
        }

        Ok(())
    }

    /// Whether this task materializes on the given date.
    ///
    /// A `once` task without a parsable `scheduled_date` appears on no day.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        match self.frequency {
            Frequency::Daily => true,
            Frequency::Weekdays => date.weekday().number_from_monday() <= 5,
            Frequency::Weekends => date.weekday().number_from_monday() > 5,
            Frequency::Weekly(weekday) => date.weekday() == weekday,
            Frequency::Once => self
                .scheduled_date
                .as_deref()
                .and_then(parse_date)
                .map_or(false, |d| d == date),
        }
    }

    /// The task's scheduled clock time, if the field is present and valid.
    pub fn parsed_time(&self) -> Option<NaiveTime> {
        self.scheduled_time.as_deref().and_then(parse_time)
    }

    /// Duration used for grid placement; tasks without one get an hour.
    pub fn effective_duration(&self) -> i64 {
        self.duration_minutes
            .filter(|m| *m > 0)
            .unwrap_or(DEFAULT_DURATION_MINUTES)
    }

    /// Apply the counter delta for a newly recorded completion.
    pub fn record_completion(&mut self) {
        self.streak += 1;
        self.total_completions += 1;
        self.best_streak = self.best_streak.max(self.streak);
    }

    /// Inverse of [`record_completion`](Self::record_completion), applied
    /// when a completion is toggled back off. `best_streak` is a watermark
    /// and only retreats when the undone completion was the one that set it.
    pub fn revert_completion(&mut self) {
        if self.best_streak == self.streak && self.streak > 0 {
            self.best_streak -= 1;
        }
        self.streak = self.streak.saturating_sub(1);
        self.total_completions = self.total_completions.saturating_sub(1);
    }
}

/// Builder for constructing tasks with optional fields
pub struct TaskBuilder {
    name: Option<String>,
    category: Category,
    frequency: Frequency,
    scheduled_time: Option<String>,
    scheduled_date: Option<String>,
    duration_minutes: Option<i64>,
    is_active: bool,
}

impl TaskBuilder {
    pub fn new() -> Self {
        Self {
            name: None,
            category: Category::Other,
            frequency: Frequency::Daily,
            scheduled_time: None,
            scheduled_date: None,
            duration_minutes: None,
            is_active: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn scheduled_time(mut self, time: impl Into<String>) -> Self {
        self.scheduled_time = Some(time.into());
        self
    }

    pub fn scheduled_date(mut self, date: impl Into<String>) -> Self {
        self.scheduled_date = Some(date.into());
        self
    }

    pub fn duration_minutes(mut self, minutes: i64) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn is_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    pub fn build(self) -> Result<Task, String> {
        let name = self.name.ok_or("Task name is required")?;

        let task = Task {
            id: None,
            name,
            category: self.category,
            frequency: self.frequency,
            scheduled_time: self.scheduled_time,
            scheduled_date: self.scheduled_date,
            duration_minutes: self.duration_minutes,
            is_active: self.is_active,
            streak: 0,
            best_streak: 0,
            total_completions: 0,
        };

        task.validate()?;
        Ok(task)
    }
}

impl Default for TaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_task_success() {
        let task = Task::new("Read", Category::Learning, Frequency::Daily).unwrap();
        assert_eq!(task.name, "Read");
        assert!(task.is_active);
        assert_eq!(task.streak, 0);
    }

    #[test]
    fn test_new_task_empty_name() {
        let result = Task::new("   ", Category::Other, Frequency::Daily);
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_with_schedule() {
        let task = Task::builder()
            .name("Gym")
            .category(Category::Health)
            .frequency(Frequency::Weekdays)
            .scheduled_time("07:30")
            .duration_minutes(45)
            .build()
            .unwrap();

        assert_eq!(task.scheduled_time.as_deref(), Some("07:30"));
        assert_eq!(task.effective_duration(), 45);
    }

    #[test]
    fn test_builder_rejects_malformed_time() {
        let result = Task::builder()
            .name("Gym")
            .scheduled_time("7:30am")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_nonpositive_duration() {
        let result = Task::builder().name("Gym").duration_minutes(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_occurs_on_daily() {
        let task = Task::new("Read", Category::Learning, Frequency::Daily).unwrap();
        assert!(task.occurs_on(date(2026, 8, 24))); // Monday
        assert!(task.occurs_on(date(2026, 8, 29))); // Saturday
    }

    #[test]
    fn test_occurs_on_weekdays() {
        let task = Task::new("Standup", Category::Work, Frequency::Weekdays).unwrap();
        assert!(task.occurs_on(date(2026, 8, 28))); // Friday
        assert!(!task.occurs_on(date(2026, 8, 29))); // Saturday
    }

    #[test]
    fn test_occurs_on_weekends() {
        let task = Task::new("Hike", Category::Health, Frequency::Weekends).unwrap();
        assert!(!task.occurs_on(date(2026, 8, 28))); // Friday
        assert!(task.occurs_on(date(2026, 8, 30))); // Sunday
    }

    #[test]
    fn test_occurs_on_single_weekday() {
        let task = Task::new(
            "Piano",
            Category::Learning,
            Frequency::Weekly(Weekday::Tue),
        )
        .unwrap();
        assert!(task.occurs_on(date(2026, 8, 25))); // Tuesday
        assert!(!task.occurs_on(date(2026, 8, 26))); // Wednesday
    }

    #[test]
    fn test_once_without_date_never_occurs() {
        let task = Task::new("Dentist", Category::Health, Frequency::Once).unwrap();
        assert!(!task.occurs_on(date(2026, 8, 24)));
        assert!(!task.occurs_on(date(2026, 8, 25)));
    }

    #[test]
    fn test_once_with_date_occurs_exactly_once() {
        let task = Task::builder()
            .name("Dentist")
            .frequency(Frequency::Once)
            .scheduled_date("2026-08-26")
            .build()
            .unwrap();
        assert!(task.occurs_on(date(2026, 8, 26)));
        assert!(!task.occurs_on(date(2026, 8, 27)));
    }

    #[test]
    fn test_parsed_time_defensive() {
        let mut task = Task::new("Read", Category::Learning, Frequency::Daily).unwrap();
        task.scheduled_time = Some("garbage".to_string());
        assert_eq!(task.parsed_time(), None);
    }

    #[test]
    fn test_effective_duration_default() {
        let task = Task::new("Read", Category::Learning, Frequency::Daily).unwrap();
        assert_eq!(task.effective_duration(), DEFAULT_DURATION_MINUTES);
    }

    #[test]
    fn test_record_and_revert_completion_round_trip() {
        let mut task = Task::new("Read", Category::Learning, Frequency::Daily).unwrap();
        task.streak = 3;
        task.best_streak = 5;
        task.total_completions = 10;

        let before = task.clone();
        task.record_completion();
        assert_eq!(task.streak, 4);
        assert_eq!(task.best_streak, 5);
        assert_eq!(task.total_completions, 11);

        task.revert_completion();
        assert_eq!(task, before);
    }

    #[test]
    fn test_revert_completion_retreats_fresh_watermark() {
        let mut task = Task::new("Read", Category::Learning, Frequency::Daily).unwrap();
        task.streak = 5;
        task.best_streak = 5;
        task.total_completions = 5;

        task.record_completion();
        assert_eq!(task.best_streak, 6);
        task.revert_completion();
        assert_eq!(task.best_streak, 5);
        assert_eq!(task.streak, 5);
    }

    #[test]
    fn test_frequency_string_round_trip() {
        for freq in [
            Frequency::Daily,
            Frequency::Weekdays,
            Frequency::Weekends,
            Frequency::Weekly(Weekday::Thu),
            Frequency::Once,
        ] {
            let s = freq.to_string();
            assert_eq!(s.parse::<Frequency>().unwrap(), freq);
        }
    }

    #[test]
    fn test_task_serde_wire_shape() {
        let task = Task::builder()
            .name("Gym")
            .category(Category::Health)
            .frequency(Frequency::Weekly(Weekday::Fri))
            .scheduled_time("18:00")
            .build()
            .unwrap();

        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"frequency\":\"friday\""));
        assert!(json.contains("\"category\":\"health\""));

        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }
}
