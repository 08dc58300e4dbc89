// Test fixtures - reusable test data
// Provides consistent test data across the integration tests

use chrono::NaiveDate;

use habitgrid::models::sleep::SleepEntry;
use habitgrid::models::task::{Category, Frequency, Task};

/// Sample dates for testing, all within one week.
pub mod dates {
    use super::*;

    /// Monday, Aug 24 2026
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
    }

    /// Wednesday, Aug 26 2026
    pub fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 26).unwrap()
    }

    /// Saturday, Aug 29 2026
    pub fn saturday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }
}

/// A daily task scheduled on the grid.
pub fn timed_task(name: &str, time: &str, minutes: i64) -> Task {
    Task::builder()
        .name(name)
        .category(Category::Health)
        .frequency(Frequency::Daily)
        .scheduled_time(time)
        .duration_minutes(minutes)
        .build()
        .unwrap()
}

/// A daily task with no scheduled time; lands in the untimed list.
pub fn untimed_task(name: &str) -> Task {
    Task::new(name, Category::Mindfulness, Frequency::Daily).unwrap()
}

/// A one-off task pinned to a date.
pub fn once_task(name: &str, date: NaiveDate, time: &str) -> Task {
    Task::builder()
        .name(name)
        .category(Category::Personal)
        .frequency(Frequency::Once)
        .scheduled_date(date.format("%Y-%m-%d").to_string())
        .scheduled_time(time)
        .build()
        .unwrap()
}

/// One logged night.
pub fn night(date: NaiveDate, sleep: &str, wake: &str) -> SleepEntry {
    SleepEntry::new(date, sleep, wake).unwrap()
}
