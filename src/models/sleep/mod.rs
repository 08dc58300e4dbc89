// Sleep entry module
// A logged night with a derived duration that wraps past midnight

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::time::{format_date, parse_time};

/// A single logged night of sleep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepEntry {
    pub id: Option<i64>,
    /// "YYYY-MM-DD" - the date the night is attributed to.
    pub date: String,
    /// "HH:MM" bedtime; may be after midnight.
    pub sleep_time: String,
    /// "HH:MM" wake time.
    pub wake_time: String,
}

impl SleepEntry {
    pub fn new(
        date: NaiveDate,
        sleep_time: impl Into<String>,
        wake_time: impl Into<String>,
    ) -> Result<Self, String> {
        let entry = Self {
            id: None,
            date: format_date(date),
            sleep_time: sleep_time.into(),
            wake_time: wake_time.into(),
        };
        entry.validate()?;
        Ok(entry)
    }

    pub fn validate(&self) -> Result<(), String> {
        if parse_time(&self.sleep_time).is_none() {
            return Err(format!("Sleep time must be HH:MM, got '{}'", self.sleep_time));
        }
        if parse_time(&self.wake_time).is_none() {
            return Err(format!("Wake time must be HH:MM, got '{}'", self.wake_time));
        }
        Ok(())
    }

    /// Hours slept, wrapping past midnight when the wake time does not
    /// exceed the bedtime (23:30 -> 07:00 is 7.5h, not negative).
    /// Malformed times yield `None`; the scorer skips such entries.
    pub fn hours(&self) -> Option<f64> {
        let sleep = parse_time(&self.sleep_time)?;
        let wake = parse_time(&self.wake_time)?;

        let mut minutes = crate::utils::time::minutes_since_midnight(wake)
            - crate::utils::time::minutes_since_midnight(sleep);
        if minutes <= 0 {
            minutes += 24 * 60;
        }
        Some(minutes as f64 / 60.0)
    }
}
