//! Sleep log operations.
//!
//! Thin layer over the store: one entry per night, a seven-day window
//! aligned to the displayed week, and the weekly score computed from it.

use chrono::{Days, NaiveDate};
use log::info;

use crate::grid::sleep_score;
use crate::models::sleep::SleepEntry;
use crate::services::store::{DataStore, StoreResult};
use crate::utils::time::parse_date;

/// Record a night of sleep. An existing entry for the same date is
/// replaced rather than duplicated.
pub fn log_night(store: &mut dyn DataStore, entry: SleepEntry) -> StoreResult<SleepEntry> {
    if let Some(existing) = store
        .list_sleep_entries()
        .iter()
        .find(|e| e.date == entry.date)
        .and_then(|e| e.id)
    {
        store.delete_sleep_entry(existing)?;
    }
    let created = store.create_sleep_entry(entry)?;
    info!("logged sleep for {}", created.date);
    Ok(created)
}

pub fn delete_night(store: &mut dyn DataStore, id: i64) -> StoreResult<()> {
    store.delete_sleep_entry(id)
}

/// Entries falling inside `[week_start, week_start + 7)`, sorted by date.
pub fn week_entries(store: &dyn DataStore, week_start: NaiveDate) -> Vec<SleepEntry> {
    let week_end = week_start
        .checked_add_days(Days::new(7))
        .unwrap_or(NaiveDate::MAX);

    let mut entries: Vec<SleepEntry> = store
        .list_sleep_entries()
        .into_iter()
        .filter(|e| {
            parse_date(&e.date)
                .map(|d| d >= week_start && d < week_end)
                .unwrap_or(false)
        })
        .collect();
    entries.sort_by(|a, b| a.date.cmp(&b.date));
    entries
}

/// Weekly sleep score for the displayed week, `None` when nothing usable
/// was logged.
pub fn weekly_score(store: &dyn DataStore, week_start: NaiveDate) -> Option<f64> {
    sleep_score::weekly_score(&week_entries(store, week_start))
}
