// Weekly sleep scoring.
//
// Pure function over one displayed week of sleep entries. Duration is
// scored per night from a fixed piecewise table peaking at 7.5-8.5 hours;
// consistency comes from the standard deviation of bedtimes on a
// midnight-continuous scale. A week with nothing logged scores None -
// "unknown", which is not the same thing as "bad".

use crate::models::sleep::SleepEntry;
use crate::utils::time::{normalized_bedtime_minutes, parse_time};

/// Duration weight in the final blend; consistency takes the rest.
const DURATION_WEIGHT: f64 = 0.7;
const CONSISTENCY_WEIGHT: f64 = 0.3;

/// Score a single night's duration on the fixed 1-10 table.
pub fn duration_score(hours: f64) -> f64 {
    if hours < 5.0 {
        1.0
    } else if hours < 6.0 {
        3.0
    } else if hours < 6.5 {
        5.0
    } else if hours < 7.0 {
        7.0
    } else if hours < 7.5 {
        9.0
    } else if hours <= 8.5 {
        10.0
    } else if hours <= 9.0 {
        9.0
    } else if hours <= 9.5 {
        7.0
    } else if hours <= 10.0 {
        5.0
    } else {
        4.0
    }
}

/// Score bedtime regularity from the standard deviation (in minutes) of
/// normalized sleep-start times. Fewer than two data points scores a
/// perfect 10: insufficient data should not read as inconsistency.
pub fn consistency_score(bedtime_minutes: &[f64]) -> f64 {
    if bedtime_minutes.len() < 2 {
        return 10.0;
    }

    let n = bedtime_minutes.len() as f64;
    let mean = bedtime_minutes.iter().sum::<f64>() / n;
    let variance = bedtime_minutes
        .iter()
        .map(|m| (m - mean).powi(2))
        .sum::<f64>()
        / n;
    let sd = variance.sqrt();

    if sd <= 15.0 {
        10.0
    } else if sd <= 30.0 {
        8.5
    } else if sd <= 45.0 {
        7.0
    } else if sd <= 60.0 {
        5.0
    } else if sd <= 90.0 {
        3.0
    } else {
        1.0
    }
}

/// Weekly 0-10 score, one decimal place, or `None` when nothing usable
/// was logged. Entries with malformed times are skipped, not scored.
pub fn weekly_score(entries: &[SleepEntry]) -> Option<f64> {
    let durations: Vec<f64> = entries.iter().filter_map(|e| e.hours()).collect();
    if durations.is_empty() {
        return None;
    }

    let avg_duration_score =
        durations.iter().map(|&h| duration_score(h)).sum::<f64>() / durations.len() as f64;

    let bedtimes: Vec<f64> = entries
        .iter()
        .filter_map(|e| parse_time(&e.sleep_time))
        .map(normalized_bedtime_minutes)
        .collect();
    let consistency = consistency_score(&bedtimes);

    let blended = avg_duration_score * DURATION_WEIGHT + consistency * CONSISTENCY_WEIGHT;
    Some((blended * 10.0).round() / 10.0)
}
