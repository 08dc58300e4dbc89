// Time string utilities
// Schedule fields arrive from the external store as "HH:MM" / "YYYY-MM-DD"
// strings and may be empty or malformed; these guards route bad values to
// the untimed list instead of crashing the grid.

use chrono::{NaiveDate, NaiveTime, Timelike};

/// Strictly parse a `"HH:MM"` clock time.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let (h, m) = s.split_once(':')?;
    if h.len() != 2 || m.len() != 2 {
        return None;
    }
    let hour: u32 = h.parse().ok()?;
    let minute: u32 = m.parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Check whether a schedule field holds a usable `"HH:MM"` time.
pub fn is_valid_time(s: &str) -> bool {
    parse_time(s).is_some()
}

pub fn format_time(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Strictly parse a `"YYYY-MM-DD"` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn minutes_since_midnight(time: NaiveTime) -> i64 {
    time.hour() as i64 * 60 + time.minute() as i64
}

/// Minutes since noon-anchored midnight for bedtime comparisons.
///
/// Bedtimes straddle midnight, so raw minutes-since-midnight would put
/// 23:30 and 00:30 an hour apart numerically but 23 hours apart on the
/// clock face. Times before 12:00 get 24h added so "23:30" and "00:30"
/// land 60 minutes apart on a continuous scale.
pub fn normalized_bedtime_minutes(time: NaiveTime) -> f64 {
    let mut minutes = minutes_since_midnight(time) as f64;
    if time.hour() < 12 {
        minutes += 24.0 * 60.0;
    }
    minutes
}
