// Time/pixel conversion for the day and week grids.
//
// The visible day spans a fixed start hour through 18 hourly rows; every
// conversion snaps to 15-minute steps. Times outside the window clamp to
// the nearest boundary instead of erroring - the grid has no way to draw
// an out-of-window time, and stored times are only changed by an explicit
// commit, never by rendering.

use chrono::NaiveTime;

/// Snap granularity applied to all time conversions.
pub const SNAP_MINUTES: i64 = 15;

/// First visible hour of the day window.
pub const START_HOUR: i64 = 6;

/// Number of hourly rows in the grid (06:00 through 24:00).
pub const VISIBLE_HOURS: i64 = 18;

/// Pixel height of one hour in the day view.
pub const DAY_PX_PER_HOUR: f32 = 64.0;

/// Pixel height of one hour in the week view.
pub const WEEK_PX_PER_HOUR: f32 = 44.0;

/// Grid window and pixel density for one view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMetrics {
    pub start_hour: i64,
    pub hours: i64,
    pub px_per_hour: f32,
}

impl GridMetrics {
    pub fn with_density(px_per_hour: f32) -> Self {
        Self {
            start_hour: START_HOUR,
            hours: VISIBLE_HOURS,
            px_per_hour,
        }
    }

    pub fn day_view() -> Self {
        Self::with_density(DAY_PX_PER_HOUR)
    }

    pub fn week_view() -> Self {
        Self::with_density(WEEK_PX_PER_HOUR)
    }

    /// Total pixel height of the scrollable grid.
    pub fn grid_height(&self) -> f32 {
        self.hours as f32 * self.px_per_hour
    }

    /// Smallest height an event may shrink to (one quarter-hour).
    /// Enforced by interaction code, not by the converters.
    pub fn min_event_height(&self) -> f32 {
        self.px_per_hour / 4.0
    }

    fn window_start_minutes(&self) -> i64 {
        self.start_hour * 60
    }

    fn window_end_minutes(&self) -> i64 {
        (self.start_hour + self.hours) * 60
    }

    /// Vertical offset of a clock time from the top of the grid.
    /// Out-of-window times clamp to the nearest boundary.
    pub fn time_to_top(&self, time: NaiveTime) -> f32 {
        let minutes = crate::utils::time::minutes_since_midnight(time)
            .clamp(self.window_start_minutes(), self.window_end_minutes());
        (minutes - self.window_start_minutes()) as f32 / 60.0 * self.px_per_hour
    }

    /// Inverse of [`time_to_top`](Self::time_to_top) up to snapping: the
    /// implied minute offset rounds to the nearest 15-minute boundary and
    /// the hour clamps to 23.
    pub fn top_to_time(&self, top: f32) -> NaiveTime {
        let raw_minutes =
            self.window_start_minutes() as f32 + top / self.px_per_hour * 60.0;
        let snapped = snap_to_step(raw_minutes);
        let clamped = snapped.clamp(self.window_start_minutes(), 24 * 60 - SNAP_MINUTES);
        NaiveTime::from_hms_opt((clamped / 60) as u32, (clamped % 60) as u32, 0)
            .unwrap_or_else(|| NaiveTime::from_hms_opt(23, 45, 0).unwrap())
    }

    /// Pixel height of a duration. No floor is applied here.
    pub fn minutes_to_height(&self, minutes: i64) -> f32 {
        minutes as f32 / 60.0 * self.px_per_hour
    }

    /// Duration implied by a pixel height, snapped to 15-minute steps.
    pub fn height_to_minutes(&self, height: f32) -> i64 {
        snap_to_step(height / self.px_per_hour * 60.0).max(0)
    }

    /// Snap an arbitrary pixel offset onto the nearest 15-minute row.
    pub fn snap_top(&self, top: f32) -> f32 {
        self.time_to_top(self.top_to_time(top))
    }
}

fn snap_to_step(minutes: f32) -> i64 {
    ((minutes / SNAP_MINUTES as f32).round() as i64) * SNAP_MINUTES
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_time_to_top_at_window_start() {
        let metrics = GridMetrics::day_view();
        assert_eq!(metrics.time_to_top(t(6, 0)), 0.0);
    }

    #[test]
    fn test_time_to_top_scales_with_density() {
        let day = GridMetrics::day_view();
        let week = GridMetrics::week_view();
        assert_eq!(day.time_to_top(t(9, 0)), 3.0 * 64.0);
        assert_eq!(week.time_to_top(t(9, 0)), 3.0 * 44.0);
    }

    #[test]
    fn test_time_to_top_clamps_before_window() {
        let metrics = GridMetrics::day_view();
        assert_eq!(metrics.time_to_top(t(4, 30)), 0.0);
    }

    #[test]
    fn test_top_to_time_snaps_to_quarter_hour() {
        let metrics = GridMetrics::day_view();
        // 10px into the 64px hour row implies ~9.4 minutes, nearest step is 15
        assert_eq!(metrics.top_to_time(10.0), t(6, 15));
        assert_eq!(metrics.top_to_time(7.0), t(6, 0));
    }

    #[test]
    fn test_top_to_time_clamps_bottom_of_grid() {
        let metrics = GridMetrics::week_view();
        let bottom = metrics.grid_height();
        assert_eq!(metrics.top_to_time(bottom), t(23, 45));
        assert_eq!(metrics.top_to_time(bottom + 500.0), t(23, 45));
    }

    #[test]
    fn test_top_to_time_clamps_negative() {
        let metrics = GridMetrics::day_view();
        assert_eq!(metrics.top_to_time(-25.0), t(6, 0));
    }

    #[test]
    fn test_round_trip_on_aligned_times() {
        for metrics in [GridMetrics::day_view(), GridMetrics::week_view()] {
            let mut minutes = 6 * 60;
            while minutes <= 23 * 60 + 45 {
                let time = t((minutes / 60) as u32, (minutes % 60) as u32);
                assert_eq!(metrics.top_to_time(metrics.time_to_top(time)), time);
                minutes += SNAP_MINUTES;
            }
        }
    }

    #[test]
    fn test_minutes_height_round_trip() {
        let metrics = GridMetrics::week_view();
        for minutes in [15, 30, 60, 90, 240] {
            assert_eq!(
                metrics.height_to_minutes(metrics.minutes_to_height(minutes)),
                minutes
            );
        }
    }

    #[test]
    fn test_min_event_height_is_quarter_slot() {
        assert_eq!(GridMetrics::day_view().min_event_height(), 16.0);
        assert_eq!(GridMetrics::week_view().min_event_height(), 11.0);
    }

    #[test]
    fn test_grid_height() {
        assert_eq!(GridMetrics::day_view().grid_height(), 18.0 * 64.0);
    }
}
