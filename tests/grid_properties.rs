// Property-based tests for the layout engine
// Random inputs against the geometric invariants the views rely on

use chrono::NaiveTime;
use proptest::prelude::*;

use habitgrid::grid::overlap::resolve_move;
use habitgrid::grid::{pack_columns, GridMetrics, Interval, LayoutBox, SNAP_MINUTES};

fn aligned_time(quarter: i64) -> NaiveTime {
    let minutes = 6 * 60 + quarter * SNAP_MINUTES;
    NaiveTime::from_hms_opt((minutes / 60) as u32, (minutes % 60) as u32, 0).unwrap()
}

proptest! {
    /// Every 15-minute-aligned time in the visible window survives a
    /// pixel round trip, at both view densities.
    #[test]
    fn prop_converter_round_trips_aligned_times(quarter in 0i64..72) {
        let time = aligned_time(quarter);
        for metrics in [GridMetrics::day_view(), GridMetrics::week_view()] {
            prop_assert_eq!(metrics.top_to_time(metrics.time_to_top(time)), time);
        }
    }

    /// Whatever pixel offset the pointer produces, the snapped time is
    /// 15-minute aligned and inside the visible window.
    #[test]
    fn prop_top_to_time_snaps_into_window(top in -500.0f32..2500.0) {
        let metrics = GridMetrics::day_view();
        let time = metrics.top_to_time(top);
        let minutes = time.signed_duration_since(
            NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        ).num_minutes();

        prop_assert_eq!(minutes % SNAP_MINUTES, 0);
        prop_assert!(minutes >= 6 * 60);
        prop_assert!(minutes <= 23 * 60 + 45);
    }

    /// A resolved move either lands clear of every neighbor or falls back
    /// to the original placement, and always stays inside the grid.
    #[test]
    fn prop_resolved_move_is_free_or_original(
        origin_q in 0i64..68,
        requested in -200.0f32..1400.0,
        neighbor_qs in proptest::collection::vec((0i64..68, 1i64..8), 0..6),
    ) {
        let metrics = GridMetrics::day_view();
        let height = metrics.minutes_to_height(60);
        let origin = LayoutBox::new(
            metrics.time_to_top(aligned_time(origin_q)),
            height,
        );

        let neighbors: Vec<LayoutBox> = neighbor_qs
            .iter()
            .map(|&(q, len)| LayoutBox::new(
                metrics.time_to_top(aligned_time(q.min(71))),
                metrics.minutes_to_height(len * SNAP_MINUTES),
            ))
            .filter(|n| !n.intersects(&origin))
            .collect();

        let resolved = resolve_move(origin, requested, &neighbors, metrics.grid_height());

        prop_assert!(resolved.top >= 0.0);
        prop_assert!(resolved.bottom() <= metrics.grid_height() + 0.01);
        if resolved != origin {
            for n in &neighbors {
                prop_assert!(!resolved.intersects(n));
            }
        }
    }

    /// No two overlapping intervals ever share a packed column, and every
    /// column index fits inside its reported total.
    #[test]
    fn prop_packing_is_a_valid_coloring(
        raw in proptest::collection::vec((0i64..1000, 1i64..300), 0..20),
    ) {
        let intervals: Vec<Interval> = raw
            .iter()
            .map(|&(start, len)| Interval::new(start, start + len))
            .collect();
        let slots = pack_columns(&intervals);

        prop_assert_eq!(slots.len(), intervals.len());
        for (i, slot) in slots.iter().enumerate() {
            prop_assert!(slot.col < slot.total);
            for (j, other) in slots.iter().enumerate() {
                if i != j && intervals[i].overlaps(&intervals[j]) {
                    prop_assert_ne!(slot.col, other.col);
                    // Cluster-consistent widths: both sides agree the
                    // layout is at least wide enough for each other.
                    prop_assert!(slot.total > other.col);
                }
            }
        }
    }
}
