// Side-by-side column packing for overlapping events.
//
// Greedy first-fit interval coloring: events are processed in start order
// and each takes the first column whose previous occupant has ended. Not a
// minimum coloring, but deterministic for a fixed sort and cheap enough
// for a human-sized daily schedule.

/// Half-open time interval in minutes since midnight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Column assignment for one event: render it spanning the fractional
/// width from `col / total` to `(col + 1) / total` of the day column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSlot {
    pub col: usize,
    pub total: usize,
}

/// Assign a column index and column count to every interval.
///
/// Totals are computed per overlap cluster (the widest column index among
/// an event and everything it overlaps) so side-by-side events in one
/// cluster agree on their fractional widths even though assignment itself
/// is greedy and local. Results are in input order.
pub fn pack_columns(intervals: &[Interval]) -> Vec<ColumnSlot> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by_key(|&i| (intervals[i].start, intervals[i].end));

    // First-fit over column end times.
    let mut col_ends: Vec<i64> = Vec::new();
    let mut cols = vec![0usize; intervals.len()];
    for &i in &order {
        let iv = intervals[i];
        match col_ends.iter().position(|&end| end <= iv.start) {
            Some(col) => {
                cols[i] = col;
                col_ends[col] = iv.end;
            }
            None => {
                cols[i] = col_ends.len();
                col_ends.push(iv.end);
            }
        }
    }

    (0..intervals.len())
        .map(|i| {
            let widest = (0..intervals.len())
                .filter(|&j| j == i || intervals[i].overlaps(&intervals[j]))
                .map(|j| cols[j])
                .max()
                .unwrap_or(0);
            ColumnSlot {
                col: cols[i],
                total: widest + 1,
            }
        })
        .collect()
}
