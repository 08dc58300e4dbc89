// Transient drag overlay.
//
// The committed task model is never touched while a gesture is in
// progress; live positions go into this map, keyed by task id, and are
// merged over the committed schedule at render time. Entries exist exactly
// for the duration of one drag: inserted on pointer-down, rewritten on
// every move, removed on commit or cancel.

use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;

/// Uncommitted position/duration for one task mid-drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayEntry {
    pub time: NaiveTime,
    pub duration_min: i64,
    /// Target day; differs from the task's own day during a cross-day drag.
    pub day: NaiveDate,
}

#[derive(Debug, Default)]
pub struct Overlay {
    entries: HashMap<i64, OverlayEntry>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, task_id: i64, entry: OverlayEntry) {
        self.entries.insert(task_id, entry);
    }

    pub fn get(&self, task_id: i64) -> Option<&OverlayEntry> {
        self.entries.get(&task_id)
    }

    pub fn remove(&mut self, task_id: i64) -> Option<OverlayEntry> {
        self.entries.remove(&task_id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let mut overlay = Overlay::new();
        let entry = OverlayEntry {
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            duration_min: 45,
            day: NaiveDate::from_ymd_opt(2026, 8, 26).unwrap(),
        };

        overlay.insert(3, entry);
        assert_eq!(overlay.get(3), Some(&entry));

        assert_eq!(overlay.remove(3), Some(entry));
        assert!(overlay.is_empty());
        assert_eq!(overlay.get(3), None);
    }
}
