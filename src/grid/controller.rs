// Drag/resize interaction controller.
//
// A pure state machine: idle -> dragging(move | resize-top | resize-bottom)
// -> idle. Pointer-down captures the event's committed geometry as the
// anchor; every pointer-move derives a snapped candidate from the pointer
// delta and routes it through the overlap resolver before writing the
// overlay; pointer-up emits a single commit. The caller adapts framework
// pointer events into these methods, which keeps this module free of egui
// types and unit-testable.

use chrono::{NaiveDate, NaiveTime};

use super::geometry::{GridMetrics, SNAP_MINUTES};
use super::overlap::{
    resolve_move, resolve_resize_bottom, resolve_resize_top, LayoutBox,
};
use super::overlay::{Overlay, OverlayEntry};

/// One day column of the grid, in the grid's own x coordinates.
/// The week view hit-tests the pointer against this ordered array rather
/// than asking the rendering layer which column was hovered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub x_min: f32,
    pub x_max: f32,
}

impl DayColumn {
    pub fn new(date: NaiveDate, x_min: f32, x_max: f32) -> Self {
        Self { date, x_min, x_max }
    }
}

/// Find the day column under a pointer x coordinate.
pub fn column_at(columns: &[DayColumn], x: f32) -> Option<usize> {
    columns
        .iter()
        .position(|c| x >= c.x_min && x < c.x_max)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragKind {
    Move,
    ResizeTop,
    ResizeBottom,
}

/// Final result of a completed gesture, committed as one task update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragCommit {
    pub task_id: i64,
    pub time: NaiveTime,
    pub duration_minutes: i64,
    pub date: NaiveDate,
}

#[derive(Clone, Debug)]
struct Anchor {
    task_id: i64,
    kind: DragKind,
    /// Committed geometry at pointer-down; the no-op fallback.
    origin: LayoutBox,
    origin_day: usize,
    pointer_y: f32,
    hovered_day: usize,
    hovered_date: NaiveDate,
    geometry: LayoutBox,
}

pub struct DragController {
    metrics: GridMetrics,
    active: Option<Anchor>,
}

impl DragController {
    pub fn new(metrics: GridMetrics) -> Self {
        Self {
            metrics,
            active: None,
        }
    }

    pub fn metrics(&self) -> GridMetrics {
        self.metrics
    }

    /// Swap pixel density when the view (or its settings) change. Only
    /// meaningful while idle; an active gesture keeps its anchor.
    pub fn set_metrics(&mut self, metrics: GridMetrics) {
        if self.active.is_none() {
            self.metrics = metrics;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_task(&self) -> Option<i64> {
        self.active.as_ref().map(|a| a.task_id)
    }

    pub fn kind(&self) -> Option<DragKind> {
        self.active.as_ref().map(|a| a.kind)
    }

    /// Task id to omit from `day`'s render list: while a cross-day drag
    /// targets another column the event must not appear twice.
    pub fn hidden_in(&self, day: usize) -> Option<i64> {
        let a = self.active.as_ref()?;
        (a.origin_day == day && a.hovered_day != day).then_some(a.task_id)
    }

    /// Live geometry for the dragged task, for preview painting.
    pub fn preview(&self) -> Option<(i64, usize, LayoutBox)> {
        self.active
            .as_ref()
            .map(|a| (a.task_id, a.hovered_day, a.geometry))
    }

    /// Enter the dragging state. Only one gesture may be active at a time;
    /// a second pointer-down while dragging is ignored.
    pub fn begin(
        &mut self,
        kind: DragKind,
        task_id: i64,
        origin: LayoutBox,
        day: usize,
        pointer_y: f32,
        columns: &[DayColumn],
        overlay: &mut Overlay,
    ) {
        if self.active.is_some() {
            return;
        }
        let Some(column) = columns.get(day) else {
            log::warn!("Drag began in unknown day column {}", day);
            return;
        };

        overlay.insert(
            task_id,
            OverlayEntry {
                time: self.metrics.top_to_time(origin.top),
                duration_min: self
                    .metrics
                    .height_to_minutes(origin.height)
                    .max(SNAP_MINUTES),
                day: column.date,
            },
        );

        self.active = Some(Anchor {
            task_id,
            kind,
            origin,
            origin_day: day,
            pointer_y,
            hovered_day: day,
            hovered_date: column.date,
            geometry: origin,
        });
    }

    /// Which day column the gesture currently targets. Moves follow the
    /// pointer x; a pointer outside every column keeps the previous target.
    /// Resizes never leave their origin column.
    pub fn target_day(&self, columns: &[DayColumn], pointer_x: f32) -> Option<usize> {
        let a = self.active.as_ref()?;
        match a.kind {
            DragKind::Move => Some(column_at(columns, pointer_x).unwrap_or(a.hovered_day)),
            DragKind::ResizeTop | DragKind::ResizeBottom => Some(a.origin_day),
        }
    }

    /// Advance the gesture to a new pointer position.
    ///
    /// `day` is the column from [`target_day`](Self::target_day) and
    /// `neighbors` that column's committed sibling placements, excluding
    /// the dragged task itself. Only the overlay changes; the committed
    /// model is untouched until [`finish`](Self::finish).
    pub fn update(
        &mut self,
        pointer_y: f32,
        day: usize,
        columns: &[DayColumn],
        neighbors: &[LayoutBox],
        overlay: &mut Overlay,
    ) {
        let metrics = self.metrics;
        let Some(a) = self.active.as_mut() else {
            return;
        };
        let Some(column) = columns.get(day) else {
            return;
        };

        let delta = pointer_y - a.pointer_y;
        let min_height = metrics.min_event_height();

        let geometry = match a.kind {
            DragKind::Move => {
                let requested = metrics.snap_top(a.origin.top + delta);
                resolve_move(a.origin, requested, neighbors, metrics.grid_height())
            }
            DragKind::ResizeTop => {
                let requested = metrics.snap_top(a.origin.top + delta);
                resolve_resize_top(a.origin.bottom(), requested, min_height, neighbors)
            }
            DragKind::ResizeBottom => {
                let requested = metrics.snap_top(a.origin.bottom() + delta);
                resolve_resize_bottom(
                    a.origin.top,
                    requested,
                    min_height,
                    neighbors,
                    metrics.grid_height(),
                )
            }
        };

        a.hovered_day = day;
        a.hovered_date = column.date;
        a.geometry = geometry;

        overlay.insert(
            a.task_id,
            OverlayEntry {
                time: metrics.top_to_time(geometry.top),
                duration_min: metrics
                    .height_to_minutes(geometry.height)
                    .max(SNAP_MINUTES),
                day: column.date,
            },
        );
    }

    /// Pointer-up: leave the dragging state and emit the commit. The
    /// overlay entry stays until the caller learns whether the store took
    /// the write, then is cleared (success) or reverted (failure).
    pub fn finish(&mut self) -> Option<DragCommit> {
        let a = self.active.take()?;
        Some(DragCommit {
            task_id: a.task_id,
            time: self.metrics.top_to_time(a.geometry.top),
            duration_minutes: self
                .metrics
                .height_to_minutes(a.geometry.height)
                .max(SNAP_MINUTES),
            date: a.hovered_date,
        })
    }

    /// Abandon the gesture (Escape): drop the overlay entry, write nothing.
    pub fn cancel(&mut self, overlay: &mut Overlay) {
        if let Some(a) = self.active.take() {
            overlay.remove(a.task_id);
        }
    }
}
