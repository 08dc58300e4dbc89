//! Time-grid scheduling layout engine.
//!
//! Pure geometry and interaction logic for the day/week grids: clock-time to
//! pixel conversion, overlap resolution for moves and resizes, side-by-side
//! column packing for overlapping events, and the drag/resize state machine
//! with its transient overlay. No egui types appear here; the UI layer
//! adapts pointer events into these calls.

pub mod controller;
pub mod geometry;
pub mod overlap;
pub mod overlay;
pub mod packing;
pub mod sleep_score;

pub use controller::{DayColumn, DragCommit, DragController, DragKind};
pub use geometry::{GridMetrics, SNAP_MINUTES};
pub use overlap::LayoutBox;
pub use overlay::{Overlay, OverlayEntry};
pub use packing::{pack_columns, ColumnSlot, Interval};
