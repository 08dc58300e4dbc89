//! Day and week time-grid views.
//!
//! Shared painting lives here: hour rows, time labels, event bars and the
//! drag preview. The views adapt egui pointer events into the interaction
//! controller, which itself never sees an egui type.

pub mod day_view;
pub mod week_view;

use chrono::NaiveTime;
use egui::{
    Align2, Color32, CursorIcon, FontId, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2,
};

use crate::grid::{
    DayColumn, DragCommit, DragController, DragKind, GridMetrics, LayoutBox, Overlay,
};
use crate::models::task::Task;
use crate::services::schedule::GridItem;
use crate::ui_egui::palette::{category_color, GridPalette};
use crate::utils::time::format_time;

pub const TIME_LABEL_WIDTH: f32 = 50.0;
pub const COLUMN_SPACING: f32 = 1.0;
/// Pointer band at the top/bottom edge of a bar that starts a resize
/// instead of a move.
pub const RESIZE_HANDLE_PX: f32 = 6.0;

/// Paint hour lines, quarter lines and time labels for one grid body.
/// `rect` spans the columns only; labels go in the gutter to its left.
pub fn draw_time_grid(ui: &Ui, rect: Rect, metrics: &GridMetrics, palette: &GridPalette) {
    let painter = ui.painter();
    painter.rect_filled(rect, Rounding::ZERO, palette.grid_bg);

    for hour in 0..=metrics.hours {
        let y = rect.top() + hour as f32 * metrics.px_per_hour;
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            Stroke::new(1.0, palette.hour_line),
        );

        if hour < metrics.hours {
            for quarter in 1..4 {
                let qy = y + quarter as f32 * metrics.px_per_hour / 4.0;
                painter.line_segment(
                    [Pos2::new(rect.left(), qy), Pos2::new(rect.right(), qy)],
                    Stroke::new(0.5, palette.quarter_line),
                );
            }

            painter.text(
                Pos2::new(rect.left() - 6.0, y + 2.0),
                Align2::RIGHT_TOP,
                format!("{:02}:00", metrics.start_hour + hour),
                FontId::proportional(10.0),
                palette.time_label,
            );
        }
    }
}

/// Screen rect for a layout box inside one day column, with `frac` /
/// `of` giving the packed sub-column.
pub fn bar_rect(
    column: &DayColumn,
    grid_top: f32,
    layout: LayoutBox,
    frac: usize,
    of: usize,
) -> Rect {
    let of = of.max(1) as f32;
    let width = (column.x_max - column.x_min - COLUMN_SPACING) / of;
    let left = column.x_min + frac as f32 * width;
    Rect::from_min_size(
        Pos2::new(left + 1.0, grid_top + layout.top + 1.0),
        Vec2::new(width - 2.0, (layout.height - 2.0).max(4.0)),
    )
}

/// Paint one committed event bar.
pub fn draw_event_bar(ui: &Ui, rect: Rect, task: &Task, time: NaiveTime, palette: &GridPalette) {
    let painter = ui.painter();
    painter.rect_filled(rect, Rounding::same(3.0), category_color(task.category));

    if rect.height() >= 14.0 {
        painter.text(
            Pos2::new(rect.left() + 4.0, rect.top() + 2.0),
            Align2::LEFT_TOP,
            &task.name,
            FontId::proportional(10.0),
            palette.bar_text,
        );
    }
    if rect.height() >= 28.0 {
        painter.text(
            Pos2::new(rect.left() + 4.0, rect.top() + 14.0),
            Align2::LEFT_TOP,
            format_time(time),
            FontId::proportional(9.0),
            palette.bar_text.gamma_multiply(0.8),
        );
    }
}

/// Paint the live drag preview: a translucent bar with an outline.
pub fn draw_preview_bar(ui: &Ui, rect: Rect, task: &Task, time: NaiveTime, palette: &GridPalette) {
    let base = category_color(task.category);
    let fill =
        Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), palette.preview_fill_alpha);
    let painter = ui.painter();
    painter.rect_filled(rect, Rounding::same(3.0), fill);
    painter.rect_stroke(
        rect,
        Rounding::same(3.0),
        Stroke::new(1.5, palette.preview_outline),
    );
    painter.text(
        Pos2::new(rect.left() + 4.0, rect.top() + 2.0),
        Align2::LEFT_TOP,
        format!("{} {}", format_time(time), task.name),
        FontId::proportional(10.0),
        palette.bar_text,
    );
}

/// Which gesture a pointer-down at `pos` starts on a bar.
pub fn hit_kind(rect: Rect, pos: Pos2) -> DragKind {
    if pos.y <= rect.top() + RESIZE_HANDLE_PX {
        DragKind::ResizeTop
    } else if pos.y >= rect.bottom() - RESIZE_HANDLE_PX {
        DragKind::ResizeBottom
    } else {
        DragKind::Move
    }
}

/// Wire one committed bar into the controller: resize cursors on hover,
/// gesture start on drag.
#[allow(clippy::too_many_arguments)]
pub fn interact_bar(
    ui: &mut Ui,
    rect: Rect,
    item: &GridItem,
    day_index: usize,
    layout: LayoutBox,
    grid_top: f32,
    columns: &[DayColumn],
    controller: &mut DragController,
    overlay: &mut Overlay,
) {
    let Some(task_id) = item.task.id else {
        return;
    };

    let response = ui.interact(
        rect,
        ui.id().with(("bar", day_index, task_id)),
        Sense::click_and_drag(),
    );

    if let Some(hover) = response.hover_pos() {
        let icon = match hit_kind(rect, hover) {
            DragKind::Move => CursorIcon::Grab,
            DragKind::ResizeTop | DragKind::ResizeBottom => CursorIcon::ResizeVertical,
        };
        ui.ctx().set_cursor_icon(icon);
    }

    if response.drag_started() {
        if let Some(press) = response.interact_pointer_pos() {
            controller.begin(
                hit_kind(rect, press),
                task_id,
                layout,
                day_index,
                press.y - grid_top,
                columns,
                overlay,
            );
        }
    }
}

/// Advance an active gesture with this frame's pointer position, then
/// terminate it on pointer-up (commit) or Escape (cancel). Termination is
/// driven by egui's global pointer state, so a release outside the grid
/// still ends the drag.
pub fn drive_gesture(
    ui: &Ui,
    grid_top: f32,
    columns: &[DayColumn],
    neighbors_of: impl Fn(usize) -> Vec<LayoutBox>,
    controller: &mut DragController,
    overlay: &mut Overlay,
) -> Option<DragCommit> {
    if !controller.is_active() {
        return None;
    }

    let (pointer, released, escape) = ui.input(|i| {
        (
            i.pointer.latest_pos(),
            i.pointer.any_released(),
            i.key_pressed(egui::Key::Escape),
        )
    });

    if escape {
        controller.cancel(overlay);
        return None;
    }

    if let Some(pos) = pointer {
        if let Some(day) = controller.target_day(columns, pos.x) {
            let neighbors = neighbors_of(day);
            controller.update(pos.y - grid_top, day, columns, &neighbors, overlay);
        }
    }

    if released {
        controller.finish()
    } else {
        ui.ctx().request_repaint();
        None
    }
}
