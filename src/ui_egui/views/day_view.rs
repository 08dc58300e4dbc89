//! Single-day grid view.

use chrono::NaiveDate;
use egui::{Pos2, Rect, Rounding, ScrollArea, Sense, Vec2};

use super::{
    bar_rect, draw_event_bar, draw_preview_bar, draw_time_grid, drive_gesture, interact_bar,
    TIME_LABEL_WIDTH,
};
use crate::grid::{
    pack_columns, DayColumn, DragCommit, DragController, Interval, LayoutBox, Overlay,
};
use crate::services::schedule::{day_schedule, GridItem};
use crate::services::store::DataStore;
use crate::ui_egui::palette::GridPalette;
use crate::utils::time::minutes_since_midnight;

pub struct DayView;

impl DayView {
    /// Render the grid for one day and run any active drag gesture.
    /// Returns a commit when a gesture finished this frame.
    pub fn show(
        ui: &mut egui::Ui,
        store: &dyn DataStore,
        overlay: &mut Overlay,
        controller: &mut DragController,
        palette: &GridPalette,
        date: NaiveDate,
    ) -> Option<DragCommit> {
        let metrics = controller.metrics();
        let schedule = day_schedule(store, overlay, date);

        let mut commit = None;
        ScrollArea::vertical().id_source("day_grid").show(ui, |ui| {
            let width = ui.available_width().max(TIME_LABEL_WIDTH + 120.0);
            let (rect, _) = ui.allocate_exact_size(
                Vec2::new(width, metrics.grid_height() + 4.0),
                Sense::hover(),
            );

            let body = Rect::from_min_max(
                Pos2::new(rect.left() + TIME_LABEL_WIDTH, rect.top() + 2.0),
                Pos2::new(rect.right(), rect.top() + 2.0 + metrics.grid_height()),
            );
            draw_time_grid(ui, body, &metrics, palette);

            let columns = vec![DayColumn::new(date, body.left(), body.right())];

            // Committed bars, skipping whichever task is mid-drag; its
            // live position paints separately from the controller.
            let items: Vec<(GridItem, LayoutBox)> = schedule
                .timed
                .iter()
                .filter(|item| item.task.id.is_some() && item.task.id != controller.active_task())
                .map(|item| {
                    let layout = LayoutBox::new(
                        metrics.time_to_top(item.time),
                        metrics
                            .minutes_to_height(item.duration_min)
                            .max(metrics.min_event_height()),
                    );
                    (item.clone(), layout)
                })
                .collect();

            if controller.is_active() {
                ui.painter()
                    .rect_filled(body, Rounding::ZERO, palette.drop_highlight);
            }

            let intervals: Vec<Interval> = items
                .iter()
                .map(|(item, _)| {
                    let start = minutes_since_midnight(item.time);
                    Interval::new(start, start + item.duration_min.max(1))
                })
                .collect();
            let slots = pack_columns(&intervals);

            for ((item, layout), slot) in items.iter().zip(&slots) {
                let rect = bar_rect(&columns[0], body.top(), *layout, slot.col, slot.total);
                draw_event_bar(ui, rect, &item.task, item.time, palette);
                interact_bar(
                    ui, rect, item, 0, *layout, body.top(), &columns, controller, overlay,
                );
            }

            let neighbors: Vec<LayoutBox> = items.iter().map(|(_, l)| *l).collect();
            commit = drive_gesture(
                ui,
                body.top(),
                &columns,
                |_| neighbors.clone(),
                controller,
                overlay,
            );

            if let Some((task_id, day, layout)) = controller.preview() {
                if let (Ok(task), Some(column)) = (store.get_task(task_id), columns.get(day)) {
                    let rect = bar_rect(column, body.top(), layout, 0, 1);
                    draw_preview_bar(ui, rect, &task, metrics.top_to_time(layout.top), palette);
                }
            }
        });

        commit
    }
}
