//! Seven-day grid view with packed side-by-side bars.

use chrono::{Datelike, Local, NaiveDate};
use egui::{Align2, FontId, Pos2, Rect, Rounding, ScrollArea, Sense, Vec2};

use super::{
    bar_rect, draw_event_bar, draw_preview_bar, draw_time_grid, drive_gesture, interact_bar,
    COLUMN_SPACING, TIME_LABEL_WIDTH,
};
use crate::grid::{
    pack_columns, ColumnSlot, DayColumn, DragCommit, DragController, Interval, LayoutBox, Overlay,
};
use crate::services::schedule::{week_schedule, GridItem};
use crate::services::store::DataStore;
use crate::ui_egui::palette::GridPalette;
use crate::utils::time::minutes_since_midnight;

const HEADER_HEIGHT: f32 = 26.0;

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - chrono::Days::new(date.weekday().num_days_from_monday() as u64)
}

pub struct WeekView;

impl WeekView {
    /// Render the week grid and run any active drag gesture.
    pub fn show(
        ui: &mut egui::Ui,
        store: &dyn DataStore,
        overlay: &mut Overlay,
        controller: &mut DragController,
        palette: &GridPalette,
        current_date: NaiveDate,
    ) -> Option<DragCommit> {
        let metrics = controller.metrics();
        let start = week_start(current_date);
        let days = week_schedule(store, overlay, start);
        let today = Local::now().date_naive();

        let mut commit = None;
        ScrollArea::vertical().id_source("week_grid").show(ui, |ui| {
            let width = ui.available_width().max(TIME_LABEL_WIDTH + 7.0 * 60.0);
            let (rect, _) = ui.allocate_exact_size(
                Vec2::new(width, HEADER_HEIGHT + metrics.grid_height() + 4.0),
                Sense::hover(),
            );

            let body = Rect::from_min_max(
                Pos2::new(rect.left() + TIME_LABEL_WIDTH, rect.top() + HEADER_HEIGHT),
                Pos2::new(
                    rect.right(),
                    rect.top() + HEADER_HEIGHT + metrics.grid_height(),
                ),
            );
            draw_time_grid(ui, body, &metrics, palette);

            let day_width = (body.width() - 6.0 * COLUMN_SPACING) / 7.0;
            let columns: Vec<DayColumn> = days
                .iter()
                .enumerate()
                .map(|(i, (date, _))| {
                    let x_min = body.left() + i as f32 * (day_width + COLUMN_SPACING);
                    DayColumn::new(*date, x_min, x_min + day_width)
                })
                .collect();

            Self::draw_headers(ui, &columns, rect.top(), today, palette);

            // Per-day committed layouts, dragged task excluded everywhere;
            // the controller also hides the origin copy during a cross-day
            // move via `hidden_in`.
            let mut day_items: Vec<Vec<(GridItem, LayoutBox)>> = Vec::with_capacity(7);
            for (day_index, (_, schedule)) in days.iter().enumerate() {
                let hidden = controller.hidden_in(day_index);
                let items = schedule
                    .timed
                    .iter()
                    .filter(|item| {
                        item.task.id.is_some()
                            && item.task.id != controller.active_task()
                            && item.task.id != hidden
                    })
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
                day_items.push(items);
            }

            // Drop-target highlight on the hovered column.
            if let Some((_, hovered, _)) = controller.preview() {
                if let Some(column) = columns.get(hovered) {
                    let highlight = Rect::from_min_max(
                        Pos2::new(column.x_min, body.top()),
                        Pos2::new(column.x_max, body.bottom()),
                    );
                    ui.painter()
                        .rect_filled(highlight, Rounding::ZERO, palette.drop_highlight);
                }
            }

            for (day_index, items) in day_items.iter().enumerate() {
                let slots = Self::packed_slots(items);
                for ((item, layout), slot) in items.iter().zip(&slots) {
                    let rect = bar_rect(
                        &columns[day_index],
                        body.top(),
                        *layout,
                        slot.col,
                        slot.total,
                    );
                    draw_event_bar(ui, rect, &item.task, item.time, palette);
                    interact_bar(
                        ui,
                        rect,
                        item,
                        day_index,
                        *layout,
                        body.top(),
                        &columns,
                        controller,
                        overlay,
                    );
                }
            }

            commit = drive_gesture(
                ui,
                body.top(),
                &columns,
                |day| {
                    day_items
                        .get(day)
                        .map(|items| items.iter().map(|(_, l)| *l).collect())
                        .unwrap_or_default()
                },
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

    fn packed_slots(items: &[(GridItem, LayoutBox)]) -> Vec<ColumnSlot> {
        let intervals: Vec<Interval> = items
            .iter()
            .map(|(item, _)| {
                let start = minutes_since_midnight(item.time);
                Interval::new(start, start + item.duration_min.max(1))
            })
            .collect();
        pack_columns(&intervals)
    }

    fn draw_headers(
        ui: &egui::Ui,
        columns: &[DayColumn],
        top: f32,
        today: NaiveDate,
        palette: &GridPalette,
    ) {
        let painter = ui.painter();
        for column in columns {
            let color = if column.date == today {
                palette.today_header
            } else {
                palette.header_text
            };
            painter.text(
                Pos2::new((column.x_min + column.x_max) / 2.0, top + 4.0),
                Align2::CENTER_TOP,
                format!("{} {}", column.date.format("%a"), column.date.day()),
                FontId::proportional(11.0),
                color,
            );
        }
    }
}
