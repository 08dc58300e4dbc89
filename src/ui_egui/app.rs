//! Application shell: top bar, task sidebar, sleep panel and the central
//! day/week grid.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{Days, Local, NaiveDate};
use egui::{Color32, RichText, Vec2};

use crate::grid::{DragController, GridMetrics, Overlay};
use crate::models::settings::Settings;
use crate::models::sleep::SleepEntry;
use crate::models::task::{Category, Frequency, Task};
use crate::services::completion::{is_completed, toggle};
use crate::services::schedule::commit_drag;
use crate::services::settings::SettingsService;
use crate::services::sleep;
use crate::services::store::{DataStore, MemoryStore};
use crate::ui_egui::palette::{category_color, GridPalette};
use crate::ui_egui::toast::ToastManager;
use crate::ui_egui::views::day_view::DayView;
use crate::ui_egui::views::week_view::{week_start, WeekView};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ViewType {
    Day,
    Week,
}

impl ViewType {
    fn label(&self) -> &'static str {
        match self {
            ViewType::Day => "Day",
            ViewType::Week => "Week",
        }
    }

    fn from_settings(s: &str) -> Self {
        match s {
            "Day" => ViewType::Day,
            _ => ViewType::Week,
        }
    }
}

/// Sidebar form state for adding a task.
struct TaskForm {
    name: String,
    category: Category,
    frequency: Frequency,
    scheduled_time: String,
    duration_minutes: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: Category::Other,
            frequency: Frequency::Daily,
            scheduled_time: String::new(),
            duration_minutes: String::new(),
        }
    }
}

#[derive(Default)]
struct SleepForm {
    sleep_time: String,
    wake_time: String,
}

pub struct HabitApp {
    store: MemoryStore,
    overlay: Overlay,
    controller: DragController,
    settings: Settings,
    settings_service: SettingsService,
    current_view: ViewType,
    current_date: NaiveDate,
    palette: GridPalette,
    toasts: ToastManager,
    /// Set by store change subscriptions; drained into a repaint request.
    store_dirty: Rc<Cell<bool>>,
    task_form: TaskForm,
    sleep_form: SleepForm,
}

impl HabitApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings_service = SettingsService::from_project_dirs();
        let settings = settings_service.load();
        log::info!(
            "Loaded settings: view={}, day_px={}, week_px={}",
            settings.current_view,
            settings.day_px_per_hour,
            settings.week_px_per_hour
        );

        let current_view = ViewType::from_settings(&settings.current_view);
        let metrics = match current_view {
            ViewType::Day => GridMetrics::with_density(settings.day_px_per_hour),
            ViewType::Week => GridMetrics::with_density(settings.week_px_per_hour),
        };

        let mut store = MemoryStore::new();
        seed_starter_tasks(&mut store);

        let store_dirty = Rc::new(Cell::new(false));
        let dirty = Rc::clone(&store_dirty);
        store.subscribe(Box::new(move |_| dirty.set(true)));

        Self {
            store,
            overlay: Overlay::new(),
            controller: DragController::new(metrics),
            settings,
            settings_service,
            current_view,
            current_date: Local::now().date_naive(),
            palette: GridPalette::dark(),
            toasts: ToastManager::new(),
            store_dirty,
            task_form: TaskForm::default(),
            sleep_form: SleepForm::default(),
        }
    }

    fn switch_view(&mut self, view: ViewType) {
        if self.current_view == view {
            return;
        }
        self.current_view = view;
        let density = match view {
            ViewType::Day => self.settings.day_px_per_hour,
            ViewType::Week => self.settings.week_px_per_hour,
        };
        self.controller
            .set_metrics(GridMetrics::with_density(density));
        self.settings.current_view = view.label().to_string();
        self.persist_settings();
    }

    fn persist_settings(&mut self) {
        if let Err(err) = self.settings_service.save(&self.settings) {
            log::error!("Failed to save settings: {err:#}");
            self.toasts.error("Could not save settings");
        }
    }

    fn navigate(&mut self, days: i64) {
        let step = match self.current_view {
            ViewType::Day => days,
            ViewType::Week => days * 7,
        };
        let next = if step >= 0 {
            self.current_date.checked_add_days(Days::new(step as u64))
        } else {
            self.current_date.checked_sub_days(Days::new((-step) as u64))
        };
        if let Some(date) = next {
            self.current_date = date;
        }
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("HabitGrid");
                ui.separator();

                for view in [ViewType::Day, ViewType::Week] {
                    if ui
                        .selectable_label(self.current_view == view, view.label())
                        .clicked()
                    {
                        self.switch_view(view);
                    }
                }
                ui.separator();

                if ui.button("◀").clicked() {
                    self.navigate(-1);
                }
                if ui.button("Today").clicked() {
                    self.current_date = Local::now().date_naive();
                }
                if ui.button("▶").clicked() {
                    self.navigate(1);
                }

                let label = match self.current_view {
                    ViewType::Day => self.current_date.format("%A, %B %d %Y").to_string(),
                    ViewType::Week => {
                        let start = week_start(self.current_date);
                        format!("Week of {}", start.format("%B %d %Y"))
                    }
                };
                ui.label(RichText::new(label).strong());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.settings.show_sleep_panel, "😴 Sleep")
                        .clicked()
                    {
                        self.settings.show_sleep_panel = !self.settings.show_sleep_panel;
                        self.persist_settings();
                    }
                });
            });
        });
    }

    fn sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("task_sidebar")
            .default_width(230.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.heading(format!("Due {}", self.current_date.format("%b %d")));
                ui.separator();

                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.task_checklist(ui);
                    ui.add_space(8.0);
                    ui.separator();
                    self.add_task_form(ui);
                    if self.settings.show_sleep_panel {
                        ui.add_space(8.0);
                        ui.separator();
                        self.sleep_panel(ui);
                    }
                });
            });
    }

    fn task_checklist(&mut self, ui: &mut egui::Ui) {
        let date = self.current_date;
        let due: Vec<Task> = self
            .store
            .list_tasks()
            .into_iter()
            .filter(|t| t.is_active && t.occurs_on(date))
            .collect();

        if due.is_empty() {
            ui.label(RichText::new("Nothing due today").weak());
            return;
        }

        let now = Local::now().time();
        for task in due {
            let Some(id) = task.id else { continue };
            ui.horizontal(|ui| {
                let mut checked = is_completed(&self.store, id, date);
                if ui.checkbox(&mut checked, "").changed() {
                    if let Err(err) = toggle(&mut self.store, id, date, now) {
                        log::error!("Completion toggle failed: {err}");
                        self.toasts
                            .error(format!("Could not update '{}'", task.name));
                    }
                }

                let (rect, _) = ui.allocate_exact_size(Vec2::splat(10.0), egui::Sense::hover());
                ui.painter()
                    .circle_filled(rect.center(), 4.0, category_color(task.category));

                let text = if checked {
                    RichText::new(&task.name).strikethrough().weak()
                } else {
                    RichText::new(&task.name)
                };
                ui.label(text);

                if task.streak > 0 {
                    ui.label(
                        RichText::new(format!("🔥{}", task.streak))
                            .small()
                            .color(Color32::from_rgb(230, 150, 60)),
                    );
                }
            });
        }
    }

    fn add_task_form(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Add task").show(ui, |ui| {
            ui.text_edit_singleline(&mut self.task_form.name);

            egui::ComboBox::from_label("Category")
                .selected_text(self.task_form.category.label())
                .show_ui(ui, |ui| {
                    for category in Category::ALL {
                        ui.selectable_value(
                            &mut self.task_form.category,
                            category,
                            category.label(),
                        );
                    }
                });

            egui::ComboBox::from_label("Frequency")
                .selected_text(self.task_form.frequency.to_string())
                .show_ui(ui, |ui| {
                    for frequency in [
                        Frequency::Daily,
                        Frequency::Weekdays,
                        Frequency::Weekends,
                        Frequency::Weekly(chrono::Weekday::Mon),
                        Frequency::Once,
                    ] {
                        ui.selectable_value(
                            &mut self.task_form.frequency,
                            frequency,
                            frequency.to_string(),
                        );
                    }
                });

            ui.horizontal(|ui| {
                ui.label("Time");
                ui.add(
                    egui::TextEdit::singleline(&mut self.task_form.scheduled_time)
                        .hint_text("HH:MM")
                        .desired_width(60.0),
                );
                ui.label("Minutes");
                ui.add(
                    egui::TextEdit::singleline(&mut self.task_form.duration_minutes)
                        .hint_text("60")
                        .desired_width(40.0),
                );
            });

            if ui.button("Create").clicked() {
                self.submit_task_form();
            }
        });
    }

    fn submit_task_form(&mut self) {
        let mut builder = Task::builder()
            .name(self.task_form.name.trim())
            .category(self.task_form.category)
            .frequency(self.task_form.frequency);

        if !self.task_form.scheduled_time.trim().is_empty() {
            builder = builder.scheduled_time(self.task_form.scheduled_time.trim());
        }
        if let Ok(minutes) = self.task_form.duration_minutes.trim().parse::<i64>() {
            builder = builder.duration_minutes(minutes);
        }
        if self.task_form.frequency == Frequency::Once {
            builder = builder.scheduled_date(self.current_date.format("%Y-%m-%d").to_string());
        }

        let result = builder.build().and_then(|task| {
            self.store.create_task(task).map_err(|e| e.to_string())
        });

        match result {
            Ok(task) => {
                self.toasts.success(format!("Added '{}'", task.name));
                self.task_form = TaskForm::default();
            }
            Err(err) => self.toasts.error(err),
        }
    }

    fn sleep_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Sleep");

        let start = week_start(self.current_date);
        match sleep::weekly_score(&self.store, start) {
            Some(score) => {
                ui.label(
                    RichText::new(format!("Weekly score: {score:.1} / 10"))
                        .strong()
                        .color(Color32::from_rgb(130, 190, 255)),
                );
            }
            None => {
                ui.label(RichText::new("No sleep logged this week").weak());
            }
        }

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label("Slept");
            ui.add(
                egui::TextEdit::singleline(&mut self.sleep_form.sleep_time)
                    .hint_text("23:00")
                    .desired_width(54.0),
            );
            ui.label("Woke");
            ui.add(
                egui::TextEdit::singleline(&mut self.sleep_form.wake_time)
                    .hint_text("07:00")
                    .desired_width(54.0),
            );
        });

        if ui.button("Log night").clicked() {
            let result = SleepEntry::new(
                self.current_date,
                self.sleep_form.sleep_time.trim(),
                self.sleep_form.wake_time.trim(),
            )
            .and_then(|entry| {
                sleep::log_night(&mut self.store, entry).map_err(|e| e.to_string())
            });
            match result {
                Ok(entry) => {
                    self.toasts
                        .success(format!("Logged sleep for {}", entry.date));
                    self.sleep_form = SleepForm::default();
                }
                Err(err) => self.toasts.error(err),
            }
        }
    }

    fn central_grid(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let commit = match self.current_view {
                ViewType::Day => DayView::show(
                    ui,
                    &self.store,
                    &mut self.overlay,
                    &mut self.controller,
                    &self.palette,
                    self.current_date,
                ),
                ViewType::Week => WeekView::show(
                    ui,
                    &self.store,
                    &mut self.overlay,
                    &mut self.controller,
                    &self.palette,
                    self.current_date,
                ),
            };

            if let Some(commit) = commit {
                match commit_drag(&mut self.store, &mut self.overlay, &commit) {
                    Ok(task) => {
                        self.toasts.success(format!("Moved '{}'", task.name));
                    }
                    Err(err) => {
                        self.toasts.error(format!("Could not move task: {err}"));
                    }
                }
            }
        });
    }
}

impl eframe::App for HabitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.store_dirty.replace(false) {
            ctx.request_repaint();
        }

        self.top_bar(ctx);
        self.sidebar(ctx);
        self.central_grid(ctx);
        self.toasts.render(ctx);
    }
}

/// First-run data so the grid is not empty before the backend is wired up.
fn seed_starter_tasks(store: &mut MemoryStore) {
    if !store.list_tasks().is_empty() {
        return;
    }

    let starters = [
        ("Morning run", Category::Health, Frequency::Daily, Some("07:00"), Some(45)),
        ("Deep work", Category::Work, Frequency::Weekdays, Some("09:00"), Some(90)),
        ("Read", Category::Learning, Frequency::Daily, Some("21:30"), Some(30)),
        ("Meditate", Category::Mindfulness, Frequency::Daily, None, Some(15)),
        (
            "Call family",
            Category::Social,
            Frequency::Weekly(chrono::Weekday::Sun),
            None,
            None,
        ),
    ];

    for (name, category, frequency, time, minutes) in starters {
        let mut builder = Task::builder()
            .name(name)
            .category(category)
            .frequency(frequency);
        if let Some(time) = time {
            builder = builder.scheduled_time(time);
        }
        if let Some(minutes) = minutes {
            builder = builder.duration_minutes(minutes);
        }
        match builder.build() {
            Ok(task) => {
                if let Err(err) = store.create_task(task) {
                    log::warn!("Could not seed task '{name}': {err}");
                }
            }
            Err(err) => log::warn!("Invalid starter task '{name}': {err}"),
        }
    }
    log::info!("Seeded starter tasks");
}
