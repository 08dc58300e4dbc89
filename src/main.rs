// HabitGrid
// Main entry point

use habitgrid::ui_egui::HabitApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting HabitGrid");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("HabitGrid"),
        ..Default::default()
    };

    eframe::run_native(
        "HabitGrid",
        options,
        Box::new(|cc| Ok(Box::new(HabitApp::new(cc)))),
    )
}
