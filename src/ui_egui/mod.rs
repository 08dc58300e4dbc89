mod app;
mod palette;
pub mod toast;
pub mod views;

pub use app::HabitApp;
