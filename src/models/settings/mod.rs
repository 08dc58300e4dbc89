// Settings module
// App preferences persisted as TOML in the user config directory

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// "Day" or "Week"
    pub current_view: String,
    /// Pixel height of one hour in the day view.
    pub day_px_per_hour: f32,
    /// Pixel height of one hour in the week view.
    pub week_px_per_hour: f32,
    pub show_sleep_panel: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            current_view: "Week".to_string(),
            day_px_per_hour: 64.0,
            week_px_per_hour: 44.0,
            show_sleep_panel: true,
        }
    }
}
