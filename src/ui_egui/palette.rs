// Grid and category colors.

use egui::Color32;

use crate::models::task::Category;

pub fn category_color(category: Category) -> Color32 {
    match category {
        Category::Health => Color32::from_rgb(76, 175, 130),
        Category::Personal => Color32::from_rgb(100, 150, 220),
        Category::Learning => Color32::from_rgb(170, 120, 220),
        Category::Work => Color32::from_rgb(220, 150, 90),
        Category::Mindfulness => Color32::from_rgb(90, 190, 200),
        Category::Social => Color32::from_rgb(220, 120, 160),
        Category::Other => Color32::from_rgb(140, 145, 155),
    }
}

#[derive(Clone, Copy)]
pub struct GridPalette {
    pub grid_bg: Color32,
    pub hour_line: Color32,
    pub quarter_line: Color32,
    pub time_label: Color32,
    pub bar_text: Color32,
    pub preview_fill_alpha: u8,
    pub preview_outline: Color32,
    pub drop_highlight: Color32,
    pub header_text: Color32,
    pub today_header: Color32,
}

impl GridPalette {
    pub fn dark() -> Self {
        Self {
            grid_bg: Color32::from_rgb(26, 28, 32),
            hour_line: Color32::from_rgb(55, 58, 64),
            quarter_line: Color32::from_rgb(38, 40, 45),
            time_label: Color32::from_rgb(130, 135, 145),
            bar_text: Color32::from_rgb(240, 240, 245),
            preview_fill_alpha: 140,
            preview_outline: Color32::from_rgb(255, 255, 255),
            drop_highlight: Color32::from_rgba_unmultiplied(120, 170, 255, 14),
            header_text: Color32::from_rgb(200, 205, 215),
            today_header: Color32::from_rgb(120, 180, 255),
        }
    }
}
