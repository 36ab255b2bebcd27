//! Colors and sizes for the billing form.
//!
//! Figures the clerk reads back to the customer (billed area, price, total)
//! are bright; reference figures and incomplete rows are dimmed.

use egui::Color32;

// =============================================================================
// TEXT
// =============================================================================
pub const HEADER_TEXT: Color32 = Color32::from_rgb(220, 220, 220);
pub const DIM_TEXT: Color32 = Color32::from_rgb(140, 145, 150);
pub const PRICE_TEXT: Color32 = Color32::from_rgb(255, 200, 100);
pub const TOTAL_TEXT: Color32 = Color32::from_rgb(255, 220, 50);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(255, 85, 50);
pub const WARNING_TEXT: Color32 = Color32::from_rgb(255, 150, 100);

// =============================================================================
// SIZES
// =============================================================================
pub const INPUT_WIDTH: f32 = 110.0;
pub const SETTINGS_INPUT_WIDTH: f32 = 120.0;
pub const TOTAL_FONT_SIZE: f32 = 18.0;
pub const GRID_SPACING: [f32; 2] = [20.0, 6.0];
