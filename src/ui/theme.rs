//! Theme constants for the tic-tac-toe GUI

use egui::Color32;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(18, 18, 22);
pub const CELL_BG: Color32 = Color32::from_rgb(0, 0, 0);

// Mark colors
pub const X_MARK: Color32 = Color32::from_rgb(235, 90, 80);
pub const O_MARK: Color32 = Color32::from_rgb(80, 170, 240);

// Markers
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);
pub const FLASH: Color32 = Color32::from_rgb(255, 255, 255);

// Functions for colors that can't be const
pub fn hover_valid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 255, 255, 30)
}

pub fn hover_invalid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 50, 50, 40)
}

// Panel colors
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Status colors
pub const STATUS_THINKING: Color32 = Color32::from_rgb(255, 180, 50);
pub const STATUS_ERROR: Color32 = Color32::from_rgb(80, 60, 30);

// Sizes
pub const BOARD_MARGIN: f32 = 10.0;
pub const CELL_GAP: f32 = 5.0;
pub const MARK_INSET_RATIO: f32 = 0.22;
pub const MARK_STROKE_RATIO: f32 = 0.08;
pub const WIN_STROKE_WIDTH: f32 = 6.0;

/// Length of the flash on a freshly played cell, in seconds
pub const FLASH_SECONDS: f32 = 0.4;
