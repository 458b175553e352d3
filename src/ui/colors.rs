//! Centralized color constants for the UI.
//!
//! This module provides consistent colors across all UI panels.

use eframe::egui::Color32;

/// General UI colors for labels and values.
pub mod ui {
    use super::Color32;

    /// Muted gray for stat labels.
    pub const LABEL: Color32 = Color32::from_rgb(100, 100, 100);
    /// Slightly brighter for stat values.
    pub const VALUE: Color32 = Color32::from_rgb(160, 160, 160);
    /// Dim text color.
    pub const DIM: Color32 = Color32::from_rgb(120, 120, 130);
    /// Failure indicator.
    pub const ERROR: Color32 = Color32::from_rgb(230, 90, 90);
}

/// Colors for station markers.
pub mod stations {
    use super::Color32;

    /// Pin fill.
    pub const PIN: Color32 = Color32::from_rgb(0x2a, 0x81, 0xcb);
    /// Pin outline.
    pub const PIN_STROKE: Color32 = Color32::from_rgb(0x1a, 0x55, 0x88);
    /// Pin fill while the popup is open.
    pub const SELECTED: Color32 = Color32::from_rgb(0xcb, 0x8b, 0x2a);
}

/// Colors for user-drawn shapes.
pub mod drawn {
    use super::Color32;

    /// Finished shape outline.
    pub const SHAPE: Color32 = Color32::from_rgb(0x33, 0x88, 0xff);
    /// Drawn marker pin.
    pub const MARKER: Color32 = Color32::from_rgb(0x2a, 0xad, 0x27);
    /// Drawn marker outline.
    pub const MARKER_STROKE: Color32 = Color32::from_rgb(0x1b, 0x70, 0x19);
    /// Sketch in progress.
    pub const SKETCH: Color32 = Color32::from_rgb(0xfe, 0x57, 0xa1);

    /// Rubber band from the last vertex to the pointer - requires alpha, use function.
    pub fn guide() -> Color32 {
        Color32::from_rgba_unmultiplied(0xfe, 0x57, 0xa1, 140)
    }

    /// Highlight of the member under the pointer in delete mode - requires alpha, use function.
    pub fn delete_hover() -> Color32 {
        Color32::from_rgba_unmultiplied(230, 60, 60, 200)
    }
}
