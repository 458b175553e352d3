//! UI modules for the station map application.
//!
//! The UI is split into distinct panels:
//! - Top bar: Title, place search, and status
//! - Central canvas: Slippy map with boundary and station overlays
//! - Bottom panel: Pointer coordinates, zoom, and counts
//! - Right panel: Layer switcher, draw and edit tools

mod bottom_panel;
mod canvas;
pub mod colors;
mod right_panel;
mod top_bar;

pub use bottom_panel::render_bottom_panel;
pub use canvas::render_canvas;
pub use right_panel::render_right_panel;
pub use top_bar::render_top_bar;
