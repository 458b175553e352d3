//! Geographic layer system for map overlays.
//!
//! This module provides the map projection, the country boundary layer,
//! the base tile layers and the painter helpers used to draw overlays.

mod bounds;
mod layer;
mod projection;
mod renderer;
mod tiles;

pub use bounds::GeoBounds;
pub use layer::{BoundaryLayer, GeoFeature};
pub use projection::MapProjection;
pub use renderer::{
    pin_rect, render_boundaries, render_handle, render_label, render_path, render_pin,
    render_popup, POPUP_ANCHOR,
};
pub use tiles::{BaseLayer, BaseTiles};
