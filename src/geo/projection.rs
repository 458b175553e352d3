//! Map projection and coordinate transformation.
//!
//! Handles converting between geographic coordinates (lat/lon) and
//! screen coordinates for rendering overlays on top of the tile map.
//! Uses the same spherical Web Mercator as the slippy-map tiles, so
//! overlays line up with the base layer at every zoom.

use super::GeoBounds;
use eframe::egui::{Pos2, Rect, Vec2};
use geo_types::Coord;
use std::f64::consts::PI;

/// Edge length of a single map tile in screen pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Normalized Mercator x in [0, 1] for a longitude.
pub(crate) fn mercator_x(lon: f64) -> f64 {
    (lon + 180.0) / 360.0
}

/// Normalized Mercator y in [0, 1] for a latitude (0 at the top).
pub(crate) fn mercator_y(lat: f64) -> f64 {
    let lat_rad = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0
}

pub(crate) fn inverse_mercator_x(x: f64) -> f64 {
    x * 360.0 - 180.0
}

pub(crate) fn inverse_mercator_y(y: f64) -> f64 {
    (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees()
}

/// Map projection for converting geographic to screen coordinates.
#[derive(Debug, Clone)]
pub struct MapProjection {
    /// Center of the view (x = lon, y = lat)
    pub center: Coord<f64>,
    /// Current (fractional) zoom level
    pub zoom: f64,
    /// Screen rectangle of the map widget
    pub screen_rect: Rect,
}

impl Default for MapProjection {
    fn default() -> Self {
        Self {
            center: Coord { x: 20.0, y: 0.0 },
            zoom: 3.0,
            screen_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)),
        }
    }
}

impl MapProjection {
    pub fn new(center: Coord<f64>, zoom: f64, screen_rect: Rect) -> Self {
        Self {
            center,
            zoom,
            screen_rect,
        }
    }

    /// Rebuilds the projection the map widget used for the current frame.
    ///
    /// `project` must map a (lon, lat) coordinate to its screen position.
    /// The zoom is recovered from the pixel distance between two points on
    /// the equator, and the center from where the origin lands; a second
    /// pass near the estimated center removes the rounding error of the
    /// far-away reference points.
    ///
    /// This duplicates the widget's own projector, but the result is a plain
    /// value: hit testing, culling and screen-to-geo conversion run on it
    /// without a live `walkers::Projector`, which keeps them unit-testable.
    pub fn calibrate(project: impl Fn(Coord<f64>) -> Pos2, screen_rect: Rect) -> Self {
        let origin = project(Coord { x: 0.0, y: 0.0 });
        let east = project(Coord { x: 90.0, y: 0.0 });

        let world_size = (4.0 * (east.x - origin.x) as f64).max(f64::MIN_POSITIVE);
        let zoom = (world_size / TILE_SIZE).log2();

        let screen_center = screen_rect.center();
        let coarse = Self::world_to_geo(
            world_size,
            world_size / 2.0 + (screen_center.x - origin.x) as f64,
            world_size / 2.0 + (screen_center.y - origin.y) as f64,
        );

        let landed = project(coarse);
        let (coarse_x, coarse_y) = Self::geo_to_world(world_size, coarse);
        let center = Self::world_to_geo(
            world_size,
            coarse_x + (screen_center.x - landed.x) as f64,
            coarse_y + (screen_center.y - landed.y) as f64,
        );

        Self {
            center,
            zoom,
            screen_rect,
        }
    }

    /// Size of the whole world in pixels at the current zoom.
    pub fn world_size(&self) -> f64 {
        TILE_SIZE * 2_f64.powf(self.zoom)
    }

    fn geo_to_world(world_size: f64, coord: Coord<f64>) -> (f64, f64) {
        (
            mercator_x(coord.x) * world_size,
            mercator_y(coord.y) * world_size,
        )
    }

    fn world_to_geo(world_size: f64, x: f64, y: f64) -> Coord<f64> {
        Coord {
            x: inverse_mercator_x(x / world_size),
            y: inverse_mercator_y(y / world_size),
        }
    }

    /// Converts geographic coordinates (lon, lat) to screen position.
    pub fn geo_to_screen(&self, coord: Coord<f64>) -> Pos2 {
        let world_size = self.world_size();
        let (x, y) = Self::geo_to_world(world_size, coord);
        let (center_x, center_y) = Self::geo_to_world(world_size, self.center);
        let screen_center = self.screen_rect.center();

        Pos2::new(
            screen_center.x + (x - center_x) as f32,
            screen_center.y + (y - center_y) as f32,
        )
    }

    /// Converts screen position to geographic coordinates (lon, lat).
    pub fn screen_to_geo(&self, pos: Pos2) -> Coord<f64> {
        let world_size = self.world_size();
        let (center_x, center_y) = Self::geo_to_world(world_size, self.center);
        let screen_center = self.screen_rect.center();

        Self::world_to_geo(
            world_size,
            center_x + (pos.x - screen_center.x) as f64,
            center_y + (pos.y - screen_center.y) as f64,
        )
    }

    /// Returns the visible geographic bounds.
    pub fn visible_bounds(&self) -> GeoBounds {
        let top_left = self.screen_to_geo(self.screen_rect.left_top());
        let bottom_right = self.screen_to_geo(self.screen_rect.right_bottom());

        GeoBounds::new(
            top_left.x.min(bottom_right.x),
            bottom_right.y.min(top_left.y),
            top_left.x.max(bottom_right.x),
            bottom_right.y.max(top_left.y),
        )
    }

    /// Checks if a bounding box intersects with the visible bounds.
    pub fn bbox_visible(&self, bounds: &GeoBounds) -> bool {
        self.visible_bounds().intersects(bounds, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection(center: Coord<f64>, zoom: f64) -> MapProjection {
        MapProjection::new(
            center,
            zoom,
            Rect::from_min_size(Pos2::new(0.0, 40.0), Vec2::new(1000.0, 700.0)),
        )
    }

    #[test]
    fn test_center_maps_to_screen_center() {
        let proj = projection(Coord { x: 20.0, y: 0.0 }, 3.0);
        let pos = proj.geo_to_screen(proj.center);
        assert!((pos.x - 500.0).abs() < 0.01);
        assert!((pos.y - 390.0).abs() < 0.01);
    }

    #[test]
    fn test_screen_to_geo_inverts_geo_to_screen() {
        let proj = projection(Coord { x: 36.8, y: -1.3 }, 7.0);
        let nairobi_east = Coord { x: 37.2, y: -1.1 };
        let back = proj.screen_to_geo(proj.geo_to_screen(nairobi_east));
        assert!((back.x - nairobi_east.x).abs() < 1e-3);
        assert!((back.y - nairobi_east.y).abs() < 1e-3);
    }

    #[test]
    fn test_north_is_up() {
        let proj = projection(Coord { x: 0.0, y: 0.0 }, 4.0);
        let north = proj.geo_to_screen(Coord { x: 0.0, y: 10.0 });
        let south = proj.geo_to_screen(Coord { x: 0.0, y: -10.0 });
        assert!(north.y < south.y);
    }

    #[test]
    fn test_calibrate_recovers_view() {
        let truth = projection(Coord { x: 18.4, y: -33.9 }, 9.4);
        let calibrated = MapProjection::calibrate(|c| truth.geo_to_screen(c), truth.screen_rect);

        assert!((calibrated.zoom - truth.zoom).abs() < 1e-3);
        assert!((calibrated.center.x - truth.center.x).abs() < 1e-4);
        assert!((calibrated.center.y - truth.center.y).abs() < 1e-4);
    }

    #[test]
    fn test_visible_bounds_contain_center() {
        let proj = projection(Coord { x: 20.0, y: 5.0 }, 5.0);
        let bounds = proj.visible_bounds();
        assert!((bounds.min_lon..=bounds.max_lon).contains(&proj.center.x));
        assert!((bounds.min_lat..=bounds.max_lat).contains(&proj.center.y));
        assert!(bounds.min_lat < bounds.max_lat);
        assert!(bounds.min_lon < bounds.max_lon);
    }
}
