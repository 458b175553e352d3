//! Geographic bounding boxes and fit-to-bounds zoom computation.

use super::projection::{inverse_mercator_y, mercator_x, mercator_y, TILE_SIZE};
use geo_types::Coord;

/// Axis-aligned geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl GeoBounds {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Smallest box containing all coordinates, or None for an empty input.
    pub fn from_coords<'a>(coords: impl IntoIterator<Item = &'a Coord<f64>>) -> Option<Self> {
        coords.into_iter().fold(None, |acc: Option<Self>, c| {
            Some(match acc {
                Some(mut bounds) => {
                    bounds.extend(*c);
                    bounds
                }
                None => Self::new(c.x, c.y, c.x, c.y),
            })
        })
    }

    pub fn extend(&mut self, coord: Coord<f64>) {
        self.min_lon = self.min_lon.min(coord.x);
        self.min_lat = self.min_lat.min(coord.y);
        self.max_lon = self.max_lon.max(coord.x);
        self.max_lat = self.max_lat.max(coord.y);
    }

    /// Checks overlap with another box, widening this one by `margin_deg`.
    pub fn intersects(&self, other: &GeoBounds, margin_deg: f64) -> bool {
        !(other.max_lon < self.min_lon - margin_deg
            || other.min_lon > self.max_lon + margin_deg
            || other.max_lat < self.min_lat - margin_deg
            || other.min_lat > self.max_lat + margin_deg)
    }

    /// Center of the box in projected space, so it lands mid-screen after a fit.
    pub fn center(&self) -> Coord<f64> {
        let mid_y = (mercator_y(self.min_lat) + mercator_y(self.max_lat)) / 2.0;
        Coord {
            x: (self.min_lon + self.max_lon) / 2.0,
            y: inverse_mercator_y(mid_y),
        }
    }

    /// Largest whole zoom level at which the box fits in a `width` x `height`
    /// pixel viewport, clamped to `[0, max_zoom]`.
    pub fn fit_zoom(&self, width: f32, height: f32, max_zoom: f64) -> f64 {
        let span_x = (mercator_x(self.max_lon) - mercator_x(self.min_lon)).abs() * TILE_SIZE;
        let span_y = (mercator_y(self.min_lat) - mercator_y(self.max_lat)).abs() * TILE_SIZE;

        let scale_x = if span_x > 0.0 {
            width as f64 / span_x
        } else {
            f64::INFINITY
        };
        let scale_y = if span_y > 0.0 {
            height as f64 / span_y
        } else {
            f64::INFINITY
        };

        let scale = scale_x.min(scale_y);
        if !scale.is_finite() {
            return max_zoom;
        }

        scale.log2().floor().clamp(0.0, max_zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_coords() {
        let coords = [
            Coord { x: 20.0, y: 10.0 },
            Coord { x: 33.0, y: -5.0 },
            Coord { x: 25.0, y: 2.0 },
        ];
        let bounds = GeoBounds::from_coords(&coords).unwrap();
        assert_eq!(bounds, GeoBounds::new(20.0, -5.0, 33.0, 10.0));
        assert!(GeoBounds::from_coords(&Vec::<Coord<f64>>::new()).is_none());
    }

    #[test]
    fn test_intersects_with_margin() {
        let view = GeoBounds::new(0.0, 0.0, 10.0, 10.0);
        let near = GeoBounds::new(10.5, 0.0, 12.0, 2.0);
        assert!(!view.intersects(&near, 0.0));
        assert!(view.intersects(&near, 1.0));
    }

    #[test]
    fn test_fit_zoom_continent_vs_city() {
        // Roughly Africa
        let africa = GeoBounds::new(-18.0, -35.0, 52.0, 38.0);
        // Roughly Nairobi
        let nairobi = GeoBounds::new(36.65, -1.45, 37.1, -1.16);

        let continent = africa.fit_zoom(1000.0, 700.0, 19.0);
        let city = nairobi.fit_zoom(1000.0, 700.0, 19.0);

        assert_eq!(continent, 3.0);
        assert!(city >= 10.0 && city <= 12.0);
    }

    #[test]
    fn test_fit_zoom_point_uses_max_zoom() {
        let point = GeoBounds::new(36.8, -1.3, 36.8, -1.3);
        assert_eq!(point.fit_zoom(800.0, 600.0, 19.0), 19.0);
    }

    #[test]
    fn test_center_of_symmetric_box() {
        let bounds = GeoBounds::new(-10.0, -20.0, 10.0, 20.0);
        let center = bounds.center();
        assert!(center.x.abs() < 1e-9);
        assert!(center.y.abs() < 1e-9);
    }
}
