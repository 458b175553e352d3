//! Country boundary layer data structures.

use super::GeoBounds;
use eframe::egui::Color32;
use geo_types::Coord;
use geojson::{Feature, GeoJson, Geometry, Value};

/// Stroke color of the boundary outlines (#3388ff).
pub const BOUNDARY_COLOR: Color32 = Color32::from_rgb(0x33, 0x88, 0xff);

/// Stroke width of the boundary outlines.
pub const BOUNDARY_LINE_WIDTH: f32 = 2.0;

/// A geographic feature that can be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoFeature {
    /// A series of connected line segments
    LineString(Vec<Coord<f64>>),
    /// A closed polygon; the first ring is the exterior
    Polygon {
        exterior: Vec<Coord<f64>>,
        holes: Vec<Vec<Coord<f64>>>,
    },
    /// A single point
    Point(Coord<f64>),
}

impl GeoFeature {
    pub fn bounds(&self) -> Option<GeoBounds> {
        match self {
            GeoFeature::LineString(coords) => GeoBounds::from_coords(coords),
            GeoFeature::Polygon { exterior, .. } => GeoBounds::from_coords(exterior),
            GeoFeature::Point(coord) => GeoBounds::from_coords(std::iter::once(coord)),
        }
    }
}

/// A feature together with its precomputed bounding box, for view culling.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    pub feature: GeoFeature,
    pub bounds: GeoBounds,
}

/// Country boundary overlay. Loaded once, immutable afterwards.
#[derive(Debug, Clone)]
pub struct BoundaryLayer {
    pub features: Vec<BoundaryFeature>,
    pub color: Color32,
    pub line_width: f32,
}

impl Default for BoundaryLayer {
    fn default() -> Self {
        Self {
            features: Vec::new(),
            color: BOUNDARY_COLOR,
            line_width: BOUNDARY_LINE_WIDTH,
        }
    }
}

impl BoundaryLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a GeoJSON document into a new layer.
    pub fn from_geojson(geojson_str: &str) -> Result<Self, geojson::Error> {
        let mut layer = Self::new();
        layer.load_from_geojson(geojson_str)?;
        Ok(layer)
    }

    /// Loads features from GeoJSON data.
    ///
    /// Multi-part geometries are split into one feature per part, and
    /// geometry collections contribute every member.
    pub fn load_from_geojson(&mut self, geojson_str: &str) -> Result<(), geojson::Error> {
        let geojson: GeoJson = geojson_str.parse()?;

        match geojson {
            GeoJson::FeatureCollection(fc) => {
                for feature in &fc.features {
                    self.push_feature(feature);
                }
            }
            GeoJson::Feature(f) => self.push_feature(&f),
            GeoJson::Geometry(g) => self.push_geometry(&g),
        }

        Ok(())
    }

    /// Number of polygon parts in the layer.
    pub fn polygon_count(&self) -> usize {
        self.features
            .iter()
            .filter(|f| matches!(f.feature, GeoFeature::Polygon { .. }))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    fn push_feature(&mut self, feature: &Feature) {
        if let Some(geometry) = feature.geometry.as_ref() {
            self.push_geometry(geometry);
        }
    }

    fn push_geometry(&mut self, geometry: &Geometry) {
        for feature in convert_geometry(&geometry.value) {
            if let Some(bounds) = feature.bounds() {
                self.features.push(BoundaryFeature { feature, bounds });
            }
        }
    }
}

fn to_coord(position: &[f64]) -> Option<Coord<f64>> {
    match position {
        [x, y, ..] if x.is_finite() && y.is_finite() => Some(Coord { x: *x, y: *y }),
        _ => None,
    }
}

fn to_path(positions: &[Vec<f64>]) -> Vec<Coord<f64>> {
    positions.iter().filter_map(|p| to_coord(p)).collect()
}

fn to_polygon(rings: &[Vec<Vec<f64>>]) -> Option<GeoFeature> {
    let (exterior, holes) = rings.split_first()?;
    let exterior = to_path(exterior);
    if exterior.len() < 3 {
        return None;
    }
    Some(GeoFeature::Polygon {
        exterior,
        holes: holes.iter().map(|ring| to_path(ring)).collect(),
    })
}

fn convert_geometry(value: &Value) -> Vec<GeoFeature> {
    match value {
        Value::Point(position) => to_coord(position).map(GeoFeature::Point).into_iter().collect(),
        Value::MultiPoint(points) => points
            .iter()
            .filter_map(|p| to_coord(p))
            .map(GeoFeature::Point)
            .collect(),
        Value::LineString(line) => vec![GeoFeature::LineString(to_path(line))],
        Value::MultiLineString(lines) => lines
            .iter()
            .map(|line| GeoFeature::LineString(to_path(line)))
            .collect(),
        Value::Polygon(rings) => to_polygon(rings).into_iter().collect(),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .filter_map(|rings| to_polygon(rings))
            .collect(),
        Value::GeometryCollection(geometries) => geometries
            .iter()
            .flat_map(|g| convert_geometry(&g.value))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTRIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[29.0, -1.0], [35.0, -1.0], [35.0, 4.0], [29.0, 4.0], [29.0, -1.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": null,
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[40.0, -12.0], [41.0, -12.0], [41.0, -11.0], [40.0, -12.0]]],
                        [[[42.0, -12.0], [43.0, -12.0], [43.0, -11.0], [42.0, -12.0]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": {"name": "no geometry"},
                "geometry": null
            }
        ]
    }"#;

    #[test]
    fn test_load_feature_collection() {
        let layer = BoundaryLayer::from_geojson(COUNTRIES).unwrap();
        assert_eq!(layer.polygon_count(), 3);
        assert_eq!(layer.color, BOUNDARY_COLOR);
        assert_eq!(layer.line_width, 2.0);

        assert_eq!(layer.features[0].bounds, GeoBounds::new(29.0, -12.0, 35.0, 4.0));
        assert_eq!(layer.features[2].bounds, GeoBounds::new(42.0, -12.0, 43.0, -11.0));
    }

    #[test]
    fn test_load_bare_geometry() {
        let layer = BoundaryLayer::from_geojson(
            r#"{"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}"#,
        )
        .unwrap();
        assert_eq!(layer.polygon_count(), 1);
    }

    #[test]
    fn test_degenerate_polygon_skipped() {
        let layer = BoundaryLayer::from_geojson(
            r#"{"type": "Polygon", "coordinates": [[[0, 0], [1, 0]]]}"#,
        )
        .unwrap();
        assert!(layer.is_empty());
    }

    #[test]
    fn test_invalid_geojson_is_an_error() {
        assert!(BoundaryLayer::from_geojson("not json").is_err());
        assert!(BoundaryLayer::from_geojson(r#"{"type": "Nope"}"#).is_err());
    }
}
