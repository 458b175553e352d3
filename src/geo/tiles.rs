//! Base tile layers.

use eframe::egui;
use serde::{Deserialize, Serialize};
use walkers::sources::{Attribution, OpenStreetMap, TileSource};
use walkers::{HttpOptions, HttpTiles, TileId, Tiles};

/// Mutually exclusive background layers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseLayer {
    #[default]
    OpenStreetMap,
    GoogleSatellite,
}

impl BaseLayer {
    pub fn label(&self) -> &'static str {
        match self {
            BaseLayer::OpenStreetMap => "OpenStreetMap",
            BaseLayer::GoogleSatellite => "Google Satellite",
        }
    }

    pub fn all() -> &'static [BaseLayer] {
        &[BaseLayer::OpenStreetMap, BaseLayer::GoogleSatellite]
    }

    /// Deepest zoom level the tile server provides.
    pub fn max_zoom(&self) -> u8 {
        match self {
            BaseLayer::OpenStreetMap => 19,
            BaseLayer::GoogleSatellite => 20,
        }
    }

    pub fn attribution(&self) -> &'static str {
        match self {
            BaseLayer::OpenStreetMap => "© OpenStreetMap contributors",
            BaseLayer::GoogleSatellite => "© Google",
        }
    }
}

/// Google satellite imagery tiles.
pub struct GoogleSatellite;

impl TileSource for GoogleSatellite {
    fn tile_url(&self, tile_id: TileId) -> String {
        format!(
            "https://mt1.google.com/vt/lyrs=s&x={}&y={}&z={}",
            tile_id.x, tile_id.y, tile_id.zoom
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "© Google",
            url: "https://www.google.com/permissions/geoguidelines/",
            logo_light: None,
            logo_dark: None,
        }
    }
}

/// Tile downloaders for every base layer. Both stay alive so switching
/// layers keeps the already fetched tiles.
pub struct BaseTiles {
    osm: HttpTiles,
    satellite: HttpTiles,
}

impl BaseTiles {
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            osm: HttpTiles::with_options(OpenStreetMap, HttpOptions::default(), ctx.to_owned()),
            satellite: HttpTiles::with_options(
                GoogleSatellite,
                HttpOptions::default(),
                ctx.to_owned(),
            ),
        }
    }

    /// Tile provider for the selected base layer.
    pub fn get_mut(&mut self, layer: BaseLayer) -> &mut dyn Tiles {
        match layer {
            BaseLayer::OpenStreetMap => &mut self.osm,
            BaseLayer::GoogleSatellite => &mut self.satellite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satellite_tile_url() {
        let url = GoogleSatellite.tile_url(TileId {
            x: 10,
            y: 20,
            zoom: 5,
        });
        assert_eq!(url, "https://mt1.google.com/vt/lyrs=s&x=10&y=20&z=5");
    }

    #[test]
    fn test_max_zoom_per_layer() {
        assert_eq!(BaseLayer::OpenStreetMap.max_zoom(), 19);
        assert_eq!(BaseLayer::GoogleSatellite.max_zoom(), 20);
        assert_eq!(BaseLayer::default(), BaseLayer::OpenStreetMap);
    }
}
