//! Map configuration.
//!
//! In the browser the configuration is persisted to localStorage so it
//! survives page reloads. Native builds read it from the JSON file named by
//! the `STATION_MAP_CONFIG` environment variable.

use crate::geo::BaseLayer;
use serde::{Deserialize, Serialize};

/// Environment variable naming the native configuration file.
pub const CONFIG_ENV_VAR: &str = "STATION_MAP_CONFIG";

/// Resource locations and initial view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Station positions CSV
    pub stations_url: String,
    /// Country boundaries GeoJSON
    pub boundaries_url: String,
    /// Nominatim-compatible search endpoint
    pub geocoder_url: String,
    pub initial_lat: f64,
    pub initial_lon: f64,
    pub initial_zoom: f64,
    pub base_layer: BaseLayer,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            stations_url: "public/african_stations_positions_addresses.csv".to_string(),
            boundaries_url: "public/africa_countries.geojson".to_string(),
            geocoder_url: "https://nominatim.openstreetmap.org/search".to_string(),
            initial_lat: 0.0,
            initial_lon: 20.0,
            initial_zoom: 3.0,
            base_layer: BaseLayer::OpenStreetMap,
        }
    }
}

impl MapConfig {
    /// localStorage key for persisting the configuration.
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "station_map_config";

    /// Parses a configuration, falling back to defaults on error.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to parse map config: {}", e);
                Self::default()
            }
        }
    }

    /// Load the configuration from localStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return Self::default(),
        };

        let storage = match window.local_storage() {
            Ok(Some(s)) => s,
            _ => return Self::default(),
        };

        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => {
                log::info!("Loaded map config from localStorage");
                Self::from_json(&json)
            }
            _ => Self::default(),
        }
    }

    /// Load the configuration from the file named by `STATION_MAP_CONFIG`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded map config from {}", path);
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Failed to read map config {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Save the configuration to localStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return,
        };

        let storage = match window.local_storage() {
            Ok(Some(s)) => s,
            _ => return,
        };

        let json = match serde_json::to_string(self) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Failed to serialize map config: {}", e);
                return;
            }
        };

        if let Err(e) = storage.set_item(Self::STORAGE_KEY, &json) {
            log::warn!("Failed to save map config: {:?}", e);
        }
    }

    /// Save the configuration back to the `STATION_MAP_CONFIG` file, if set.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            return;
        };

        let json = match serde_json::to_string_pretty(self) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Failed to serialize map config: {}", e);
                return;
            }
        };

        if let Err(e) = std::fs::write(&path, json) {
            log::warn!("Failed to save map config {}: {}", path, e);
        }
    }
}
