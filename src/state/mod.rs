//! Application state management.
//!
//! This module contains all state structures used throughout the application.
//! State is organized into logical groupings that correspond to different
//! areas of functionality.

mod boundary;
mod layer;
mod overlay;
mod search;
mod settings;
pub mod url_state;
mod zoom;

pub use boundary::{BoundaryController, MembershipDecision};
pub use layer::{LayerState, OverlayKind};
pub use overlay::{MemberId, OverlayGroup, OverlayMember, Shape};
pub use search::SearchState;
pub use settings::MapConfig;
pub use zoom::{zoom_level, ZoomWatcher};

use crate::draw::{ClickOutcome, DrawState};
use crate::geo::{BoundaryLayer, MapProjection};
use crate::net::{ResourceKind, ResourcePayload, ResourceResult};
use eframe::egui::Pos2;
use geo_types::Coord;

/// Progress of a static resource load.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadStatus {
    #[default]
    Pending,
    Loaded,
    Failed(String),
}

impl LoadStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadStatus::Loaded)
    }
}

/// Root application state containing all sub-states.
#[derive(Default)]
pub struct AppState {
    /// Base layer selection and active overlays
    pub layers: LayerState,

    /// Zoom rule for the boundary overlay
    pub boundary_controller: BoundaryController,

    /// Turns continuous zoom into settled zoom levels
    pub zoom_watcher: ZoomWatcher,

    /// Current (fractional) zoom reported by the map
    pub zoom: f64,

    /// Station markers and drawn shapes
    pub overlays: OverlayGroup,

    /// Country boundaries, once loaded
    pub boundaries: Option<BoundaryLayer>,

    pub stations_status: LoadStatus,
    pub boundaries_status: LoadStatus,

    /// Active draw or edit tool
    pub draw: DrawState,

    /// Member whose popup is open
    pub popup: Option<MemberId>,

    /// Geocoder search box
    pub search: SearchState,

    /// Geographic position under the pointer (x = lon, y = lat)
    pub pointer_position: Option<Coord<f64>>,

    /// Application status message displayed in top bar
    pub status_message: String,
}

impl AppState {
    pub fn new(config: &MapConfig) -> Self {
        let mut layers = LayerState::default();
        layers.base = config.base_layer;
        Self {
            layers,
            zoom: config.initial_zoom,
            status_message: "Loading stations and boundaries...".to_string(),
            ..Default::default()
        }
    }

    /// Applies a finished resource load.
    pub fn apply_resource(&mut self, result: ResourceResult) {
        match result {
            Ok(ResourcePayload::Stations(parsed)) => {
                let count = parsed.stations.len();
                for station in parsed.stations {
                    self.overlays.add(OverlayMember::Station(station));
                }
                log::info!("Loaded {} stations", count);
                self.stations_status = LoadStatus::Loaded;
                self.status_message = format!("Loaded {} stations", count);
            }
            Ok(ResourcePayload::Boundaries(layer)) => {
                log::info!("Loaded {} boundary polygons", layer.polygon_count());
                self.boundaries = Some(layer);
                self.boundaries_status = LoadStatus::Loaded;
                self.boundary_controller.mark_loaded();
                // Evaluate once so the initial view is consistent with the rule
                self.boundary_controller
                    .handle_zoom(zoom_level(self.zoom), &mut self.layers.active);
            }
            Err(e) => {
                log::error!("{}", e.report());
                let status = LoadStatus::Failed(e.to_string());
                match e.kind() {
                    ResourceKind::Stations => self.stations_status = status,
                    ResourceKind::Boundaries => self.boundaries_status = status,
                }
                self.status_message = e.to_string();
            }
        }
    }

    /// Feeds the map's zoom for this frame. Returns the decision taken if a
    /// zoom change settled.
    pub fn observe_zoom(&mut self, zoom: f64) -> Option<MembershipDecision> {
        self.zoom = zoom;
        let level = self.zoom_watcher.observe(zoom)?;
        Some(
            self.boundary_controller
                .handle_zoom(level, &mut self.layers.active),
        )
    }

    pub fn zoom_level(&self) -> u8 {
        zoom_level(self.zoom)
    }

    /// Toggles an overlay from the layer switcher. Boundaries can only be
    /// turned on once loaded; the next settled zoom re-applies the rule.
    pub fn set_overlay(&mut self, kind: OverlayKind, active: bool) {
        if kind == OverlayKind::Boundaries && active && !self.boundary_controller.is_loaded() {
            return;
        }
        self.layers.active.set(kind, active);
        if kind == OverlayKind::Stations && !active {
            self.popup = None;
        }
    }

    pub fn stations_visible(&self) -> bool {
        self.layers.active.contains(OverlayKind::Stations)
    }

    pub fn boundaries_visible(&self) -> bool {
        self.boundaries.is_some() && self.layers.active.contains(OverlayKind::Boundaries)
    }

    /// Handles a click on the map.
    pub fn handle_map_click(&mut self, projection: &MapProjection, pos: Pos2) {
        if !self.stations_visible() {
            self.popup = None;
            return;
        }

        match self.draw.click(&mut self.overlays, projection, pos) {
            ClickOutcome::Selected(hit) => self.popup = hit,
            ClickOutcome::Created(id) => {
                self.status_message = format!("Created {}", self.member_label(id));
            }
            ClickOutcome::Deleted(id) => {
                if self.popup == Some(id) {
                    self.popup = None;
                }
            }
            ClickOutcome::SketchExtended | ClickOutcome::None => {}
        }
    }

    fn member_label(&self, id: MemberId) -> String {
        self.overlays
            .get(id)
            .map(OverlayMember::popup_text)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_stations;
    use crate::error::ResourceError;

    const BOUNDARIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"name": "Square"},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[10, 0], [20, 0], [20, 10], [10, 10], [10, 0]]]
            }
        }]
    }"#;

    fn boundaries() -> ResourceResult {
        Ok(ResourcePayload::Boundaries(
            BoundaryLayer::from_geojson(BOUNDARIES).unwrap(),
        ))
    }

    /// Feeds a zoom twice so it settles.
    fn settle(state: &mut AppState, zoom: f64) -> Option<MembershipDecision> {
        state.observe_zoom(zoom);
        state.observe_zoom(zoom)
    }

    #[test]
    fn test_stations_become_markers() {
        let mut state = AppState::new(&MapConfig::default());
        let parsed = parse_stations("ID,lat,lon\nA1,10,20\nA2,-5,33\n");
        state.apply_resource(Ok(ResourcePayload::Stations(parsed)));

        let labels: Vec<(String, f64, f64)> = state
            .overlays
            .iter()
            .filter_map(|(_, member)| match member {
                OverlayMember::Station(s) => Some((s.id.clone(), s.lat(), s.lon())),
                OverlayMember::Drawn(_) => None,
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                ("A1".to_string(), 10.0, 20.0),
                ("A2".to_string(), -5.0, 33.0)
            ]
        );
        assert!(state.stations_status.is_loaded());
    }

    #[test]
    fn test_failed_station_load_leaves_group_empty() {
        let mut state = AppState::new(&MapConfig::default());
        state.apply_resource(Err(ResourceError::Location {
            kind: ResourceKind::Stations,
            location: "nowhere".to_string(),
        }));

        assert!(state.overlays.is_empty());
        assert!(matches!(state.stations_status, LoadStatus::Failed(_)));
        assert_eq!(state.boundaries_status, LoadStatus::Pending);
    }

    #[test]
    fn test_failed_boundary_load_keeps_toggle_inert() {
        let mut state = AppState::new(&MapConfig::default());
        state.apply_resource(Err(ResourceError::Location {
            kind: ResourceKind::Boundaries,
            location: "nowhere".to_string(),
        }));

        assert_eq!(settle(&mut state, 8.0), Some(MembershipDecision::Unchanged));
        assert!(!state.boundaries_visible());

        state.set_overlay(OverlayKind::Boundaries, true);
        assert!(!state.layers.active.contains(OverlayKind::Boundaries));
    }

    #[test]
    fn test_zoom_scenario() {
        let mut state = AppState::new(&MapConfig::default());
        settle(&mut state, 3.0);
        state.apply_resource(boundaries());
        assert!(!state.boundaries_visible());

        assert_eq!(settle(&mut state, 6.0), Some(MembershipDecision::Show));
        assert!(state.boundaries_visible());

        assert_eq!(settle(&mut state, 4.0), Some(MembershipDecision::Hide));
        assert!(!state.boundaries_visible());
        assert!(state.stations_visible());
    }

    #[test]
    fn test_boundaries_loaded_while_zoomed_in() {
        let mut state = AppState::new(&MapConfig::default());
        settle(&mut state, 7.0);
        state.apply_resource(boundaries());
        assert!(state.boundaries_visible());
    }

    #[test]
    fn test_user_override_lasts_until_next_zoom() {
        let mut state = AppState::new(&MapConfig::default());
        settle(&mut state, 3.0);
        state.apply_resource(boundaries());

        state.set_overlay(OverlayKind::Boundaries, true);
        assert!(state.boundaries_visible());
        // Panning without a zoom change keeps the override
        assert_eq!(state.observe_zoom(3.0), None);
        assert!(state.boundaries_visible());

        settle(&mut state, 4.0);
        assert!(!state.boundaries_visible());
    }

    #[test]
    fn test_hidden_stations_ignore_clicks() {
        let mut state = AppState::new(&MapConfig::default());
        let parsed = parse_stations("ID,lat,lon\nA1,0,20\n");
        state.apply_resource(Ok(ResourcePayload::Stations(parsed)));
        let projection = MapProjection::default();
        let tip = projection.geo_to_screen(Coord { x: 20.0, y: 0.0 });

        state.handle_map_click(&projection, tip - eframe::egui::Vec2::new(0.0, 10.0));
        assert!(state.popup.is_some());

        state.set_overlay(OverlayKind::Stations, false);
        assert_eq!(state.popup, None);
        state.handle_map_click(&projection, tip - eframe::egui::Vec2::new(0.0, 10.0));
        assert_eq!(state.popup, None);
    }
}
