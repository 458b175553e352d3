#![warn(clippy::all)]

//! Station Map - A web-based map of weather stations.
//!
//! This application shows weather station positions from a CSV resource on
//! top of OpenStreetMap or satellite tiles, outlines country boundaries once
//! the user zooms in, and offers place search and simple drawing tools.

mod data;
mod draw;
mod error;
mod geo;
mod net;
mod state;
mod ui;

use eframe::egui;
use geo::BaseTiles;
use net::{GeocodeChannel, ResourceChannel, ResourceKind, ResourceLocation};
use state::{url_state, AppState, MapConfig};
use std::time::Duration;
use walkers::{MapMemory, Position};

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "Station Map",
        native_options,
        Box::new(|cc| Ok(Box::new(MapApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("app_canvas")
            .expect("Failed to find app_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("app_canvas was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(MapApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct MapApp {
    /// Application state containing all sub-states
    state: AppState,

    /// Resource locations and persisted preferences
    config: MapConfig,

    /// Tile downloaders for the base layers
    tiles: BaseTiles,

    /// Viewport owned by the map widget
    map_memory: MapMemory,

    /// Initial map center, used until the user pans
    home: Position,

    /// Channel for the station positions CSV
    stations_channel: ResourceChannel,

    /// Channel for the country boundaries GeoJSON
    boundaries_channel: ResourceChannel,

    /// Channel for place searches
    geocoder: GeocodeChannel,

    /// Monotonic instant of last URL push (for throttling to ~1/sec).
    last_url_push: web_time::Instant,

    /// View last written to the URL, as (lat, lon, zoom)
    last_pushed_view: Option<(f64, f64, f64)>,
}

impl MapApp {
    /// Creates a new MapApp instance and starts loading both resources.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = MapConfig::load();

        // Apply URL parameters (lat/lon/z)
        let url_params = url_state::parse_from_url();
        let lat = url_params.lat.unwrap_or(config.initial_lat);
        let lon = url_params.lon.unwrap_or(config.initial_lon);
        let zoom = url_params.zoom.unwrap_or(config.initial_zoom);

        let mut map_memory = MapMemory::default();
        if let Err(e) = map_memory.set_zoom(zoom) {
            log::warn!("Ignoring initial zoom {}: {:?}", zoom, e);
        }

        let mut state = AppState::new(&config);
        state.zoom = map_memory.zoom();

        let stations_channel = ResourceChannel::new();
        stations_channel.fetch(
            cc.egui_ctx.clone(),
            ResourceKind::Stations,
            ResourceLocation::new(config.stations_url.clone()),
        );

        let boundaries_channel = ResourceChannel::new();
        boundaries_channel.fetch(
            cc.egui_ctx.clone(),
            ResourceKind::Boundaries,
            ResourceLocation::new(config.boundaries_url.clone()),
        );

        Self {
            state,
            tiles: BaseTiles::new(&cc.egui_ctx),
            map_memory,
            home: Position::from_lat_lon(lat, lon),
            stations_channel,
            boundaries_channel,
            geocoder: GeocodeChannel::new(),
            last_url_push: web_time::Instant::now(),
            last_pushed_view: None,
            config,
        }
    }

    /// Drains completed resource loads and searches.
    fn poll_channels(&mut self) {
        while let Some(result) = self.stations_channel.try_recv() {
            self.state.apply_resource(result);
        }
        while let Some(result) = self.boundaries_channel.try_recv() {
            self.state.apply_resource(result);
        }

        if let Some((query, result)) = self.geocoder.try_recv() {
            match result {
                Ok(results) if results.is_empty() => {
                    self.state.search.error = Some(format!("No results for \"{}\"", query));
                }
                Ok(results) => {
                    log::info!("Geocoder returned {} results for {:?}", results.len(), query);
                    self.state.search.error = None;
                    self.state.search.results = results;
                }
                Err(e) => {
                    log::error!("Geocoding {:?} failed: {}", query, e);
                    self.state.search.error = Some(e.to_string());
                }
            }
        }
    }

    /// Moves the viewport onto a selected search result.
    fn apply_fit_request(&mut self, ctx: &egui::Context) {
        let Some(bounds) = self.state.search.take_fit_request() else {
            return;
        };

        // Remaining space once the side panels are laid out
        let rect = ctx.available_rect();
        let max_zoom = self.state.layers.base.max_zoom() as f64;
        let zoom = bounds.fit_zoom(rect.width(), rect.height(), max_zoom);
        let center = bounds.center();

        self.map_memory
            .center_at(Position::from_lat_lon(center.y, center.x));
        if let Err(e) = self.map_memory.set_zoom(zoom) {
            log::warn!("Cannot fit search result at zoom {}: {:?}", zoom, e);
        }
    }

    /// Clamps the zoom to the base layer and feeds it to the zoom watcher.
    fn track_zoom(&mut self, ctx: &egui::Context) {
        let max_zoom = self.state.layers.base.max_zoom() as f64;
        if self.map_memory.zoom() > max_zoom {
            if let Err(e) = self.map_memory.set_zoom(max_zoom) {
                log::warn!("Failed to clamp zoom: {:?}", e);
            }
        }

        if let Some(decision) = self.state.observe_zoom(self.map_memory.zoom()) {
            log::debug!(
                "Zoom settled at {:?}: {:?}",
                self.state.zoom_watcher.settled_level(),
                decision
            );
        }

        if self.state.zoom_watcher.is_settling() {
            ctx.request_repaint();
        }
    }

    /// Push current view to the URL (throttled to once per second).
    fn sync_url(&mut self, ctx: &egui::Context) {
        let center = self.map_memory.detached().unwrap_or(self.home);
        let view = (center.lat(), center.lon(), self.map_memory.zoom().round());
        if self.last_pushed_view == Some(view) {
            return;
        }

        let now = web_time::Instant::now();
        let since = now.duration_since(self.last_url_push);
        if since >= Duration::from_secs(1) {
            self.last_url_push = now;
            self.last_pushed_view = Some(view);
            url_state::push_to_url(view.0, view.1, view.2);
        } else {
            ctx.request_repaint_after(Duration::from_secs(1) - since);
        }
    }

    /// Persists preference changes made through the UI.
    fn sync_config(&mut self) {
        if self.config.base_layer != self.state.layers.base {
            self.config.base_layer = self.state.layers.base;
            self.config.save();
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if self.state.draw.is_idle() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.state.draw.cancel(&mut self.state.overlays);
        } else if ctx.input(|i| i.key_pressed(egui::Key::Backspace)) && !ctx.wants_keyboard_input() {
            self.state.draw.undo();
        }
    }
}

impl eframe::App for MapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_channels();
        self.handle_shortcuts(ctx);

        // Render UI panels in the correct order for egui layout
        // Side and top/bottom panels must be rendered before CentralPanel
        if let Some(query) =
            ui::render_top_bar(ctx, &mut self.state, self.geocoder.is_searching())
        {
            self.state.search.clear_results();
            self.geocoder
                .search(ctx.clone(), self.config.geocoder_url.clone(), query);
        }
        ui::render_bottom_panel(ctx, &self.state);
        ui::render_right_panel(ctx, &mut self.state);

        self.apply_fit_request(ctx);

        ui::render_canvas(
            ctx,
            &mut self.state,
            &mut self.tiles,
            &mut self.map_memory,
            self.home,
        );

        self.track_zoom(ctx);
        self.sync_url(ctx);
        self.sync_config();
    }
}
