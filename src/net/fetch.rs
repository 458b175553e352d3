//! Static resource loading for the station and boundary overlays.
//!
//! Uses channel-based communication to bridge async fetches
//! with egui's synchronous update loop.

use super::types::{ResourceKind, ResourceLocation, ResourcePayload, ResourceResult};
use crate::data::parse_stations;
use crate::error::ResourceError;
use crate::geo::BoundaryLayer;
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Channel-based loader for the static map resources.
///
/// Fetches run off the UI loop; each completed load is delivered exactly
/// once through `try_recv()`. There is no retry, cancellation or timeout.
pub struct ResourceChannel {
    sender: Sender<ResourceResult>,
    receiver: Receiver<ResourceResult>,
}

impl Default for ResourceChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Spawns a fetch for one resource.
    ///
    /// On native: reads the file (or performs a blocking HTTP request) on
    /// a new thread. On WASM: uses wasm_bindgen_futures::spawn_local with
    /// the browser's fetch.
    ///
    /// When the load completes the result is sent through the channel and
    /// ctx.request_repaint() is called to trigger a UI update.
    pub fn fetch(&self, ctx: egui::Context, kind: ResourceKind, location: ResourceLocation) {
        let sender = self.sender.clone();
        log::info!("Loading {} from {}", kind, location);

        #[cfg(not(target_arch = "wasm32"))]
        {
            std::thread::spawn(move || {
                let result = load_resource_blocking(kind, &location);
                let _ = sender.send(result);
                ctx.request_repaint();
            });
        }

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                let result = load_resource(kind, &location).await;
                let _ = sender.send(result);
                ctx.request_repaint();
            });
        }
    }

    /// Non-blocking check for a completed load.
    pub fn try_recv(&self) -> Option<ResourceResult> {
        self.receiver.try_recv().ok()
    }
}

/// Decodes fetched text into the payload for its resource kind.
pub fn decode_resource(kind: ResourceKind, text: &str) -> ResourceResult {
    match kind {
        ResourceKind::Stations => {
            let parsed = parse_stations(text);
            if parsed.skipped > 0 {
                log::warn!("Skipped {} malformed station row(s)", parsed.skipped);
            }
            Ok(ResourcePayload::Stations(parsed))
        }
        ResourceKind::Boundaries => BoundaryLayer::from_geojson(text)
            .map(ResourcePayload::Boundaries)
            .map_err(|source| ResourceError::Geojson { kind, source }),
    }
}

/// Loads and decodes a resource, blocking the calling thread.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_resource_blocking(kind: ResourceKind, location: &ResourceLocation) -> ResourceResult {
    let text = fetch_text_blocking(kind, location)?;
    decode_resource(kind, &text)
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_text_blocking(
    kind: ResourceKind,
    location: &ResourceLocation,
) -> Result<String, ResourceError> {
    if !location.is_remote() {
        return std::fs::read_to_string(location.as_str()).map_err(|source| ResourceError::Io {
            kind,
            location: location.to_string(),
            source,
        });
    }

    let http_error = |source| ResourceError::Http {
        kind,
        location: location.to_string(),
        source,
    };

    // Static resources load once and are never timed out
    let client = reqwest::blocking::Client::builder()
        .timeout(None)
        .build()
        .map_err(http_error)?;
    let response = client.get(location.as_str()).send().map_err(http_error)?;
    if !response.status().is_success() {
        return Err(ResourceError::Status {
            kind,
            location: location.to_string(),
            status: response.status().as_u16(),
        });
    }
    response.text().map_err(http_error)
}

/// Loads and decodes a resource through the browser's fetch.
#[cfg(target_arch = "wasm32")]
pub async fn load_resource(kind: ResourceKind, location: &ResourceLocation) -> ResourceResult {
    let url = resolve_url(kind, location)?;

    let http_error = |source| ResourceError::Http {
        kind,
        location: location.to_string(),
        source,
    };

    let response = reqwest::get(&url).await.map_err(http_error)?;
    if !response.status().is_success() {
        return Err(ResourceError::Status {
            kind,
            location: location.to_string(),
            status: response.status().as_u16(),
        });
    }
    let text = response.text().await.map_err(http_error)?;
    decode_resource(kind, &text)
}

/// Resolves a possibly relative location against the page URL.
#[cfg(target_arch = "wasm32")]
fn resolve_url(kind: ResourceKind, location: &ResourceLocation) -> Result<String, ResourceError> {
    let invalid = || ResourceError::Location {
        kind,
        location: location.to_string(),
    };

    if location.is_remote() {
        return Ok(location.to_string());
    }

    let base = web_sys::window()
        .and_then(|w| w.location().href().ok())
        .ok_or_else(invalid)?;
    web_sys::Url::new_with_base(location.as_str(), &base)
        .map(|url| url.href())
        .map_err(|_| invalid())
}
