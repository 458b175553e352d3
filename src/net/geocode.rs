//! Place search against a Nominatim-compatible geocoder.
//!
//! Uses the same channel pattern as resource loading: the request runs off
//! the UI loop and the results are picked up on a later frame.

use crate::error::GeocodeError;
use crate::geo::GeoBounds;
use eframe::egui;
use geo_types::Coord;
use serde::Deserialize;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Maximum number of results requested per search.
const RESULT_LIMIT: &str = "5";

/// A geocoded place.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub name: String,
    /// Representative point (x = lon, y = lat)
    pub center: Coord<f64>,
    pub bounds: GeoBounds,
}

/// One entry of a Nominatim `format=json` response.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
    /// `[south, north, west, east]`, as strings
    #[serde(default)]
    boundingbox: Vec<String>,
}

impl NominatimPlace {
    fn into_result(self) -> Option<GeocodeResult> {
        let center = Coord {
            x: self.lon.trim().parse().ok()?,
            y: self.lat.trim().parse().ok()?,
        };

        let bbox: Vec<f64> = self
            .boundingbox
            .iter()
            .filter_map(|v| v.trim().parse().ok())
            .collect();
        let bounds = match bbox.as_slice() {
            [south, north, west, east] => GeoBounds::new(*west, *south, *east, *north),
            _ => GeoBounds::new(center.x, center.y, center.x, center.y),
        };

        Some(GeocodeResult {
            name: self.display_name,
            center,
            bounds,
        })
    }
}

/// Parses a Nominatim JSON response body.
///
/// Entries with unparsable coordinates are dropped.
pub fn parse_nominatim(body: &str) -> Result<Vec<GeocodeResult>, GeocodeError> {
    let places: Vec<NominatimPlace> = serde_json::from_str(body)?;
    Ok(places
        .into_iter()
        .filter_map(NominatimPlace::into_result)
        .collect())
}

/// Result of one search, tagged with the query that produced it.
pub type GeocodeResponse = (String, Result<Vec<GeocodeResult>, GeocodeError>);

/// A response tagged with the search that produced it.
struct Reply {
    generation: u64,
    response: GeocodeResponse,
}

/// Channel-based geocoder client.
///
/// Only the most recent search is reported; replies to earlier searches
/// that arrive late are dropped.
pub struct GeocodeChannel {
    sender: Sender<Reply>,
    receiver: Receiver<Reply>,
    generation: u64,
    searching: bool,
}

impl Default for GeocodeChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodeChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            generation: 0,
            searching: false,
        }
    }

    /// Spawns a search for `query` against `endpoint`.
    pub fn search(&mut self, ctx: egui::Context, endpoint: String, query: String) {
        let sender = self.sender.clone();
        self.generation += 1;
        let generation = self.generation;
        self.searching = true;
        log::info!("Geocoding {:?}", query);

        #[cfg(not(target_arch = "wasm32"))]
        {
            std::thread::spawn(move || {
                let result = search_blocking(&endpoint, &query);
                let _ = sender.send(Reply {
                    generation,
                    response: (query, result),
                });
                ctx.request_repaint();
            });
        }

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                let result = search(&endpoint, &query).await;
                let _ = sender.send(Reply {
                    generation,
                    response: (query, result),
                });
                ctx.request_repaint();
            });
        }
    }

    /// Non-blocking check for the completion of the latest search.
    pub fn try_recv(&mut self) -> Option<GeocodeResponse> {
        while let Ok(reply) = self.receiver.try_recv() {
            if reply.generation == self.generation {
                self.searching = false;
                return Some(reply.response);
            }
            log::debug!("Dropping stale geocoder reply for {:?}", reply.response.0);
        }
        None
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }
}

fn query_params(query: &str) -> [(&'static str, &str); 3] {
    [("q", query), ("format", "json"), ("limit", RESULT_LIMIT)]
}

#[cfg(not(target_arch = "wasm32"))]
fn search_blocking(endpoint: &str, query: &str) -> Result<Vec<GeocodeResult>, GeocodeError> {
    // Nominatim's usage policy requires an identifying user agent
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("station-map/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    let response = client.get(endpoint).query(&query_params(query)).send()?;
    if !response.status().is_success() {
        return Err(GeocodeError::Status(response.status().as_u16()));
    }
    parse_nominatim(&response.text()?)
}

#[cfg(target_arch = "wasm32")]
async fn search(endpoint: &str, query: &str) -> Result<Vec<GeocodeResult>, GeocodeError> {
    let response = reqwest::Client::new()
        .get(endpoint)
        .query(&query_params(query))
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(GeocodeError::Status(response.status().as_u16()));
    }
    parse_nominatim(&response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nominatim() {
        let body = r#"[
            {
                "place_id": 1,
                "display_name": "Nairobi, Kenya",
                "lat": "-1.2832533",
                "lon": "36.8172449",
                "boundingbox": ["-1.4448", "-1.1606", "36.6647", "37.1048"]
            },
            {
                "display_name": "Broken",
                "lat": "north",
                "lon": "36.8"
            },
            {
                "display_name": "Somewhere without a box",
                "lat": "1.0",
                "lon": "2.0"
            }
        ]"#;

        let results = parse_nominatim(body).unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].name, "Nairobi, Kenya");
        assert_eq!(
            results[0].bounds,
            GeoBounds::new(36.6647, -1.4448, 37.1048, -1.1606)
        );
        assert!((results[0].center.y + 1.2832533).abs() < 1e-9);

        assert_eq!(results[1].bounds, GeoBounds::new(2.0, 1.0, 2.0, 1.0));
    }

    fn reply(generation: u64, query: &str, name: &str) -> Reply {
        let result = GeocodeResult {
            name: name.to_string(),
            center: Coord { x: 0.0, y: 0.0 },
            bounds: GeoBounds::new(0.0, 0.0, 0.0, 0.0),
        };
        Reply {
            generation,
            response: (query.to_string(), Ok(vec![result])),
        }
    }

    #[test]
    fn test_late_reply_to_older_search_is_dropped() {
        let mut geocoder = GeocodeChannel::new();
        // Two searches in flight: "Lagos" then "Nairobi"
        geocoder.generation = 2;
        geocoder.searching = true;

        geocoder.sender.send(reply(2, "Nairobi", "Nairobi, Kenya")).unwrap();
        let (query, result) = geocoder.try_recv().unwrap();
        assert_eq!(query, "Nairobi");
        assert_eq!(result.unwrap()[0].name, "Nairobi, Kenya");
        assert!(!geocoder.is_searching());

        geocoder.sender.send(reply(1, "Lagos", "Lagos, Nigeria")).unwrap();
        assert!(geocoder.try_recv().is_none());
        assert!(!geocoder.is_searching());
    }

    #[test]
    fn test_stale_reply_does_not_end_current_search() {
        let mut geocoder = GeocodeChannel::new();
        geocoder.generation = 2;
        geocoder.searching = true;

        geocoder.sender.send(reply(1, "Lagos", "Lagos, Nigeria")).unwrap();
        assert!(geocoder.try_recv().is_none());
        assert!(geocoder.is_searching());

        geocoder.sender.send(reply(2, "Nairobi", "Nairobi, Kenya")).unwrap();
        assert_eq!(geocoder.try_recv().unwrap().0, "Nairobi");
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            parse_nominatim("{\"error\": \"x\"}"),
            Err(GeocodeError::Decode(_))
        ));
    }
}
