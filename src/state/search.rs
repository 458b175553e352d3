//! Geocoder search box state.

use crate::geo::GeoBounds;
use crate::net::GeocodeResult;

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Text in the search box
    pub query: String,
    /// Results of the last completed search
    pub results: Vec<GeocodeResult>,
    /// Error from the last search, if it failed
    pub error: Option<String>,
    /// Bounding box the map should fit on the next frame
    pub fit_request: Option<GeoBounds>,
}

impl SearchState {
    /// Selects a result: closes the result list and requests the viewport be
    /// fitted to the result's bounding box.
    pub fn select(&mut self, index: usize) -> Option<GeoBounds> {
        let result = self.results.get(index)?.clone();
        self.query = result.name;
        self.results.clear();
        self.fit_request = Some(result.bounds);
        self.fit_request
    }

    pub fn take_fit_request(&mut self) -> Option<GeoBounds> {
        self.fit_request.take()
    }

    pub fn clear_results(&mut self) {
        self.results.clear();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::Coord;

    #[test]
    fn test_select_requests_fit_once() {
        let bounds = GeoBounds::new(36.66, -1.44, 37.10, -1.16);
        let mut search = SearchState {
            results: vec![GeocodeResult {
                name: "Nairobi, Kenya".to_string(),
                center: Coord { x: 36.82, y: -1.28 },
                bounds,
            }],
            ..SearchState::default()
        };

        assert_eq!(search.select(3), None);
        assert_eq!(search.select(0), Some(bounds));
        assert_eq!(search.query, "Nairobi, Kenya");
        assert!(search.results.is_empty());

        assert_eq!(search.take_fit_request(), Some(bounds));
        assert_eq!(search.take_fit_request(), None);
    }
}
