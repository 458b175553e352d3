//! URL state encoding/decoding for shareable URLs.
//!
//! Encodes the map center and zoom in the URL query string so reloading
//! restores the view and URLs can be shared.

/// Parsed URL parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub zoom: Option<f64>,
}

/// Parse a query string (with or without the leading `?`).
///
/// Unknown keys and unparsable values are ignored.
pub fn parse_query(search: &str) -> UrlParams {
    let mut params = UrlParams::default();

    let query = search.trim_start_matches('?');
    if query.is_empty() {
        return params;
    }

    for pair in query.split('&') {
        let mut kv = pair.splitn(2, '=');
        let key = kv.next().unwrap_or("");
        let value = kv.next().unwrap_or("");
        let number = value.parse::<f64>().ok().filter(|v| v.is_finite());
        match key {
            "lat" => params.lat = number.filter(|v| v.abs() <= 90.0),
            "lon" => params.lon = number.filter(|v| v.abs() <= 180.0),
            "z" => params.zoom = number.filter(|v| *v >= 0.0),
            _ => {}
        }
    }

    params
}

/// Format the query string for a view.
pub fn format_query(lat: f64, lon: f64, zoom: f64) -> String {
    format!("?lat={:.5}&lon={:.5}&z={:.0}", lat, lon, zoom)
}

/// Parse URL query parameters from the current browser URL.
#[cfg(target_arch = "wasm32")]
pub fn parse_from_url() -> UrlParams {
    let Some(window) = web_sys::window() else {
        return UrlParams::default();
    };
    match window.location().search() {
        Ok(search) => parse_query(&search),
        Err(_) => UrlParams::default(),
    }
}

/// No-op stub for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn parse_from_url() -> UrlParams {
    UrlParams::default()
}

/// Push current view to the URL query string using `replaceState`.
#[cfg(target_arch = "wasm32")]
pub fn push_to_url(lat: f64, lon: f64, zoom: f64) {
    let query = format_query(lat, lon, zoom);

    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(history) = window.history() else {
        return;
    };
    let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&query));
}

/// No-op stub for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn push_to_url(_lat: f64, _lon: f64, _zoom: f64) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query() {
        let params = parse_query("?lat=-1.28&lon=36.82&z=8&layer=osm");
        assert_eq!(params.lat, Some(-1.28));
        assert_eq!(params.lon, Some(36.82));
        assert_eq!(params.zoom, Some(8.0));
    }

    #[test]
    fn test_parse_query_ignores_bad_values() {
        let params = parse_query("lat=north&lon=200&z=-1");
        assert_eq!(params, UrlParams::default());
        assert_eq!(parse_query(""), UrlParams::default());
    }

    #[test]
    fn test_format_query() {
        assert_eq!(format_query(10.0, 20.5, 6.0), "?lat=10.00000&lon=20.50000&z=6");
    }
}
