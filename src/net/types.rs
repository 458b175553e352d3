//! Type definitions for static resource loading.

use crate::data::StationParse;
use crate::geo::BoundaryLayer;
use std::fmt;

/// The two static resources the map loads at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Station positions CSV
    Stations,
    /// Country boundaries GeoJSON
    Boundaries,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Stations => write!(f, "station positions CSV"),
            ResourceKind::Boundaries => write!(f, "country boundaries GeoJSON"),
        }
    }
}

/// Where a resource lives: an absolute URL, or a relative URL / local path.
///
/// In the browser relative locations resolve against the page URL;
/// natively they are read from the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocation(String);

impl ResourceLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `http://` and `https://` locations.
    pub fn is_remote(&self) -> bool {
        let lower = self.0.trim_start().to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decoded contents of a resource.
#[derive(Debug, Clone)]
pub enum ResourcePayload {
    Stations(StationParse),
    Boundaries(BoundaryLayer),
}

/// Result of a resource load delivered back to the UI thread.
pub type ResourceResult = Result<ResourcePayload, crate::error::ResourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_detection() {
        assert!(ResourceLocation::new("https://example.org/a.csv").is_remote());
        assert!(ResourceLocation::new("HTTP://example.org/a.csv").is_remote());
        assert!(!ResourceLocation::new("../public/a.csv").is_remote());
        assert!(!ResourceLocation::new("public/africa_countries.geojson").is_remote());
    }
}
