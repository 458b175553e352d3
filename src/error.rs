//! Error types for resource loading and geocoding.

use crate::net::ResourceKind;
use thiserror::Error;

/// Failure to load one of the static map resources.
///
/// Every variant names the resource so the log line says which overlay
/// stays empty.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to read {kind} from {location}")]
    Io {
        kind: ResourceKind,
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {kind} from {location}")]
    Http {
        kind: ResourceKind,
        location: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{kind} request to {location} returned HTTP {status}")]
    Status {
        kind: ResourceKind,
        location: String,
        status: u16,
    },
    #[error("invalid {kind} location {location:?}")]
    Location { kind: ResourceKind, location: String },
    #[error("failed to parse {kind}")]
    Geojson {
        kind: ResourceKind,
        #[source]
        source: geojson::Error,
    },
}

impl ResourceError {
    /// Which resource failed.
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceError::Io { kind, .. }
            | ResourceError::Http { kind, .. }
            | ResourceError::Status { kind, .. }
            | ResourceError::Location { kind, .. }
            | ResourceError::Geojson { kind, .. } => *kind,
        }
    }

    /// Message including the underlying cause, for logs and the status line.
    pub fn report(&self) -> String {
        match std::error::Error::source(self) {
            Some(source) => format!("{}: {}", self, source),
            None => self.to_string(),
        }
    }
}

/// Failure of a geocoder search.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoder request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("geocoder returned HTTP {0}")]
    Status(u16),
    #[error("unexpected geocoder response: {0}")]
    Decode(#[from] serde_json::Error),
}
