//! Network integration module.
//!
//! This module provides functionality for:
//! - Loading the station CSV and boundary GeoJSON off the UI loop
//! - Searching places through a geocoding service

mod fetch;
mod geocode;
mod types;

pub use fetch::ResourceChannel;
pub use geocode::{GeocodeChannel, GeocodeResult};
pub use types::{ResourceKind, ResourceLocation, ResourcePayload, ResourceResult};
