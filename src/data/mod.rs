//! Static map data: weather station positions.

pub mod stations;

pub use stations::{parse_stations, Station, StationParse};
