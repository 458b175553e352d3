//! Weather station positions parsed from CSV.
//!
//! The resource has a header row with at least `ID`, `lat` and `lon`
//! columns; any other columns (addresses, names) are ignored. Numeric
//! fields are coerced from text, so `10`, `10.0` and ` 10 ` are all valid
//! coordinates.

use geo_types::Coord;
use serde::Deserialize;

/// A weather station marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Station identifier, used as the marker label
    pub id: String,
    /// Position (x = lon, y = lat)
    pub position: Coord<f64>,
}

impl Station {
    pub fn new(id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            position: Coord { x: lon, y: lat },
        }
    }

    pub fn lat(&self) -> f64 {
        self.position.y
    }

    pub fn lon(&self) -> f64 {
        self.position.x
    }
}

/// Outcome of parsing a station resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationParse {
    pub stations: Vec<Station>,
    /// Rows dropped because a required field was missing or invalid
    pub skipped: usize,
}

/// Raw CSV row. Everything is read as text and coerced afterwards so a
/// single bad cell only drops its own row.
#[derive(Debug, Deserialize)]
struct StationRecord {
    #[serde(rename = "ID", default)]
    id: Option<String>,
    #[serde(default)]
    lat: Option<String>,
    #[serde(default)]
    lon: Option<String>,
}

/// Parses a numeric-looking field into a finite float.
fn coerce_number(field: Option<&str>) -> Option<f64> {
    let value: f64 = field?.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

impl StationRecord {
    fn into_station(self) -> Result<Station, &'static str> {
        let id = self
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or("missing ID")?
            .to_string();

        let lat = coerce_number(self.lat.as_deref()).ok_or("missing or non-numeric lat")?;
        let lon = coerce_number(self.lon.as_deref()).ok_or("missing or non-numeric lon")?;

        if !(-90.0..=90.0).contains(&lat) {
            return Err("lat out of range");
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err("lon out of range");
        }

        Ok(Station::new(id, lat, lon))
    }
}

/// Parses station rows from CSV text.
///
/// Malformed rows are skipped and logged; they never abort the parse.
pub fn parse_stations(csv_text: &str) -> StationParse {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let mut result = StationParse::default();

    for (idx, record) in reader.deserialize::<StationRecord>().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let line = idx + 2;
        let station = match record {
            Ok(record) => record.into_station(),
            Err(e) => {
                log::warn!("Skipping station row {}: {}", line, e);
                result.skipped += 1;
                continue;
            }
        };

        match station {
            Ok(station) => result.stations.push(station),
            Err(reason) => {
                log::warn!("Skipping station row {}: {}", line, reason);
                result.skipped += 1;
            }
        }
    }

    result
}
