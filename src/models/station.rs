//! Weather station records and resolution results

use serde::{Deserialize, Serialize};

/// A single weather station from the static catalog dataset.
///
/// Matches the dataset record shape `{ id, name, latitude, longitude, url }`.
/// Records are immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    /// Station identifier, unique within the catalog (e.g. "alt01")
    pub id: String,
    /// Human-readable station name
    pub name: String,
    /// Station latitude in decimal degrees
    pub latitude: f64,
    /// Station longitude in decimal degrees
    pub longitude: f64,
    /// Endpoint template for this station's observation API
    pub url: String,
}

/// Result of a nearest-station lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestStationResult {
    /// The winning station
    pub station: StationRecord,
    /// Great-circle distance from the query point, km, rounded to 1 decimal
    pub distance_km: f64,
}
