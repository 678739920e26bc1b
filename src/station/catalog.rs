//! Weather station catalog
//!
//! An immutable, ordered set of station records loaded once at process
//! start. The catalog is an explicitly constructed value the caller passes
//! into the resolver, never a hidden process-wide singleton, which keeps
//! every code path testable with synthetic catalogs.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::error::FieldWeatherError;
use crate::models::StationRecord;
use crate::Result;

/// Station dataset bundled with the crate (CoAgMet northern Colorado network)
const EMBEDDED_DATASET: &str = include_str!("stations.json");

/// Immutable catalog of weather stations.
///
/// Iteration order is the dataset order; nearest-station resolution depends
/// on it for deterministic tie-breaking, so the order is never shuffled.
#[derive(Debug, Clone)]
pub struct StationCatalog {
    stations: Vec<StationRecord>,
}

impl StationCatalog {
    /// Build a catalog from already-parsed records.
    ///
    /// # Errors
    /// Fails with [`FieldWeatherError::Catalog`] when the record list is
    /// empty or contains duplicate station ids. There is no valid state
    /// with zero stations.
    pub fn from_records(stations: Vec<StationRecord>) -> Result<Self> {
        if stations.is_empty() {
            return Err(FieldWeatherError::catalog(
                "station dataset is empty; at least one station is required",
            ));
        }

        let mut seen = HashSet::new();
        for station in &stations {
            if !seen.insert(station.id.as_str()) {
                return Err(FieldWeatherError::catalog(format!(
                    "duplicate station id '{}' in dataset",
                    station.id
                )));
            }
        }

        Ok(Self { stations })
    }

    /// Parse a catalog from a JSON array of station records
    pub fn from_json_str(json: &str) -> Result<Self> {
        let stations: Vec<StationRecord> = serde_json::from_str(json)
            .map_err(|e| FieldWeatherError::catalog(format!("malformed station dataset: {e}")))?;
        Self::from_records(stations)
    }

    /// Load the station dataset bundled with the crate
    pub fn load_embedded() -> Result<Self> {
        let catalog = Self::from_json_str(EMBEDDED_DATASET)?;
        info!(stations = catalog.len(), "loaded embedded station catalog");
        Ok(catalog)
    }

    /// Load a catalog from a JSON dataset file on disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            stations = catalog.len(),
            path = %path.display(),
            "loaded station catalog from file"
        );
        Ok(catalog)
    }

    /// Load the catalog named by configuration: the configured dataset
    /// file when a path is set, the embedded dataset otherwise
    pub fn from_config(config: &crate::config::CatalogConfig) -> Result<Self> {
        match &config.path {
            Some(path) => Self::from_path(path),
            None => Self::load_embedded(),
        }
    }

    /// All stations in dataset order
    #[must_use]
    pub fn all(&self) -> &[StationRecord] {
        &self.stations
    }

    /// Look up a station by its id
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&StationRecord> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Number of stations in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the catalog holds no stations (unreachable after load)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
