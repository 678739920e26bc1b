//! View shapes handed to the calling layer
//!
//! The request-handling layer serializes these directly; field names match
//! what the map and charting frontends expect (`lat`/`lon`, camelCase
//! observation arrays), so the conversion from internal models happens
//! here and nowhere else.

use serde::Serialize;

use crate::models::{NearestStationResult, WeatherSeries};
use crate::station::PolygonWeather;

/// Nearest-station result as the caller displays it
#[derive(Debug, Clone, Serialize)]
pub struct StationView {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Distance from the field centroid in km, one decimal
    pub distance: f64,
}

impl From<&NearestStationResult> for StationView {
    fn from(result: &NearestStationResult) -> Self {
        Self {
            id: result.station.id.clone(),
            name: result.station.name.clone(),
            lat: result.station.latitude,
            lon: result.station.longitude,
            distance: result.distance_km,
        }
    }
}

/// Weather series as the charting/table/CSV layer consumes it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherView {
    pub time: Vec<String>,
    pub t_max: Vec<f64>,
    pub t_min: Vec<f64>,
    pub rh_max: Vec<f64>,
    pub rh_min: Vec<f64>,
    pub precip: Vec<f64>,
}

impl From<&WeatherSeries> for WeatherView {
    fn from(series: &WeatherSeries) -> Self {
        Self {
            time: series.time.clone(),
            t_max: series.t_max.clone(),
            t_min: series.t_min.clone(),
            rh_max: series.rh_max.clone(),
            rh_min: series.rh_min.clone(),
            precip: series.precip.clone(),
        }
    }
}

/// Combined payload for the field weather endpoint
#[derive(Debug, Clone, Serialize)]
pub struct FieldWeatherView {
    pub station: StationView,
    pub weather: WeatherView,
}

impl From<&PolygonWeather> for FieldWeatherView {
    fn from(resolved: &PolygonWeather) -> Self {
        Self {
            station: StationView::from(&resolved.nearest),
            weather: WeatherView::from(&resolved.weather),
        }
    }
}
