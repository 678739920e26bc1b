//! `FieldWeather` - geospatial resolution core for field parcel weather
//!
//! This library validates user-drawn field polygons, computes their area
//! and representative centroid, resolves the nearest weather station from
//! an immutable catalog, and fetches and normalizes that station's recent
//! daily observations. HTTP routing, persistence, and UI concerns live in
//! the calling layer; this crate is invoked in-process with already-parsed
//! polygons and returns typed results or typed failures.

pub mod api;
pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod models;
pub mod station;
pub mod weather;

// Re-export core types for public API
pub use api::{FieldWeatherView, StationView, WeatherView};
pub use config::FieldWeatherConfig;
pub use error::FieldWeatherError;
pub use models::{
    AreaResult, Centroid, Coordinate, GeoPolygon, NearestStationResult, StationRecord,
    WeatherSeries,
};
pub use station::{PolygonWeather, StationCatalog, StationResolver};
pub use weather::WeatherClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, FieldWeatherError>;
