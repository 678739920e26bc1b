//! Data models for the `FieldWeather` core
//!
//! This module contains the core domain models organized by concern:
//! - Polygon: field parcel boundary rings and coordinates
//! - Station: weather station records and nearest-station results
//! - Weather: the canonical normalized observation series

pub mod polygon;
pub mod station;
pub mod weather;

// Re-export all public types for convenient access
pub use polygon::{AreaResult, Centroid, Coordinate, GeoPolygon};
pub use station::{NearestStationResult, StationRecord};
pub use weather::WeatherSeries;
