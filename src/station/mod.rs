//! Station catalog and nearest-station resolution
//!
//! The catalog is an immutable value loaded once at startup; the resolver
//! consumes it together with a polygon centroid to pick the closest
//! station and, through the combined pipeline, fetch its weather.

pub mod catalog;
pub mod resolver;

pub use catalog::StationCatalog;
pub use resolver::{nearest, PolygonWeather, StationResolver};
