//! Polygon model for field parcel boundaries

use serde::{Deserialize, Serialize};

use crate::error::FieldWeatherError;

/// A single `(longitude, latitude)` vertex in decimal degrees.
///
/// Longitude comes first to match the GeoJSON coordinate order the
/// calling layer parses from the map widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Longitude in decimal degrees (-180..=180)
    pub longitude: f64,
    /// Latitude in decimal degrees (-90..=90)
    pub latitude: f64,
}

impl Coordinate {
    /// Create a new coordinate from `(longitude, latitude)`
    #[must_use]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Whether both components are finite and within valid geographic range
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && (-180.0..=180.0).contains(&self.longitude)
            && (-90.0..=90.0).contains(&self.latitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((longitude, latitude): (f64, f64)) -> Self {
        Self::new(longitude, latitude)
    }
}

/// The exterior ring of a simple field polygon.
///
/// Holds the ring exactly as drawn: ordered vertices with the closing
/// point repeated at the end. Interior rings (holes) are not modeled.
/// Validity is checked by [`crate::geometry::validate_ring`], not at
/// construction, so the calling layer can report precise failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPolygon {
    /// Ring vertices in drawing order, first == last when closed
    pub ring: Vec<Coordinate>,
}

impl GeoPolygon {
    /// Create a polygon from an ordered ring of coordinates
    #[must_use]
    pub fn new(ring: Vec<Coordinate>) -> Self {
        Self { ring }
    }

    /// Create a polygon from raw `(longitude, latitude)` pairs
    #[must_use]
    pub fn from_lonlat_pairs(pairs: &[(f64, f64)]) -> Self {
        Self {
            ring: pairs.iter().map(|&p| Coordinate::from(p)).collect(),
        }
    }

    /// Build from GeoJSON polygon coordinates (`[[[lon, lat], ...], ...]`).
    ///
    /// Only the exterior ring is taken; interior rings (holes) are not
    /// modeled and their presence is an error rather than silently
    /// dropped geometry.
    ///
    /// # Errors
    /// Returns [`FieldWeatherError::InvalidGeometry`] when no ring is
    /// present or more than one ring is supplied.
    pub fn from_geojson_coordinates(
        rings: &[Vec<[f64; 2]>],
    ) -> Result<Self, FieldWeatherError> {
        match rings {
            [] => Err(FieldWeatherError::invalid_geometry(
                "polygon has no coordinate rings",
            )),
            [exterior] => Ok(Self {
                ring: exterior
                    .iter()
                    .map(|&[lon, lat]| Coordinate::new(lon, lat))
                    .collect(),
            }),
            _ => Err(FieldWeatherError::invalid_geometry(
                "polygons with interior rings (holes) are not supported",
            )),
        }
    }

    /// Number of vertices in the ring, closing duplicate included
    #[must_use]
    pub fn ring_len(&self) -> usize {
        self.ring.len()
    }

    /// The ring's distinct vertices, closing duplicate excluded.
    ///
    /// Returns the full ring unchanged when it is too short to carry a
    /// closing vertex; callers are expected to validate first.
    #[must_use]
    pub fn distinct_vertices(&self) -> &[Coordinate] {
        if self.ring.len() > 1 {
            &self.ring[..self.ring.len() - 1]
        } else {
            &self.ring
        }
    }
}

/// Representative point of a polygon, used for nearest-station lookup.
///
/// Computed as the arithmetic mean of the ring's distinct vertices. This is
/// a deliberate simplification, not the area-weighted center of mass; it is
/// only ever used to pick the closest station, where exactness is not
/// required.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Latitude in decimal degrees
    pub latitude: f64,
}

/// Computed area of a field polygon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaResult {
    /// Area in square meters, always >= 0
    pub area_square_meters: f64,
    /// The same area converted to acres
    pub acres: f64,
}
