//! Pure geometric computation on field polygon rings
//!
//! All functions here are side-effect-free and operate on values passed by
//! the caller. Areas are computed with an equirectangular projection at the
//! ring's mean latitude followed by the planar shoelace formula:
//!
//! ```text
//! x = R * lon_rad * cos(mean_lat_rad)
//! y = R * lat_rad          (R = 6,371,000 m)
//! ```
//!
//! At the scales this crate accepts (parcels capped at 100 acres, under
//! 700 m on a side) the flat-earth approximation error is below 0.1% at
//! mid-latitudes, which is well inside what acreage validation needs.

use tracing::debug;

use crate::error::FieldWeatherError;
use crate::models::{AreaResult, Centroid, GeoPolygon};
use crate::Result;

/// Conversion factor from square meters to acres
pub const ACRES_PER_SQUARE_METER: f64 = 0.000_247_105;

/// Mean Earth radius in meters, consistent with the 6371 km haversine radius
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Tolerance in degrees when comparing the first and last ring vertex
const CLOSURE_EPSILON_DEG: f64 = 1e-9;

/// Minimum vertex count for a closed ring (triangle plus closing point)
const MIN_RING_POINTS: usize = 4;

/// Validate a polygon ring's structure and coordinate ranges.
///
/// Checks vertex count, ring closure, and that every coordinate is finite
/// and within geographic range. Self-intersection is not checked; the
/// upstream drawing tool does not prevent it and this core accepts what
/// it produces.
///
/// # Errors
/// Returns [`FieldWeatherError::InvalidGeometry`] describing the first
/// failed check.
pub fn validate_ring(polygon: &GeoPolygon) -> Result<()> {
    if polygon.ring_len() < MIN_RING_POINTS {
        return Err(FieldWeatherError::invalid_geometry(format!(
            "ring has {} points, at least {MIN_RING_POINTS} are required",
            polygon.ring_len()
        )));
    }

    for (index, coordinate) in polygon.ring.iter().enumerate() {
        if !coordinate.is_in_range() {
            return Err(FieldWeatherError::invalid_geometry(format!(
                "vertex {index} at ({}, {}) is outside valid longitude/latitude range",
                coordinate.longitude, coordinate.latitude
            )));
        }
    }

    let first = polygon.ring[0];
    let last = polygon.ring[polygon.ring_len() - 1];
    if (first.longitude - last.longitude).abs() > CLOSURE_EPSILON_DEG
        || (first.latitude - last.latitude).abs() > CLOSURE_EPSILON_DEG
    {
        return Err(FieldWeatherError::invalid_geometry(
            "ring is not closed: first and last vertex differ",
        ));
    }

    Ok(())
}

/// Compute the polygon's area in square meters.
///
/// Uses the projection documented at module level. The absolute value of
/// the shoelace sum is taken, so the result is independent of winding
/// order and always >= 0. Expects a ring that passed [`validate_ring`];
/// degenerate rings yield 0.0.
#[must_use]
pub fn area_square_meters(polygon: &GeoPolygon) -> f64 {
    let vertices = polygon.distinct_vertices();
    if vertices.len() < 3 {
        return 0.0;
    }

    let mean_lat_rad = vertices
        .iter()
        .map(|c| c.latitude.to_radians())
        .sum::<f64>()
        / vertices.len() as f64;
    let lon_scale = mean_lat_rad.cos();

    // Shoelace over the projected vertices, wrapping back to the first.
    let mut sum = 0.0;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        let ax = EARTH_RADIUS_M * a.longitude.to_radians() * lon_scale;
        let ay = EARTH_RADIUS_M * a.latitude.to_radians();
        let bx = EARTH_RADIUS_M * b.longitude.to_radians() * lon_scale;
        let by = EARTH_RADIUS_M * b.latitude.to_radians();
        sum += ax * by - bx * ay;
    }

    (sum / 2.0).abs()
}

/// Compute the polygon's representative point.
///
/// Arithmetic mean of the distinct ring vertices (closing duplicate
/// excluded), not the area-weighted centroid. See [`Centroid`] for why
/// this approximation is acceptable here.
#[must_use]
pub fn centroid(polygon: &GeoPolygon) -> Centroid {
    let vertices = polygon.distinct_vertices();
    let count = vertices.len().max(1) as f64;
    Centroid {
        longitude: vertices.iter().map(|c| c.longitude).sum::<f64>() / count,
        latitude: vertices.iter().map(|c| c.latitude).sum::<f64>() / count,
    }
}

/// Convert an area in square meters to acres
#[must_use]
pub fn acres(area_square_meters: f64) -> f64 {
    area_square_meters * ACRES_PER_SQUARE_METER
}

/// Validate a polygon against the acreage cap.
///
/// This is the single size gate shared by creation-time validation and the
/// pre-draw check; both use the identical formula so the two never drift.
///
/// # Errors
/// Returns [`FieldWeatherError::InvalidGeometry`] for a malformed ring, or
/// [`FieldWeatherError::AreaExceeded`] carrying the computed acreage
/// (rounded to two decimals for the user-facing message) when the cap is
/// exceeded.
pub fn validate_max_area(polygon: &GeoPolygon, max_acres: f64) -> Result<AreaResult> {
    validate_ring(polygon)?;

    let area_m2 = area_square_meters(polygon);
    let actual_acres = acres(area_m2);
    debug!(area_m2, actual_acres, max_acres, "validated field polygon area");

    if actual_acres > max_acres {
        return Err(FieldWeatherError::AreaExceeded {
            actual_acres: (actual_acres * 100.0).round() / 100.0,
            max_acres,
        });
    }

    Ok(AreaResult {
        area_square_meters: area_m2,
        acres: actual_acres,
    })
}
