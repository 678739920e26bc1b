//! Canonical normalized weather observation series

use serde::{Deserialize, Serialize};

use crate::error::FieldWeatherError;

/// Daily weather observations as five parallel arrays aligned by index.
///
/// Index `i` across all arrays refers to the same date. The equal-length
/// invariant is enforced at construction; a series with mismatched array
/// lengths can never be observed by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSeries {
    /// Observation dates as upstream date strings (e.g. "2025-06-01")
    pub time: Vec<String>,
    /// Daily maximum temperature in degrees Fahrenheit
    pub t_max: Vec<f64>,
    /// Daily minimum temperature in degrees Fahrenheit
    pub t_min: Vec<f64>,
    /// Daily maximum relative humidity as a fraction in 0..=1
    pub rh_max: Vec<f64>,
    /// Daily minimum relative humidity as a fraction in 0..=1
    pub rh_min: Vec<f64>,
    /// Daily precipitation in inches
    pub precip: Vec<f64>,
}

impl WeatherSeries {
    /// Build a series, enforcing the equal-length invariant.
    ///
    /// # Errors
    /// Returns [`FieldWeatherError::UpstreamFetch`] when any array length
    /// disagrees with `time`, attributed to `station_id` for diagnostics.
    pub fn new(
        station_id: &str,
        time: Vec<String>,
        t_max: Vec<f64>,
        t_min: Vec<f64>,
        rh_max: Vec<f64>,
        rh_min: Vec<f64>,
        precip: Vec<f64>,
    ) -> Result<Self, FieldWeatherError> {
        let expected = time.len();
        let lengths = [
            ("tMax", t_max.len()),
            ("tMin", t_min.len()),
            ("rhMax", rh_max.len()),
            ("rhMin", rh_min.len()),
            ("precip", precip.len()),
        ];
        for (field, len) in lengths {
            if len != expected {
                return Err(FieldWeatherError::upstream_fetch(
                    station_id,
                    format!("array length mismatch: {field} has {len} entries, time has {expected}"),
                ));
            }
        }
        Ok(Self {
            time,
            t_max,
            t_min,
            rh_max,
            rh_min,
            precip,
        })
    }

    /// Number of daily observations in the series
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the series contains no observations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}
