//! Error types and handling for the `FieldWeather` core

use thiserror::Error;

/// Main error type for the `FieldWeather` core
#[derive(Error, Debug)]
pub enum FieldWeatherError {
    /// Malformed polygon ring (too few points, unclosed, coordinate out of range)
    #[error("Invalid geometry: {message}")]
    InvalidGeometry { message: String },

    /// Parcel exceeds the configured acreage cap
    #[error("Field area of {actual_acres:.2} acres exceeds the {max_acres:.0} acre limit")]
    AreaExceeded { actual_acres: f64, max_acres: f64 },

    /// Station catalog contained no stations at resolution time
    #[error("No weather stations available for nearest-station lookup")]
    NoStationsAvailable,

    /// Upstream weather provider failure (transport, non-2xx, or bad payload)
    #[error("Weather fetch for station '{station_id}' failed: {message}")]
    UpstreamFetch { station_id: String, message: String },

    /// Station catalog load/parse errors
    #[error("Catalog error: {message}")]
    Catalog { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl FieldWeatherError {
    /// Create a new invalid-geometry error
    pub fn invalid_geometry<S: Into<String>>(message: S) -> Self {
        Self::InvalidGeometry {
            message: message.into(),
        }
    }

    /// Create a new upstream fetch error for a station
    pub fn upstream_fetch<S: Into<String>, M: Into<String>>(station_id: S, message: M) -> Self {
        Self::UpstreamFetch {
            station_id: station_id.into(),
            message: message.into(),
        }
    }

    /// Create a new catalog error
    pub fn catalog<S: Into<String>>(message: S) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the caller should surface this as a client error (user-correctable input)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FieldWeatherError::InvalidGeometry { .. } | FieldWeatherError::AreaExceeded { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FieldWeatherError::InvalidGeometry { message } => {
                format!("The drawn field boundary is not valid: {message}")
            }
            FieldWeatherError::AreaExceeded {
                actual_acres,
                max_acres,
            } => {
                format!(
                    "Field area is {actual_acres:.2} acres, which exceeds the maximum of {max_acres:.0} acres."
                )
            }
            FieldWeatherError::NoStationsAvailable => {
                "No weather stations are configured. This is a deployment problem.".to_string()
            }
            FieldWeatherError::UpstreamFetch { .. } => {
                "Unable to retrieve weather data from the station network. Please try again later."
                    .to_string()
            }
            FieldWeatherError::Catalog { .. } => {
                "The weather station catalog could not be loaded.".to_string()
            }
            FieldWeatherError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            FieldWeatherError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
