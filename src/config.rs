//! Configuration management for the `FieldWeather` core
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::FieldWeatherError;

/// Root configuration structure for the `FieldWeather` core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldWeatherConfig {
    /// Upstream weather client configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Station catalog configuration
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Field validation configuration
    #[serde(default)]
    pub field: FieldConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream weather client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Retries for failed requests; 0 means single attempt, fail fast
    #[serde(default)]
    pub max_retries: u32,
    /// Trailing window of daily observations to request, ending today
    #[serde(default = "default_fetch_days")]
    pub fetch_days: u32,
}

/// Station catalog settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a station dataset file; the embedded dataset is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Field validation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Maximum permitted field size in acres
    #[serde(default = "default_max_acres")]
    pub max_acres: f64,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_weather_timeout() -> u32 {
    30
}

fn default_fetch_days() -> u32 {
    7
}

fn default_max_acres() -> f64 {
    100.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_weather_timeout(),
            max_retries: 0,
            fetch_days: default_fetch_days(),
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_acres: default_max_acres(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for FieldWeatherConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig::default(),
            catalog: CatalogConfig::default(),
            field: FieldConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl FieldWeatherConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with FIELDWEATHER_ prefix
        builder = builder.add_source(
            Environment::with_prefix("FIELDWEATHER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: FieldWeatherConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fieldweather").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(FieldWeatherError::config(
                "Weather request timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.weather.max_retries > 10 {
            return Err(
                FieldWeatherError::config("Weather max retries cannot exceed 10").into(),
            );
        }

        if self.weather.fetch_days == 0 || self.weather.fetch_days > 30 {
            return Err(FieldWeatherError::config(
                "Weather fetch window must be between 1 and 30 days",
            )
            .into());
        }

        if self.field.max_acres <= 0.0 || self.field.max_acres > 1000.0 {
            return Err(FieldWeatherError::config(
                "Maximum field size must be between 0 and 1000 acres",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(FieldWeatherError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(FieldWeatherError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FieldWeatherConfig::default();
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.weather.max_retries, 0);
        assert_eq!(config.weather.fetch_days, 7);
        assert_eq!(config.field.max_acres, 100.0);
        assert_eq!(config.logging.level, "info");
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FieldWeatherConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = FieldWeatherConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = FieldWeatherConfig::default();
        config.weather.timeout_seconds = 500;
        assert!(config.validate().is_err());

        let mut config = FieldWeatherConfig::default();
        config.weather.fetch_days = 0;
        assert!(config.validate().is_err());

        let mut config = FieldWeatherConfig::default();
        config.field.max_acres = -5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_path_generation() {
        let path = FieldWeatherConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("fieldweather"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
