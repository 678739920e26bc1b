//! Upstream weather client and payload normalization
//!
//! Fetches daily observations from a station's CoAgMet-style endpoint and
//! normalizes them into the canonical [`WeatherSeries`] shape. One request
//! per call; the retry policy is injected through [`WeatherConfig`] and
//! defaults to zero retries, so a failed fetch surfaces immediately and
//! the caller decides whether to try again.

use std::time::Duration;

use chrono::{Days, Utc};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::RetryTransientMiddleware;
use tracing::{debug, info};

use crate::config::WeatherConfig;
use crate::error::FieldWeatherError;
use crate::models::{StationRecord, WeatherSeries};
use crate::Result;

/// HTTP client for station observation endpoints
#[derive(Clone)]
pub struct WeatherClient {
    client: ClientWithMiddleware,
}

impl WeatherClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    /// Fails with [`FieldWeatherError::Config`] if the underlying HTTP
    /// client cannot be constructed.
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(concat!("fieldweather/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FieldWeatherError::config(format!("failed to build HTTP client: {e}")))?;

        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(inner)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { client })
    }

    /// Fetch the trailing `days` days of daily observations for a station,
    /// ending today (inclusive), and normalize them.
    ///
    /// # Errors
    /// Any transport error, non-2xx status, or payload that does not carry
    /// the five expected equal-length arrays yields
    /// [`FieldWeatherError::UpstreamFetch`]; a partial series is never
    /// returned.
    pub async fn fetch_series(
        &self,
        station: &StationRecord,
        days: u32,
    ) -> Result<WeatherSeries> {
        let to = Utc::now().date_naive();
        let from = to
            .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
            .unwrap_or(to);

        debug!(
            station = %station.id,
            %from,
            %to,
            "requesting daily observations"
        );

        let from_param = from.to_string();
        let to_param = to.to_string();
        let response = self
            .client
            .get(station.url.as_str())
            .query(&[
                ("frequency", "daily"),
                ("units", "us"),
                ("from", from_param.as_str()),
                ("to", to_param.as_str()),
                ("fields", "tMax,tMin,rhMax,rhMin,precip"),
            ])
            .send()
            .await
            .map_err(|e| FieldWeatherError::upstream_fetch(&station.id, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FieldWeatherError::upstream_fetch(
                &station.id,
                format!("unexpected status {status}"),
            ));
        }

        let payload: coagmet::DailyResponse = response.json().await.map_err(|e| {
            FieldWeatherError::upstream_fetch(
                &station.id,
                format!("failed to parse observation payload: {e}"),
            )
        })?;

        let series = payload.into_series(&station.id)?;
        info!(
            station = %station.id,
            observations = series.len(),
            "fetched weather series"
        );
        Ok(series)
    }
}

/// CoAgMet API response structures and conversion into the canonical series
mod coagmet {
    use serde::Deserialize;

    use crate::error::FieldWeatherError;
    use crate::models::WeatherSeries;
    use crate::Result;

    /// Daily observation response from the CoAgMet API.
    ///
    /// Metadata fields (`which`, `frequency`, ...) are accepted but unused;
    /// normalization only cares about the five data arrays.
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    pub struct DailyResponse {
        pub which: Option<String>,
        pub frequency: Option<String>,
        pub timestep: Option<u64>,
        pub timezone: Option<String>,
        #[serde(rename = "tzOffset")]
        pub tz_offset: Option<String>,
        pub units: Option<String>,
        pub station: Option<String>,
        pub time: Option<Vec<String>>,
        #[serde(rename = "tMax")]
        pub t_max: Option<Vec<f64>>,
        #[serde(rename = "tMin")]
        pub t_min: Option<Vec<f64>>,
        #[serde(rename = "rhMax")]
        pub rh_max: Option<Vec<f64>>,
        #[serde(rename = "rhMin")]
        pub rh_min: Option<Vec<f64>>,
        pub precip: Option<Vec<f64>>,
    }

    impl DailyResponse {
        /// Normalize into a [`WeatherSeries`], rejecting missing arrays
        pub fn into_series(self, station_id: &str) -> Result<WeatherSeries> {
            let missing = |field: &str| {
                FieldWeatherError::upstream_fetch(
                    station_id,
                    format!("payload is missing the '{field}' array"),
                )
            };

            let time = self.time.ok_or_else(|| missing("time"))?;
            let t_max = self.t_max.ok_or_else(|| missing("tMax"))?;
            let t_min = self.t_min.ok_or_else(|| missing("tMin"))?;
            let rh_max = self.rh_max.ok_or_else(|| missing("rhMax"))?;
            let rh_min = self.rh_min.ok_or_else(|| missing("rhMin"))?;
            let precip = self.precip.ok_or_else(|| missing("precip"))?;

            WeatherSeries::new(station_id, time, t_max, t_min, rh_max, rh_min, precip)
        }
    }
}
