//! Nearest-station resolution and the combined polygon-to-weather pipeline

use haversine::{distance, Location as HaversineLocation, Units};
use tracing::{debug, info};

use crate::config::FieldWeatherConfig;
use crate::error::FieldWeatherError;
use crate::geometry;
use crate::models::{AreaResult, Centroid, GeoPolygon, NearestStationResult, WeatherSeries};
use crate::station::StationCatalog;
use crate::weather::WeatherClient;
use crate::Result;

/// Everything the caller needs to render weather for one field polygon
#[derive(Debug, Clone)]
pub struct PolygonWeather {
    /// The validated polygon's area
    pub area: AreaResult,
    /// The station that won the nearest lookup, with its distance
    pub nearest: NearestStationResult,
    /// Normalized daily observations for that station
    pub weather: WeatherSeries,
}

/// Great-circle distance in kilometers between a centroid and a station
fn distance_km(centroid: &Centroid, latitude: f64, longitude: f64) -> f64 {
    distance(
        HaversineLocation {
            latitude: centroid.latitude,
            longitude: centroid.longitude,
        },
        HaversineLocation {
            latitude,
            longitude,
        },
        Units::Kilometers,
    )
}

/// Find the station nearest to a centroid.
///
/// Iterates the catalog in dataset order computing haversine distance
/// (Earth radius 6371 km). Strict `<` comparison means an equidistant
/// later station never displaces an earlier one, so results are
/// deterministic and stable across calls. The reported distance is
/// rounded to one decimal for display.
///
/// # Errors
/// Returns [`FieldWeatherError::NoStationsAvailable`] for an empty
/// catalog. Startup catalog checks make this unreachable in practice,
/// but the contract holds regardless.
pub fn nearest(centroid: &Centroid, catalog: &StationCatalog) -> Result<NearestStationResult> {
    nearest_of(centroid, catalog.all())
}

fn nearest_of(
    centroid: &Centroid,
    stations: &[crate::models::StationRecord],
) -> Result<NearestStationResult> {
    let mut best: Option<(usize, f64)> = None;

    for (index, station) in stations.iter().enumerate() {
        let km = distance_km(centroid, station.latitude, station.longitude);
        match best {
            Some((_, best_km)) if km >= best_km => {}
            _ => best = Some((index, km)),
        }
    }

    let (index, km) = best.ok_or(FieldWeatherError::NoStationsAvailable)?;
    let station = stations[index].clone();
    debug!(station = %station.id, distance_km = km, "resolved nearest station");

    Ok(NearestStationResult {
        station,
        distance_km: (km * 10.0).round() / 10.0,
    })
}

/// Resolves field polygons to their nearest station's weather.
///
/// Stateless per invocation; the catalog is passed in at call time so
/// tests can run against synthetic catalogs, and concurrent resolutions
/// never interfere.
#[derive(Clone)]
pub struct StationResolver {
    weather: WeatherClient,
    max_field_acres: f64,
    fetch_days: u32,
}

impl StationResolver {
    /// Build a resolver from configuration
    pub fn new(config: &FieldWeatherConfig) -> Result<Self> {
        Ok(Self {
            weather: WeatherClient::new(&config.weather)?,
            max_field_acres: config.field.max_acres,
            fetch_days: config.weather.fetch_days,
        })
    }

    /// Build a resolver around an existing client (used by tests that
    /// point the client at a mock upstream)
    #[must_use]
    pub fn with_client(weather: WeatherClient, max_field_acres: f64, fetch_days: u32) -> Self {
        Self {
            weather,
            max_field_acres,
            fetch_days,
        }
    }

    /// Find the station nearest to a centroid
    pub fn nearest(
        &self,
        centroid: &Centroid,
        catalog: &StationCatalog,
    ) -> Result<NearestStationResult> {
        nearest(centroid, catalog)
    }

    /// Validate a polygon, resolve its nearest station, and fetch that
    /// station's weather, short-circuiting on the first failure.
    ///
    /// # Errors
    /// Propagates [`FieldWeatherError::InvalidGeometry`],
    /// [`FieldWeatherError::AreaExceeded`],
    /// [`FieldWeatherError::NoStationsAvailable`], and
    /// [`FieldWeatherError::UpstreamFetch`] from the individual steps.
    pub async fn resolve_weather_for_polygon(
        &self,
        polygon: &GeoPolygon,
        catalog: &StationCatalog,
    ) -> Result<PolygonWeather> {
        let area = geometry::validate_max_area(polygon, self.max_field_acres)?;
        let centroid = geometry::centroid(polygon);
        let nearest = nearest(&centroid, catalog)?;
        let weather = self
            .weather
            .fetch_series(&nearest.station, self.fetch_days)
            .await?;

        info!(
            station = %nearest.station.id,
            distance_km = nearest.distance_km,
            acres = area.acres,
            "resolved weather for field polygon"
        );

        Ok(PolygonWeather {
            area,
            nearest,
            weather,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StationRecord;

    fn station(id: &str, lat: f64, lon: f64) -> StationRecord {
        StationRecord {
            id: id.to_string(),
            name: id.to_uppercase(),
            latitude: lat,
            longitude: lon,
            url: format!("https://coagmet.colostate.edu/api/v1/weather/{id}"),
        }
    }

    fn two_station_catalog() -> StationCatalog {
        StationCatalog::from_records(vec![
            station("A", 40.0, -105.0),
            station("B", 40.5, -105.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_resolver_builds_from_default_config() {
        let config = FieldWeatherConfig::default();
        let resolver = StationResolver::new(&config).unwrap();
        assert_eq!(resolver.max_field_acres, 100.0);
        assert_eq!(resolver.fetch_days, 7);
    }

    #[test]
    fn test_nearest_picks_closer_station() {
        let catalog = two_station_catalog();
        let centroid = Centroid {
            latitude: 40.01,
            longitude: -105.0,
        };

        let result = nearest(&centroid, &catalog).unwrap();
        assert_eq!(result.station.id, "A");
        // 0.01 degrees of latitude is ~1.1 km
        assert!((result.distance_km - 1.1).abs() < 0.05);
    }

    #[test]
    fn test_nearest_is_deterministic() {
        let catalog = two_station_catalog();
        let centroid = Centroid {
            latitude: 40.2,
            longitude: -105.3,
        };

        let first = nearest(&centroid, &catalog).unwrap();
        for _ in 0..10 {
            let again = nearest(&centroid, &catalog).unwrap();
            assert_eq!(again.station.id, first.station.id);
            assert_eq!(again.distance_km, first.distance_km);
        }
    }

    #[test]
    fn test_equidistant_tie_keeps_catalog_order() {
        // Two stations symmetric about latitude 40.25 are equidistant from
        // a centroid on that line; the first in catalog order must win.
        let catalog = two_station_catalog();
        let centroid = Centroid {
            latitude: 40.25,
            longitude: -105.0,
        };

        let result = nearest(&centroid, &catalog).unwrap();
        assert_eq!(result.station.id, "A");
    }

    #[test]
    fn test_empty_station_set_yields_no_stations_available() {
        // Catalog construction forbids the empty state, so the contract is
        // exercised directly against an empty station slice.
        let centroid = Centroid {
            latitude: 40.0,
            longitude: -105.0,
        };
        let err = nearest_of(&centroid, &[]).unwrap_err();
        assert!(matches!(err, FieldWeatherError::NoStationsAvailable));
    }

    #[test]
    fn test_distance_rounded_to_one_decimal() {
        let catalog = two_station_catalog();
        let centroid = Centroid {
            latitude: 40.0731,
            longitude: -105.1113,
        };

        let result = nearest(&centroid, &catalog).unwrap();
        let scaled = result.distance_km * 10.0;
        assert!((scaled - scaled.round()).abs() < 1e-9);
    }
}
