//! End-to-end resolution tests against a mock station network

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fieldweather::config::WeatherConfig;
use fieldweather::models::{GeoPolygon, StationRecord};
use fieldweather::{FieldWeatherError, StationCatalog, StationResolver, WeatherClient};

fn station(id: &str, lat: f64, lon: f64, base_url: &str) -> StationRecord {
    StationRecord {
        id: id.to_string(),
        name: id.to_uppercase(),
        latitude: lat,
        longitude: lon,
        url: format!("{base_url}/api/v1/weather/{id}"),
    }
}

fn resolver() -> StationResolver {
    let config = WeatherConfig {
        timeout_seconds: 5,
        max_retries: 0,
        fetch_days: 7,
    };
    StationResolver::with_client(WeatherClient::new(&config).unwrap(), 100.0, 7)
}

/// Roughly 40-acre rectangle near (40.097, -105.281), closest to alt01
fn forty_acre_field() -> GeoPolygon {
    GeoPolygon::from_lonlat_pairs(&[
        (-105.283, 40.095),
        (-105.283, 40.099),
        (-105.279, 40.099),
        (-105.279, 40.095),
        (-105.283, 40.095),
    ])
}

fn weather_payload() -> serde_json::Value {
    serde_json::json!({
        "which": "qc",
        "frequency": "daily",
        "timestep": 86400,
        "timezone": "mst",
        "tzOffset": "-07:00",
        "units": "us",
        "station": "alt01",
        "time": ["2025-06-01", "2025-06-02", "2025-06-03"],
        "tMax": [85.69, 82.17, 79.04],
        "tMin": [50.92, 49.59, 48.11],
        "rhMax": [0.85, 0.946, 0.901],
        "rhMin": [0.243, 0.302, 0.288],
        "precip": [0.0, 0.25, 0.02]
    })
}

#[tokio::test]
async fn resolves_weather_for_valid_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/weather/alt01"))
        .and(query_param("frequency", "daily"))
        .and(query_param("units", "us"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_payload()))
        .mount(&server)
        .await;

    let catalog = StationCatalog::from_records(vec![
        station("alt01", 40.1343, -105.2829, &server.uri()),
        station("bld01", 40.0150, -105.2705, &server.uri()),
    ])
    .unwrap();

    let resolved = resolver()
        .resolve_weather_for_polygon(&forty_acre_field(), &catalog)
        .await
        .unwrap();

    // Validation passed and the closest station won, within a few km.
    assert!(resolved.area.acres > 30.0 && resolved.area.acres < 50.0);
    assert_eq!(resolved.nearest.station.id, "alt01");
    assert!(resolved.nearest.distance_km < 10.0);

    // All five arrays share one length.
    let n = resolved.weather.time.len();
    assert_eq!(n, 3);
    assert_eq!(resolved.weather.t_max.len(), n);
    assert_eq!(resolved.weather.t_min.len(), n);
    assert_eq!(resolved.weather.rh_max.len(), n);
    assert_eq!(resolved.weather.rh_min.len(), n);
    assert_eq!(resolved.weather.precip.len(), n);
}

#[tokio::test]
async fn mismatched_upstream_arrays_fail_without_partial_series() {
    let server = MockServer::start().await;
    let mut payload = weather_payload();
    payload["precip"] = serde_json::json!([0.0]);
    Mock::given(method("GET"))
        .and(path("/api/v1/weather/alt01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&server)
        .await;

    let catalog =
        StationCatalog::from_records(vec![station("alt01", 40.1343, -105.2829, &server.uri())])
            .unwrap();

    let err = resolver()
        .resolve_weather_for_polygon(&forty_acre_field(), &catalog)
        .await
        .unwrap_err();

    match err {
        FieldWeatherError::UpstreamFetch {
            station_id,
            message,
        } => {
            assert_eq!(station_id, "alt01");
            assert!(message.contains("length mismatch"));
        }
        other => panic!("expected UpstreamFetch, got {other:?}"),
    }
}

#[tokio::test]
async fn upstream_server_error_surfaces_as_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/weather/alt01"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1) // zero-retry policy: exactly one attempt
        .mount(&server)
        .await;

    let catalog =
        StationCatalog::from_records(vec![station("alt01", 40.1343, -105.2829, &server.uri())])
            .unwrap();

    let err = resolver()
        .resolve_weather_for_polygon(&forty_acre_field(), &catalog)
        .await
        .unwrap_err();

    assert!(matches!(err, FieldWeatherError::UpstreamFetch { .. }));
}

#[tokio::test]
async fn oversized_field_short_circuits_before_any_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_payload()))
        .expect(0)
        .mount(&server)
        .await;

    let catalog =
        StationCatalog::from_records(vec![station("alt01", 40.1343, -105.2829, &server.uri())])
            .unwrap();

    // ~0.02 x 0.02 degrees is on the order of 900 acres
    let oversized = GeoPolygon::from_lonlat_pairs(&[
        (-105.29, 40.09),
        (-105.29, 40.11),
        (-105.27, 40.11),
        (-105.27, 40.09),
        (-105.29, 40.09),
    ]);

    let err = resolver()
        .resolve_weather_for_polygon(&oversized, &catalog)
        .await
        .unwrap_err();

    match err {
        FieldWeatherError::AreaExceeded { actual_acres, .. } => {
            assert!(actual_acres > 100.0);
        }
        other => panic!("expected AreaExceeded, got {other:?}"),
    }
}

#[tokio::test]
async fn unclosed_ring_is_rejected_before_any_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_payload()))
        .expect(0)
        .mount(&server)
        .await;

    let catalog =
        StationCatalog::from_records(vec![station("alt01", 40.1343, -105.2829, &server.uri())])
            .unwrap();

    let unclosed = GeoPolygon::from_lonlat_pairs(&[
        (-105.283, 40.095),
        (-105.283, 40.099),
        (-105.279, 40.099),
        (-105.279, 40.095),
    ]);

    let err = resolver()
        .resolve_weather_for_polygon(&unclosed, &catalog)
        .await
        .unwrap_err();

    assert!(matches!(err, FieldWeatherError::InvalidGeometry { .. }));
}
