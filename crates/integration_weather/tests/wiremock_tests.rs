//! Integration tests for the OpenWeatherMap client using wiremock
//!
//! These tests verify the client's behavior against a mock HTTP server,
//! ensuring proper handling of various response scenarios.

use integration_weather::{OpenWeatherClient, WeatherClient, WeatherConfig, WeatherError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const API_KEY: &str = "test-key";

fn sample_current_response() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": 78.9629, "lat": 20.5937},
        "weather": [{"id": 721, "main": "Haze", "description": "haze", "icon": "50d"}],
        "base": "stations",
        "main": {
            "temp": 30.0,
            "feels_like": 32.4,
            "temp_min": 29.1,
            "temp_max": 31.0,
            "pressure": 1008,
            "humidity": 60
        },
        "visibility": 6000,
        "wind": {"speed": 3.6, "deg": 240},
        "clouds": {"all": 40},
        "dt": 1_704_456_000,
        "sys": {"country": "IN", "sunrise": 1_704_418_200, "sunset": 1_704_457_800},
        "timezone": 19800,
        "id": 1_262_180,
        "name": "Nagpur",
        "cod": 200
    })
}

fn sample_forecast_response() -> serde_json::Value {
    let list: Vec<_> = (0..8)
        .map(|i| {
            serde_json::json!({
                "dt": 1_704_456_000 + i * 10_800,
                "main": {
                    "temp": 25.0 + f64::from(i),
                    "feels_like": 25.0,
                    "temp_min": 24.0,
                    "temp_max": 26.0,
                    "pressure": 1010,
                    "humidity": 50 + i
                },
                "weather": [{"id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d"}],
                "wind": {"speed": 2.0, "deg": 90},
                "dt_txt": "2024-01-05 12:00:00"
            })
        })
        .collect();
    serde_json::json!({
        "cod": "200",
        "cnt": 8,
        "list": list,
        "city": {"name": "Nagpur", "country": "IN", "timezone": 19800}
    })
}

fn sample_daily_response() -> serde_json::Value {
    serde_json::json!({
        "city": {"name": "Nagpur", "country": "IN", "timezone": 19800},
        "cnt": 3,
        "list": [
            {
                "dt": 1_704_436_200,
                "temp": {"day": 27.0, "min": 15.4, "max": 29.6, "night": 17.0},
                "humidity": 45,
                "speed": 3.1,
                "weather": [{"id": 800, "main": "Clear", "description": "sky is clear", "icon": "01d"}]
            },
            {
                "dt": 1_704_522_600,
                "temp": {"min": 16.0, "max": 28.0},
                "humidity": 70,
                "rain": 2.34,
                "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}]
            },
            {
                "dt": 1_704_609_000,
                "temp": {"min": 14.0, "max": 27.5},
                "humidity": 55,
                "weather": []
            }
        ]
    })
}

fn sample_geocode_response() -> serde_json::Value {
    serde_json::json!([
        {
            "name": "Nagpur",
            "local_names": {"en": "Nagpur", "hi": "नागपुर"},
            "lat": 21.1458,
            "lon": 79.0882,
            "country": "IN",
            "state": "Maharashtra"
        }
    ])
}

#[allow(clippy::expect_used)]
fn create_test_client(mock_server: &MockServer) -> OpenWeatherClient {
    let config = WeatherConfig {
        base_url: mock_server.uri(),
        timeout_secs: 5,
        ..WeatherConfig::with_api_key(API_KEY)
    };
    OpenWeatherClient::new(config).expect("Failed to create client")
}

// ============================================================================
// Current conditions
// ============================================================================

#[tokio::test]
async fn test_get_current_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "20.5937"))
        .and(query_param("lon", "78.9629"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let current = client.get_current(20.5937, 78.9629).await.unwrap();

    assert_eq!(current.name, "Nagpur");
    assert_eq!(current.country.as_deref(), Some("IN"));
    assert!((current.temperature - 30.0).abs() < f64::EPSILON);
    assert_eq!(current.humidity, 60);
    assert!((current.pressure - 1008.0).abs() < f64::EPSILON);
    assert_eq!(current.visibility_m, Some(6000));
    assert_eq!(current.wind_direction, Some(240));
    assert_eq!(current.description, "haze");
    assert_eq!(current.condition_id, Some(721));
    assert_eq!(current.utc_offset_secs, 19800);
    assert!(current.sunrise.is_some());
}

#[tokio::test]
async fn test_get_current_without_optional_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "coord": {"lon": 78.9, "lat": 20.5},
            "weather": [],
            "main": {"temp": 18.0, "feels_like": 17.0, "pressure": 1015, "humidity": 88},
            "dt": 1_704_456_000
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let current = client.get_current(20.5, 78.9).await.unwrap();

    assert_eq!(current.visibility_m, None);
    assert_eq!(current.description, "");
    assert!(current.wind_speed.abs() < f64::EPSILON);
    assert_eq!(current.sunset, None);
}

#[tokio::test]
async fn test_invalid_coordinates_rejected_without_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current(95.0, 0.0).await;
    assert!(matches!(result, Err(WeatherError::InvalidCoordinates)));
}

// ============================================================================
// Forecasts
// ============================================================================

#[tokio::test]
async fn test_get_forecast_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("appid", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let steps = client.get_forecast(21.14, 79.08).await.unwrap();

    assert_eq!(steps.len(), 8);
    assert!((steps[3].temperature - 28.0).abs() < f64::EPSILON);
    assert_eq!(steps[3].humidity, 53);
    assert_eq!(steps[0].description, "few clouds");
    assert!(steps.windows(2).all(|w| w[0].time < w[1].time));
}

#[tokio::test]
async fn test_get_daily_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast/daily"))
        .and(query_param("cnt", "16"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_daily_response()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let days = client.get_daily(21.14, 79.08, 16).await.unwrap();

    assert_eq!(days.len(), 3);
    assert_eq!(days[0].wind_speed, Some(3.1));
    assert_eq!(days[0].rain_mm, None);
    assert_eq!(days[1].rain_mm, Some(2.34));
    assert_eq!(days[1].wind_speed, None);
    assert_eq!(days[2].description, "");
}

#[tokio::test]
async fn test_get_daily_clamps_day_count() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast/daily"))
        .and(query_param("cnt", "16"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_daily_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert!(client.get_daily(21.14, 79.08, 40).await.is_ok());
}

// ============================================================================
// Geocoding
// ============================================================================

#[tokio::test]
async fn test_reverse_geocode_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_geocode_response()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let places = client.reverse_geocode(21.14, 79.08, 1).await.unwrap();

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].name, "Nagpur");
    assert_eq!(places[0].state.as_deref(), Some("Maharashtra"));
}

#[tokio::test]
async fn test_reverse_geocode_empty_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert!(client.reverse_geocode(0.0, -30.0, 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_sends_query_and_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Nagpur"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_geocode_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let places = client.search("  Nagpur ", 5).await.unwrap();
    assert_eq!(places.len(), 1);
}

#[tokio::test]
async fn test_search_blank_query_skips_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert!(client.search("   ", 5).await.unwrap().is_empty());
}

// ============================================================================
// Error handling
// ============================================================================

#[tokio::test]
async fn test_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current(20.59, 78.96).await;
    assert!(matches!(result, Err(WeatherError::RateLimitExceeded)));
}

#[tokio::test]
async fn test_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_forecast(20.59, 78.96).await;
    assert!(matches!(result, Err(WeatherError::Unauthorized)));
}

#[tokio::test]
async fn test_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast/daily"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_daily(20.59, 78.96, 16).await;
    assert!(matches!(result, Err(WeatherError::ServiceUnavailable(_))));
}

#[tokio::test]
async fn test_client_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    match client.search("x", 5).await {
        Err(WeatherError::RequestFailed(msg)) => assert!(msg.contains("400")),
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current(20.59, 78.96).await;
    assert!(matches!(result, Err(WeatherError::ParseError(_))));
}

#[tokio::test]
async fn test_is_healthy() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert!(client.is_healthy().await);
}

#[tokio::test]
async fn test_is_unhealthy_on_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert!(!client.is_healthy().await);
}
