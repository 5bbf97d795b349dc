//! Integration tests for infrastructure adapters
//!
//! Tests cover:
//! - Weather adapter conversions and error mapping against a mock provider
//! - Gemini adapter against a mock generateContent endpoint
//! - The full dashboard load with no device fix (default coordinate)

#![allow(clippy::panic)]

use std::sync::Arc;

use ai_core::InferenceConfig;
use application::{
    ApplicationError, DashboardService, DashboardView, LocationService, LocationStatus,
    ports::{InferencePort, LocationError, WeatherPort},
};
use domain::GeoLocation;
use infrastructure::{ConfiguredLocationSource, GeminiInferenceAdapter, WeatherAdapter};
use integration_weather::WeatherConfig;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Fixtures
// ============================================================================

fn current_body() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": 78.9629, "lat": 20.5937},
        "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds"}],
        "main": {"temp": 30.0, "feels_like": 33.1, "pressure": 1012, "humidity": 60},
        "visibility": 10000,
        "wind": {"speed": 3.5, "deg": 225},
        "dt": 1_717_225_200,
        "sys": {"country": "IN", "sunrise": 1_717_200_600, "sunset": 1_717_248_000},
        "timezone": 19800,
        "name": "Betul"
    })
}

fn forecast_body() -> serde_json::Value {
    let list: Vec<_> = (0..8)
        .map(|i| {
            serde_json::json!({
                "dt": 1_717_236_000 + i * 10_800,
                "main": {"temp": 28.0, "feels_like": 29.0, "pressure": 1010, "humidity": 62 + i},
                "weather": [{"id": 500, "description": "light rain"}],
                "wind": {"speed": 2.0, "deg": 90}
            })
        })
        .collect();
    serde_json::json!({"cnt": 8, "list": list, "city": {"timezone": 19800}})
}

fn daily_body() -> serde_json::Value {
    serde_json::json!({
        "cnt": 2,
        "list": [
            {
                "dt": 1_717_223_400,
                "temp": {"min": 24.4, "max": 33.6},
                "humidity": 55,
                "speed": 4.2,
                "rain": 2.34,
                "weather": [{"id": 500, "description": "light rain"}]
            },
            {
                "dt": 1_717_309_800,
                "temp": {"min": 25.0, "max": 34.0},
                "humidity": 50,
                "weather": [{"id": 800, "description": "clear sky"}]
            }
        ]
    })
}

fn reverse_body() -> serde_json::Value {
    serde_json::json!([{
        "name": "Betul",
        "lat": 20.59,
        "lon": 78.96,
        "country": "IN",
        "state": "Madhya Pradesh"
    }])
}

#[allow(clippy::expect_used)]
fn weather_adapter(server: &MockServer) -> WeatherAdapter {
    WeatherAdapter::new(WeatherConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..WeatherConfig::with_api_key("owm-test")
    })
    .expect("adapter")
}

async fn mount_default_coordinate(server: &MockServer) {
    let lat = "20.5937";
    let lon = "78.9629";
    for (route, body) in [
        ("/data/2.5/weather", current_body()),
        ("/data/2.5/forecast", forecast_body()),
        ("/data/2.5/forecast/daily", daily_body()),
        ("/geo/1.0/reverse", reverse_body()),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .and(query_param("lat", lat))
            .and(query_param("lon", lon))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }
}

// ============================================================================
// Weather adapter
// ============================================================================

#[tokio::test]
async fn current_conditions_are_converted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;

    let reading = weather_adapter(&server)
        .current_conditions(&GeoLocation::india_center())
        .await
        .unwrap();

    assert_eq!(reading.location_name, "Betul");
    assert_eq!(reading.humidity.value(), 60);
    assert_eq!(reading.visibility_km(), Some(10.0));
    assert_eq!(reading.wind_compass(), Some("SW"));
    assert_eq!(reading.utc_offset_secs, 19800);
}

#[tokio::test]
async fn daily_forecast_keeps_rain_and_wind_optional() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast/daily"))
        .and(query_param("cnt", "16"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_body()))
        .mount(&server)
        .await;

    let days = weather_adapter(&server)
        .daily_forecast(&GeoLocation::india_center(), 16)
        .await
        .unwrap();

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].rain_mm, Some(2.34));
    assert_eq!(days[0].wind_speed, Some(4.2));
    assert!(days[1].rain_mm.is_none());
    assert!(days[1].wind_speed.is_none());
}

#[tokio::test]
async fn empty_reverse_geocode_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let place = weather_adapter(&server)
        .reverse_geocode(&GeoLocation::india_center())
        .await
        .unwrap();
    assert!(place.is_none());
}

#[tokio::test]
async fn search_places_maps_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Betul"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reverse_body()))
        .mount(&server)
        .await;

    let places = weather_adapter(&server)
        .search_places("Betul", 5)
        .await
        .unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].display_name(), "Betul, Madhya Pradesh, IN");
}

#[tokio::test]
async fn rate_limit_maps_to_application_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = weather_adapter(&server)
        .short_range_forecast(&GeoLocation::india_center())
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::RateLimited));
}

#[tokio::test]
async fn rejected_key_maps_to_configuration_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = weather_adapter(&server)
        .current_conditions(&GeoLocation::india_center())
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Configuration(_)));
}

// ============================================================================
// Gemini adapter
// ============================================================================

#[tokio::test]
async fn gemini_adapter_returns_text_and_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "- Sow after the first soaking rain."}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 80, "candidatesTokenCount": 12, "totalTokenCount": 92}
        })))
        .mount(&server)
        .await;

    let adapter = GeminiInferenceAdapter::new(InferenceConfig {
        base_url: server.uri(),
        ..InferenceConfig::gemini_flash("gem-test")
    })
    .unwrap();

    let result = adapter.generate("prompt").await.unwrap();
    assert_eq!(result.content, "- Sow after the first soaking rain.");
    assert_eq!(result.tokens_used, Some(92));
    assert_eq!(result.model, "gemini-2.5-flash");
}

#[tokio::test]
async fn gemini_adapter_server_error_is_external() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let adapter = GeminiInferenceAdapter::new(InferenceConfig {
        base_url: server.uri(),
        ..InferenceConfig::gemini_flash("gem-test")
    })
    .unwrap();

    let err = adapter.generate("prompt").await.unwrap_err();
    assert!(matches!(err, ApplicationError::ExternalService(_)));
}

// ============================================================================
// Dashboard end to end
// ============================================================================

#[tokio::test]
async fn no_device_fix_loads_dashboard_for_default_coordinate() {
    let server = MockServer::start().await;
    mount_default_coordinate(&server).await;

    let weather: Arc<dyn WeatherPort> = Arc::new(weather_adapter(&server));
    let location = Arc::new(LocationService::new(Arc::new(
        ConfiguredLocationSource::default(),
    )));
    let dashboard = DashboardService::new(weather, location);

    dashboard.ensure_loaded().await;

    let DashboardView::Ready(data) = dashboard.view(0) else {
        panic!("dashboard should be ready");
    };
    assert_eq!(data.location.location, GeoLocation::india_center());
    assert!(matches!(
        data.location_status,
        LocationStatus::Failed {
            error: LocationError::Unavailable(_)
        }
    ));
    assert_eq!(data.place_name.as_deref(), Some("Betul, Madhya Pradesh, IN"));
    assert_eq!(data.snapshot_display.dew_point, "22.0°C");
    assert_eq!(data.daily[0].rain.as_deref(), Some("Rain: 2.3 mm"));
    assert!(data.daily[1].rain.is_none());
    assert_eq!(data.rain_proxy.len(), 5);
}
