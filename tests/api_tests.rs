//! Black-box tests for the trip planning endpoint
//!
//! External providers are served by wiremock doubles; the router is driven
//! directly with `tower::ServiceExt::oneshot`, so these cover the full
//! request cycle without binding a socket.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trip_planner::api::{self, AppState};
use trip_planner::config::ProvidersConfig;
use trip_planner::{ProviderGateway, TripPlanner};

fn providers_config(server: &MockServer) -> ProvidersConfig {
    ProvidersConfig {
        geoapify_api_key: "test-geoapify-key".to_string(),
        weatherstack_api_key: "test-weatherstack-key".to_string(),
        geocoding_url: format!("{}/v1/geocode/search", server.uri()),
        places_url: format!("{}/v2/places", server.uri()),
        weather_url: format!("{}/current", server.uri()),
        ..ProvidersConfig::default()
    }
}

fn app(server: &MockServer) -> Router {
    let gateway = ProviderGateway::new(providers_config(server)).unwrap();
    let state = Arc::new(AppState {
        planner: TripPlanner::new(gateway),
    });
    Router::new().nest("/api", api::router(state))
}

async fn post_plan_trip(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::post("/api/plan-trip")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

fn geocode_response(lat: f64, lon: f64) -> Value {
    json!({
        "features": [
            { "properties": { "lat": lat, "lon": lon, "name": "Berlin" } }
        ]
    })
}

async fn mount_geocode_berlin(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .and(query_param("text", "Berlin"))
        .and(query_param("apiKey", "test-geoapify-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocode_response(52.52, 13.405)))
        .mount(server)
        .await;
}

async fn mount_weather_current(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/current"))
        .and(query_param("access_key", "test-weatherstack-key"))
        .and(query_param("query", "52.52,13.405"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": {
                "temperature": 18.0,
                "weather_descriptions": ["Partly cloudy"],
                "wind_speed": 11.0,
                "humidity": 62.0
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn empty_location_is_rejected_before_any_provider_call() {
    let server = MockServer::start().await;

    let (status, body) = post_plan_trip(app(&server), json!({ "location": "   " })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Location is required");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_location_field_is_rejected() {
    let server = MockServer::start().await;

    let (status, body) = post_plan_trip(app(&server), json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Location is required");
}

#[tokio::test]
async fn unknown_location_yields_not_found_and_skips_downstream_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .mount(&server)
        .await;

    let (status, body) = post_plan_trip(app(&server), json!({ "location": "Atlantis" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Location not found");
    // Only the geocoding call went out; hotels and weather were never tried
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn full_trip_plan_happy_path() {
    let server = MockServer::start().await;
    mount_geocode_berlin(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .and(query_param("categories", "accommodation.hotel"))
        .and(query_param("filter", "circle:13.405,52.52,5000"))
        .and(query_param("limit", "5"))
        .and(query_param("apiKey", "test-geoapify-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "features": [
                {
                    "properties": {
                        "name": "Hotel Adlon",
                        "address_line1": "Unter den Linden 77",
                        "lat": 52.5163,
                        "lon": 13.3777
                    }
                },
                {
                    // name, address and coordinates all absent
                    "properties": {}
                }
            ]
        })))
        .mount(&server)
        .await;

    mount_weather_current(&server).await;

    let (status, body) = post_plan_trip(app(&server), json!({ "location": "Berlin" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Berlin");
    assert_eq!(body["coordinates"]["lat"], 52.52);
    assert_eq!(body["coordinates"]["lon"], 13.405);

    let hotels = body["hotels"].as_array().unwrap();
    assert_eq!(hotels.len(), 2);
    assert_eq!(hotels[0]["name"], "Hotel Adlon");
    assert_eq!(hotels[0]["address"], "Unter den Linden 77");
    let distance = hotels[0]["distance_km"].as_f64().unwrap();
    assert!(
        distance > 1.0 && distance < 3.0,
        "unexpected distance {distance}"
    );

    assert_eq!(hotels[1]["name"], "");
    assert_eq!(hotels[1]["address"], "");
    assert_eq!(hotels[1]["distance_km"], "N/A");

    assert_eq!(body["weather"]["temperature"], 18.0);
    assert_eq!(body["weather"]["description"], "Partly cloudy");
    assert_eq!(body["weather"]["wind_speed"], 11.0);
    assert_eq!(body["weather"]["humidity"], 62.0);

    let taxi = &body["taxiBooking"];
    let taxi_id = taxi["taxiId"].as_str().unwrap();
    let suffix: u32 = taxi_id.strip_prefix("TX").unwrap().parse().unwrap();
    assert!(suffix < 10_000);
    let eta = taxi["etaMinutes"].as_u64().unwrap();
    assert!((5..20).contains(&eta));
    assert!(taxi["message"].as_str().unwrap().contains("Berlin"));
}

#[tokio::test]
async fn zero_hotels_still_produces_a_plan() {
    let server = MockServer::start().await;
    mount_geocode_berlin(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .mount(&server)
        .await;

    mount_weather_current(&server).await;

    let (status, body) = post_plan_trip(app(&server), json!({ "location": "Berlin" })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["hotels"].as_array().unwrap().is_empty());
    assert!(body["weather"].is_object());
    assert!(body["taxiBooking"].is_object());
}

#[tokio::test]
async fn absent_current_weather_is_null_not_an_error() {
    let server = MockServer::start().await;
    mount_geocode_berlin(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "features": [
                { "properties": { "name": "Pension Alpha", "lat": 52.52, "lon": 13.405 } }
            ]
        })))
        .mount(&server)
        .await;

    // Weatherstack reports failures as HTTP 200 without a current block
    Mock::given(method("GET"))
        .and(path("/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": { "code": 615, "type": "request_failed" }
        })))
        .mount(&server)
        .await;

    let (status, body) = post_plan_trip(app(&server), json!({ "location": "Berlin" })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["weather"].is_null());
    assert_eq!(body["hotels"].as_array().unwrap().len(), 1);
    assert!(body["taxiBooking"]["message"].as_str().unwrap().contains("Berlin"));
}

#[tokio::test]
async fn geocoding_transport_failure_maps_to_internal_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let (status, body) = post_plan_trip(app(&server), json!({ "location": "Berlin" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn malformed_weather_payload_maps_to_internal_error() {
    let server = MockServer::start().await;
    mount_geocode_berlin(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/current"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let (status, body) = post_plan_trip(app(&server), json!({ "location": "Berlin" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn location_is_trimmed_before_geocoding() {
    let server = MockServer::start().await;
    mount_geocode_berlin(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .mount(&server)
        .await;

    mount_weather_current(&server).await;

    let (status, body) = post_plan_trip(app(&server), json!({ "location": "  Berlin  " })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Berlin");
}
