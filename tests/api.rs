//! HTTP front end integration tests

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use gale_assistant::api::{router, ApiState};
use gale_assistant::store::CityStore;

mod common;
use common::MockWeather;

fn test_app(weather: MockWeather, dir: &tempfile::TempDir) -> (Router, CityStore) {
    let cities = CityStore::new(dir.path().join("saved_cities.txt"));
    let app = router(ApiState {
        weather: Arc::new(weather),
        cities: cities.clone(),
    });
    (app, cities)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(MockWeather::new(), &dir);

    let (status, body) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_weather_endpoint_records_city() {
    let dir = tempfile::tempdir().unwrap();
    let (app, cities) = test_app(MockWeather::new(), &dir);

    let (status, body) = get_json(app, "/api/weather?city=berlin").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "berlin");
    assert_eq!(body["temp_c"], 20.0);
    assert_eq!(cities.load().unwrap(), vec!["berlin"]);
}

#[tokio::test]
async fn test_weather_endpoint_requires_city_param() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(MockWeather::new(), &dir);

    let (status, _) = get_json(app, "/api/weather").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upstream_failure_maps_to_bad_gateway() {
    let dir = tempfile::tempdir().unwrap();
    let (app, cities) = test_app(MockWeather::failing_for(&["atlantis"]), &dir);

    let (status, body) = get_json(app, "/api/weather?city=atlantis").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("atlantis"));
    // Failed lookups are never recorded
    assert!(cities.load().unwrap().is_empty());
}

#[tokio::test]
async fn test_forecast_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let (app, cities) = test_app(MockWeather::new(), &dir);

    let (status, body) = get_json(app, "/api/forecast?city=oslo").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "oslo");
    assert_eq!(body["entries"].as_array().unwrap().len(), 2);
    assert_eq!(cities.load().unwrap(), vec!["oslo"]);
}

#[tokio::test]
async fn test_air_endpoint_resolves_coordinates() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(MockWeather::new(), &dir);

    let (status, body) = get_json(app, "/api/air?city=lima").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "lima");
    assert_eq!(body["index"], 2);
    assert_eq!(body["label"], "Fair");
}

#[tokio::test]
async fn test_saved_endpoint_lists_cities() {
    let dir = tempfile::tempdir().unwrap();
    let (app, cities) = test_app(MockWeather::new(), &dir);
    cities
        .replace_all(&["madrid".to_string(), "tokyo".to_string()])
        .unwrap();

    let (status, body) = get_json(app, "/api/saved").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["saved_cities"],
        serde_json::json!(["madrid", "tokyo"])
    );
}

#[tokio::test]
async fn test_nearby_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(MockWeather::new(), &dir);

    let (status, body) = get_json(app, "/api/nearby?city=berlin&count=3").await;

    assert_eq!(status, StatusCode::OK);
    let towns = body.as_array().unwrap();
    assert_eq!(towns.len(), 1);
    assert_eq!(towns[0]["name"], "Nearville");
}
