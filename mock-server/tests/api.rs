use std::sync::Arc;

use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_state, MockState, CHECK_DIGIT_ERROR};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- known VINs ---

#[tokio::test]
async fn known_vin_returns_single_clean_result() {
    let resp = app()
        .oneshot(get("/api/vehicles/DecodeVinValuesExtended/19UUA56922A021559?format=json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["Count"], 1);
    assert_eq!(body["SearchCriteria"], "VIN:19UUA56922A021559");
    let result = &body["Results"][0];
    assert_eq!(result["Make"], "BMW");
    assert_eq!(result["Model"], "X3");
    assert_eq!(result["ErrorCode"], "0");
}

#[tokio::test]
async fn lookup_is_case_insensitive() {
    let resp = app()
        .oneshot(get("/api/vehicles/DecodeVinValuesExtended/1hgcm82633a004352?format=json"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["Results"][0]["Make"], "HONDA");
}

// --- errors reported in-band ---

#[tokio::test]
async fn unknown_vin_reports_check_digit_error() {
    let resp = app()
        .oneshot(get("/api/vehicles/DecodeVinValuesExtended/19UUA56922A021558?format=json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["Results"][0]["ErrorCode"], "1");
    assert_eq!(body["Results"][0]["ErrorText"], CHECK_DIGIT_ERROR);
}

#[tokio::test]
async fn all_wildcard_vin_returns_no_results() {
    let resp = app()
        .oneshot(get("/api/vehicles/DecodeVinValuesExtended/*****************?format=json"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["Count"], 0);
    assert!(body["Results"].as_array().unwrap().is_empty());
}

// --- transport-level errors ---

#[tokio::test]
async fn missing_format_returns_400() {
    let resp = app()
        .oneshot(get("/api/vehicles/DecodeVinValuesExtended/19UUA56922A021559"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(resp).await, "only format=json is supported");
}

#[tokio::test]
async fn xml_format_returns_400() {
    let resp = app()
        .oneshot(get("/api/vehicles/DecodeVinValuesExtended/19UUA56922A021559?format=xml"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app().oneshot(get("/api/vehicles/DecodeVin/19UUA56922A021559")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- request counting ---

#[tokio::test]
async fn every_request_is_counted() {
    let state = Arc::new(MockState::with_fixtures());
    let router = app_with_state(Arc::clone(&state));

    for _ in 0..3 {
        router
            .clone()
            .oneshot(get("/api/vehicles/DecodeVinValuesExtended/19UUA56922A021559?format=json"))
            .await
            .unwrap();
    }

    assert_eq!(state.requests(), 3);
}
