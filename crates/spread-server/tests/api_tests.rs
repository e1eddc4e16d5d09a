//! Integration tests for the spread API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};
use spread_core::{EventSpreadService, ServiceConfig};
use spread_server::router::build_router;
use spread_server::state::AppState;
use spread_types::Timestamp;
use tower::ServiceExt;

fn make_test_state() -> Arc<AppState> {
    let service = EventSpreadService::from_config(&ServiceConfig::default()).unwrap();
    Arc::new(AppState::new(Arc::new(service)))
}

fn timestamp_json(at: DateTime<Utc>) -> Value {
    serde_json::to_value(Timestamp::from(at)).unwrap()
}

fn event_json(spread_type: &str, at: DateTime<Utc>, value: f64) -> Value {
    json!({
        "event": {
            "spread_type": spread_type,
            "position": { "x": 0.0, "y": 0.0 },
            "timestamp": timestamp_json(at),
            "heuristics": [{ "heuristic": "MORALITY", "value": value }],
        }
    })
}

fn spread_json(at: DateTime<Utc>) -> Value {
    json!({
        "heuristics": ["MORALITY"],
        "timestamp": timestamp_json(at),
    })
}

async fn post_json(router: &Router, path: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::post(path)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_reports_status() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["service"], "event-spread");
    assert_eq!(json["events"], 0);
    assert_eq!(json["spread_types"], json!(["INSTANT_GLOBAL"]));
}

#[tokio::test]
async fn test_add_event() {
    let state = make_test_state();
    let router = build_router(Arc::clone(&state));

    let (status, json) = post_json(
        &router,
        "/api/events",
        &event_json("INSTANT_GLOBAL", Utc::now(), 100.0),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["id"].is_string());
    assert_eq!(state.service.event_count().unwrap(), 1);
}

#[tokio::test]
async fn test_add_null_event_is_bad_request() {
    let state = make_test_state();
    let router = build_router(Arc::clone(&state));

    let (status, json) = post_json(&router, "/api/events", &json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_ARGUMENT");
    assert_eq!(json["status"], 400);
    assert_eq!(state.service.event_count().unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let router = build_router(make_test_state());

    let request = Request::post("/api/events")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_spread_with_no_events() {
    let router = build_router(make_test_state());

    let (status, json) = post_json(&router, "/api/spread", &spread_json(Utc::now())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["values"],
        json!([{ "heuristic": "MORALITY", "value": 0.0 }])
    );
}

#[tokio::test]
async fn test_spread_before_and_after_event() {
    let router = build_router(make_test_state());
    let t0 = Utc::now();

    let (status, _) = post_json(
        &router,
        "/api/events",
        &event_json("INSTANT_GLOBAL", t0, 100.0),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, after) =
        post_json(&router, "/api/spread", &spread_json(t0 + Duration::seconds(1))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        after["values"],
        json!([{ "heuristic": "MORALITY", "value": 100.0 }])
    );

    let (status, before) =
        post_json(&router, "/api/spread", &spread_json(t0 - Duration::seconds(1))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        before["values"],
        json!([{ "heuristic": "MORALITY", "value": 0.0 }])
    );
}

#[tokio::test]
async fn test_spread_sums_multiple_events() {
    let router = build_router(make_test_state());
    let t0 = Utc::now();

    for value in [10.0, 20.0, 30.0] {
        post_json(
            &router,
            "/api/events",
            &event_json("INSTANT_GLOBAL", t0, value),
        )
        .await;
    }

    let (status, json) = post_json(&router, "/api/spread", &spread_json(t0)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["values"],
        json!([{ "heuristic": "MORALITY", "value": 60.0 }])
    );
}

#[tokio::test]
async fn test_unregistered_spread_type_aborts_query() {
    let router = build_router(make_test_state());
    let t0 = Utc::now();

    post_json(&router, "/api/events", &event_json("INSTANT_GLOBAL", t0, 1.0)).await;
    post_json(&router, "/api/events", &event_json("UNDEFINED", t0, 1.0)).await;

    let (status, json) = post_json(&router, "/api/spread", &spread_json(t0)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL");
    assert_eq!(json["causes"][0]["code"], "UNIMPLEMENTED");
    assert!(json.get("values").is_none());
}

#[tokio::test]
async fn test_missing_query_timestamp_is_internal() {
    let router = build_router(make_test_state());

    post_json(
        &router,
        "/api/events",
        &event_json("INSTANT_GLOBAL", Utc::now(), 1.0),
    )
    .await;

    let (status, json) = post_json(
        &router,
        "/api/spread",
        &json!({ "heuristics": ["MORALITY"] }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        json["causes"][0]["error"]
            .as_str()
            .unwrap()
            .contains("query timestamp is missing")
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let router = build_router(make_test_state());

    let response = router
        .oneshot(Request::get("/api/nothing").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
