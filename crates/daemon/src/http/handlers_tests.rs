// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! HTTP-level tests exercising the router end-to-end, driving a
//! `FakeClock`/`FakeActuator` pair directly through
//! `tower::ServiceExt::oneshot` to avoid real `sleep`s.

use std::collections::HashSet;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use route_actuator::{FakeActuator, KernelActuator};
use route_core::FakeClock;
use route_storage::RouteStore;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::router;
use crate::config::Config;
use crate::state::AppState;

const TOKEN: &str = "test-token";

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

fn test_state() -> AppState<FakeClock> {
    let clock = FakeClock::new(now());
    let store = Arc::new(RouteStore::in_memory(clock.clone()));
    let actuator: Arc<dyn route_actuator::KernelActuator> = Arc::new(FakeActuator::new());
    let config = Arc::new(Config {
        database_url: "unused.json".into(),
        route_check_interval_secs: 10,
        api_token: TOKEN.to_string(),
        port: 0,
    });
    let known_interfaces = Arc::new(HashSet::from(["eth0".to_string()]));
    AppState { store, actuator, clock, config, known_interfaces }
}

async fn send(
    state: &AppState<FakeClock>,
    method: &str,
    path: &str,
    body: Option<Value>,
    auth: bool,
) -> (StatusCode, Value) {
    let app = router(state.clone());
    let mut builder = Request::builder().method(method).uri(path);
    if auth {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {TOKEN}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

#[tokio::test]
async fn unauthorized_request_is_forbidden() {
    let state = test_state();
    let (status, _) = send(&state, "GET", "/routes", None, false).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn put_active_route_installs_and_returns_201() {
    let state = test_state();
    let body = json!({"to": "10.10.10.0/24", "dev": "eth0"});
    let (status, _) = send(&state, "PUT", "/routes/", Some(body), true).await;
    assert_eq!(status, StatusCode::CREATED);

    let record = state.store.get("10.10.10.0/24").unwrap();
    assert!(record.active);
    assert_eq!(record.status, route_core::RouteStatus::Active);
}

#[tokio::test]
async fn put_pending_route_does_not_touch_kernel() {
    let state = test_state();
    let body = json!({
        "to": "10.20.20.0/24",
        "dev": "eth0",
        "create_at": (now() + Duration::seconds(30)).to_rfc3339(),
    });
    let (status, _) = send(&state, "PUT", "/routes/", Some(body), true).await;
    assert_eq!(status, StatusCode::CREATED);

    let record = state.store.get("10.20.20.0/24").unwrap();
    assert!(!record.active);
    assert_eq!(record.status, route_core::RouteStatus::Pending);
}

#[tokio::test]
async fn put_expired_route_is_stored_but_never_installed() {
    let state = test_state();
    let body = json!({
        "to": "10.21.21.0/24",
        "dev": "eth0",
        "create_at": (now() - Duration::seconds(20)).to_rfc3339(),
        "delete_at": (now() - Duration::seconds(5)).to_rfc3339(),
    });
    let (status, _) = send(&state, "PUT", "/routes/", Some(body), true).await;
    assert_eq!(status, StatusCode::CREATED);

    let record = state.store.get("10.21.21.0/24").unwrap();
    assert!(!record.active);
    assert_eq!(record.status, route_core::RouteStatus::Expired);
}

#[tokio::test]
async fn duplicate_put_conflicts() {
    let state = test_state();
    let body = json!({
        "to": "10.30.30.0/24",
        "dev": "eth0",
        "create_at": (now() + Duration::seconds(10)).to_rfc3339(),
    });
    let (first, _) = send(&state, "PUT", "/routes/", Some(body.clone()), true).await;
    assert_eq!(first, StatusCode::CREATED);

    let (second, _) = send(&state, "PUT", "/routes/", Some(body), true).await;
    assert_eq!(second, StatusCode::CONFLICT);
}

#[tokio::test]
async fn put_already_installed_short_circuits_to_200_without_duplicating_store() {
    let state = test_state();
    let to = ipnetwork::IpNetwork::V4("10.40.40.0/24".parse().unwrap());
    state.actuator.install(&to, None, Some("eth0")).await.unwrap();

    let body = json!({"to": "10.40.40.0/24", "dev": "eth0"});
    let (status, _) = send(&state, "PUT", "/routes/", Some(body), true).await;
    assert_eq!(status, StatusCode::OK);
    assert!(state.store.get("10.40.40.0/24").is_err());
}

#[tokio::test]
async fn patch_setting_dev_clears_via_field() {
    let state = test_state();
    let put_body = json!({
        "to": "10.50.50.0/24",
        "via": "192.168.1.1",
        "create_at": (now() + Duration::seconds(5)).to_rfc3339(),
    });
    send(&state, "PUT", "/routes/", Some(put_body), true).await;

    let patch_body = json!({"to": "10.50.50.0/24", "dev": "eth0"});
    let (status, _) = send(&state, "PATCH", "/routes/", Some(patch_body), true).await;
    assert_eq!(status, StatusCode::OK);

    let record = state.store.get("10.50.50.0/24").unwrap();
    assert_eq!(record.dev, Some("eth0".to_string()));
    assert_eq!(record.via, None);
    assert_eq!(record.status, route_core::RouteStatus::Pending);
    assert!(!record.active);
}

#[tokio::test]
async fn patch_missing_route_is_not_found() {
    let state = test_state();
    let body = json!({"to": "10.60.60.0/24", "dev": "eth0"});
    let (status, _) = send(&state, "PATCH", "/routes/", Some(body), true).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_active_route_from_kernel_and_store() {
    let state = test_state();
    let put_body = json!({"to": "10.70.70.0/24", "dev": "eth0"});
    send(&state, "PUT", "/routes/", Some(put_body), true).await;

    let delete_body = json!({"to": "10.70.70.0/24"});
    let (status, _) = send(&state, "DELETE", "/routes/", Some(delete_body), true).await;
    assert_eq!(status, StatusCode::OK);
    assert!(state.store.get("10.70.70.0/24").is_err());

    let deleted = state.store.list_deleted();
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].status, route_core::RouteStatus::Deleted);
}

#[tokio::test]
async fn delete_by_bare_host_address_finds_the_slash_32_normalized_record() {
    let state = test_state();
    let put_body = json!({"to": "192.168.1.24", "dev": "eth0"});
    send(&state, "PUT", "/routes/", Some(put_body), true).await;
    assert!(state.store.get("192.168.1.24/32").is_ok());

    let delete_body = json!({"to": "192.168.1.24"});
    let (status, _) = send(&state, "DELETE", "/routes/", Some(delete_body), true).await;
    assert_eq!(status, StatusCode::OK);
    assert!(state.store.get("192.168.1.24/32").is_err());
}

#[tokio::test]
async fn pause_then_activate_round_trips() {
    let state = test_state();
    let put_body = json!({"to": "10.80.80.0/24", "dev": "eth0"});
    send(&state, "PUT", "/routes/", Some(put_body), true).await;

    let to_body = json!({"to": "10.80.80.0/24"});
    let (pause_status, _) = send(&state, "PATCH", "/routes/pause", Some(to_body.clone()), true).await;
    assert_eq!(pause_status, StatusCode::OK);
    let paused = state.store.get("10.80.80.0/24").unwrap();
    assert_eq!(paused.status, route_core::RouteStatus::Paused);
    assert!(!paused.active);

    let (activate_status, _) = send(&state, "PATCH", "/routes/activate", Some(to_body), true).await;
    assert_eq!(activate_status, StatusCode::OK);
    let active = state.store.get("10.80.80.0/24").unwrap();
    assert_eq!(active.status, route_core::RouteStatus::Active);
    assert!(active.active);
}

#[tokio::test]
async fn pause_on_a_pending_route_is_conflict() {
    let state = test_state();
    let put_body = json!({
        "to": "10.90.90.0/24",
        "dev": "eth0",
        "create_at": (now() + Duration::seconds(30)).to_rfc3339(),
    });
    send(&state, "PUT", "/routes/", Some(put_body), true).await;

    let to_body = json!({"to": "10.90.90.0/24"});
    let (status, _) = send(&state, "PATCH", "/routes/pause", Some(to_body), true).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn get_routes_returns_store_and_kernel_snapshot() {
    let state = test_state();
    let put_body = json!({"to": "10.100.100.0/24", "dev": "eth0"});
    send(&state, "PUT", "/routes/", Some(put_body), true).await;

    let (status, value) = send(&state, "GET", "/routes", None, true).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["database_routes"].as_array().unwrap().len(), 1);
    assert_eq!(value["system_routes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn get_deleted_routes_lists_history() {
    let state = test_state();
    let put_body = json!({"to": "10.110.110.0/24", "dev": "eth0"});
    send(&state, "PUT", "/routes/", Some(put_body), true).await;
    let delete_body = json!({"to": "10.110.110.0/24"});
    send(&state, "DELETE", "/routes/", Some(delete_body), true).await;

    let (status, value) = send(&state, "GET", "/routes/deleted", None, true).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["deleted_routes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_route_is_unprocessable() {
    let state = test_state();
    let body = json!({"to": "not-an-ip", "dev": "eth0"});
    let (status, _) = send(&state, "PUT", "/routes/", Some(body), true).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
