// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use workout_log::config::Config;
use workout_log::db::LocalStorage;
use workout_log::routes::create_router;
use workout_log::services::{Clock, WorkoutSession};
use workout_log::AppState;

/// First instant handed out by the test clock.
#[allow(dead_code)]
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).unwrap()
}

/// Clock that advances one minute every time it is read.
#[allow(dead_code)]
pub fn ticking_clock() -> Clock {
    let ticks = Arc::new(AtomicI64::new(0));
    Arc::new(move || start_time() + Duration::minutes(ticks.fetch_add(1, Ordering::SeqCst)))
}

/// Create a test app backed by in-memory storage.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_storage(LocalStorage::new_in_memory())
}

/// Create a test app over the given storage.
#[allow(dead_code)]
pub fn create_test_app_with_storage(storage: LocalStorage) -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let session = WorkoutSession::with_clock(storage, ticking_clock());
    let state = Arc::new(AppState::new(config, session));

    (create_router(state.clone()), state)
}

/// Build a JSON request.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a request without a body.
#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
