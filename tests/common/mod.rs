// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use strava_dashboard::config::Config;
use strava_dashboard::routes::create_router;
use strava_dashboard::AppState;

/// What the stub Strava server has seen.
#[derive(Default)]
#[allow(dead_code)]
pub struct StubLog {
    pub requests: AtomicUsize,
    pub authorization: Mutex<Vec<String>>,
    pub pages: Mutex<Vec<(u32, u32)>>,
}

#[allow(dead_code)]
impl StubLog {
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

struct StubState {
    pages: Vec<Vec<Value>>,
    failure: Option<(StatusCode, Value)>,
    log: Arc<StubLog>,
}

#[derive(Deserialize)]
struct PageQuery {
    page: u32,
    per_page: u32,
}

async fn list_activities(
    State(stub): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Response {
    stub.log.requests.fetch_add(1, Ordering::SeqCst);
    if let Some(auth) = headers.get(header::AUTHORIZATION) {
        stub.log
            .authorization
            .lock()
            .unwrap()
            .push(auth.to_str().unwrap_or_default().to_string());
    }
    stub.log
        .pages
        .lock()
        .unwrap()
        .push((query.page, query.per_page));

    if let Some((status, body)) = &stub.failure {
        return (*status, Json(body.clone())).into_response();
    }

    let page = stub
        .pages
        .get(query.page as usize - 1)
        .cloned()
        .unwrap_or_default();
    Json(Value::Array(page)).into_response()
}

/// Start a stub Strava API on a random local port.
///
/// Returns the API base URL and the request log.
#[allow(dead_code)]
pub async fn spawn_stub_strava(
    pages: Vec<Vec<Value>>,
    failure: Option<(StatusCode, Value)>,
) -> (String, Arc<StubLog>) {
    let log = Arc::new(StubLog::default());
    let state = Arc::new(StubState {
        pages,
        failure,
        log: log.clone(),
    });

    let app = Router::new()
        .route("/api/v3/athlete/activities", get(list_activities))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub server");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api/v3", addr), log)
}

/// Strava-shaped activity JSON that started `days_ago` days before now.
#[allow(dead_code)]
pub fn activity_json(
    id: u64,
    kind: &str,
    days_ago: i64,
    distance: f64,
    moving_time: u64,
    elevation: f64,
) -> Value {
    let start = Utc::now() - Duration::days(days_ago);
    json!({
        "resource_state": 2,
        "id": id,
        "name": format!("{} #{}", kind, id),
        "type": kind,
        "sport_type": kind,
        "start_date": start.to_rfc3339(),
        "distance": distance,
        "moving_time": moving_time,
        "elapsed_time": moving_time + 60,
        "total_elevation_gain": elevation,
    })
}

/// `count` runs with consecutive IDs starting at `first_id`.
#[allow(dead_code)]
pub fn run_page(first_id: u64, count: usize) -> Vec<Value> {
    (0..count as u64)
        .map(|i| activity_json(first_id + i, "Run", 1 + (i as i64 % 300), 5000.0, 1800, 40.0))
        .collect()
}

/// Create a test app pointed at the given Strava base URL.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(strava_api_url: &str) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        strava_api_url: strava_api_url.to_string(),
        ..Config::test_default()
    };
    let state = Arc::new(AppState::from_config(config));

    (create_router(state.clone()), state)
}
