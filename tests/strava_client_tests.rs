// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava client and fetcher tests against a local stub API.

use axum::http::StatusCode;
use serde_json::json;
use strava_dashboard::error::AppError;
use strava_dashboard::services::{ActivityFetcher, StravaClient};

mod common;

#[tokio::test]
async fn test_list_activities_sends_bearer_and_paging() {
    let (base_url, log) = common::spawn_stub_strava(vec![common::run_page(1, 3)], None).await;
    let client = StravaClient::new(base_url, "secret-token");

    let activities = client.list_activities(1, 30).await.unwrap();

    assert_eq!(activities.len(), 3);
    assert_eq!(activities[0].id, 1);
    assert_eq!(activities[0].activity_type, "Run");
    assert_eq!(
        log.authorization.lock().unwrap().as_slice(),
        ["Bearer secret-token"]
    );
    assert_eq!(log.pages.lock().unwrap().as_slice(), [(1, 30)]);
}

#[tokio::test]
async fn test_fetch_all_three_pages() {
    let pages = vec![
        common::run_page(0, 200),
        common::run_page(200, 200),
        common::run_page(400, 50),
    ];
    let (base_url, log) = common::spawn_stub_strava(pages, None).await;
    let fetcher = ActivityFetcher::new(StravaClient::new(base_url, "tok"));

    let activities = fetcher.fetch_all(200).await.unwrap();

    assert_eq!(activities.len(), 450);
    assert_eq!(log.request_count(), 3);
    assert_eq!(
        log.pages.lock().unwrap().as_slice(),
        [(1, 200), (2, 200), (3, 200)]
    );
    // Source order is kept
    assert!(activities.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn test_first_page_failure_returns_no_data() {
    let pages = vec![common::run_page(0, 200), common::run_page(200, 10)];
    let failure = Some((
        StatusCode::UNAUTHORIZED,
        json!({"message": "Authorization Error", "errors": []}),
    ));
    let (base_url, log) = common::spawn_stub_strava(pages, failure).await;
    let fetcher = ActivityFetcher::new(StravaClient::new(base_url, "expired"));

    let err = fetcher.fetch_all(200).await.unwrap_err();

    assert_eq!(log.request_count(), 1);
    assert!(err.is_unauthorized());
    match err {
        AppError::StravaStatus { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Authorization Error"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_api_is_transport_error() {
    // Port 9 (discard) is not listening in the test environment
    let client = StravaClient::new("http://127.0.0.1:9/api/v3", "tok");

    let err = client.list_activities(1, 10).await.unwrap_err();

    assert!(matches!(err, AppError::StravaApi(_)));
}
