// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use strava_dashboard::error::AppError;

#[test]
fn test_is_unauthorized_matches() {
    let err = AppError::StravaStatus {
        status: 401,
        body: "{\"message\":\"Authorization Error\"}".to_string(),
    };
    assert!(err.is_unauthorized());
    assert_eq!(
        err.diagnostic(),
        "Error fetching data: 401 (check STRAVA_ACCESS_TOKEN)"
    );
}

#[test]
fn test_is_unauthorized_no_match() {
    let err = AppError::StravaStatus {
        status: 500,
        body: String::new(),
    };
    assert!(!err.is_unauthorized());
    assert_eq!(err.diagnostic(), "Error fetching data: 500");

    let err = AppError::StravaApi("connection refused".to_string());
    assert!(!err.is_unauthorized());

    let err = AppError::BadRequest("Bad Request".to_string());
    assert!(!err.is_unauthorized());
}

#[test]
fn test_status_codes() {
    let cases = [
        (
            AppError::BadRequest("nope".to_string()),
            StatusCode::BAD_REQUEST,
        ),
        (
            AppError::StravaStatus {
                status: 503,
                body: String::new(),
            },
            StatusCode::BAD_GATEWAY,
        ),
        (
            AppError::StravaApi("timeout".to_string()),
            StatusCode::BAD_GATEWAY,
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(err.into_response().status(), expected);
    }
}
