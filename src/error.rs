// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Strava answered with a non-success status code.
    #[error("Strava API returned HTTP {status}: {body}")]
    StravaStatus { status: u16, body: String },

    /// Transport or decoding failure talking to Strava.
    #[error("Strava API error: {0}")]
    StravaApi(String),
}

impl AppError {
    /// True if Strava rejected the configured access token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::StravaStatus { status: 401, .. })
    }

    /// Short diagnostic suitable for showing next to an empty dashboard.
    pub fn diagnostic(&self) -> String {
        match self {
            AppError::StravaStatus { status, .. } if *status == 401 => format!(
                "Error fetching data: {} (check STRAVA_ACCESS_TOKEN)",
                status
            ),
            AppError::StravaStatus { status, .. } => format!("Error fetching data: {}", status),
            other => format!("Error fetching data: {}", other),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::StravaStatus { status, body } => {
                tracing::warn!(status, body = %body, "Strava request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "strava_error",
                    Some(format!("HTTP {}", status)),
                )
            }
            AppError::StravaApi(msg) => {
                tracing::warn!(error = %msg, "Strava request failed");
                (StatusCode::BAD_GATEWAY, "strava_error", Some(msg.clone()))
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers and services
pub type Result<T> = std::result::Result<T, AppError>;
