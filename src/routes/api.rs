// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard API routes.

use crate::error::{AppError, Result};
use crate::models::{ChartMetric, RecordMetric, UnitSystem};
use crate::services::dashboard::{
    available_activity_types, build_dashboard, build_leaderboard, DashboardResponse,
    LeaderboardResponse,
};
use crate::services::metrics::{
    BASE_DISTANCE_KM, BASE_ELEVATION_KM, BASE_TIME_HOURS, DISTANCE_WEIGHT, ELEVATION_WEIGHT,
    MAX_SCORE, TIME_WEIGHT,
};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const MAX_ACTIVITY_TYPE_LEN: usize = 100;
const MAX_LEADERBOARD_LIMIT: u32 = 50;
/// Longest leaderboard window, ten years.
const MAX_LEADERBOARD_DAYS: u32 = 3650;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activity-types", get(get_activity_types))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/hybrid-score", get(get_hybrid_score_explanation))
}

fn validate_activity_type(activity_type: Option<&str>) -> Result<()> {
    match activity_type {
        Some(kind) if kind.is_empty() || kind.len() > MAX_ACTIVITY_TYPE_LEN => Err(
            AppError::BadRequest(format!(
                "activity_type must be 1-{} characters",
                MAX_ACTIVITY_TYPE_LEN
            )),
        ),
        _ => Ok(()),
    }
}

// ─── Activity Types ──────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityTypesResponse {
    pub activity_types: Vec<String>,
}

/// List the activity types present in the athlete's history.
async fn get_activity_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ActivityTypesResponse>> {
    let activities = state.dashboard.load_activities().await?;

    Ok(Json(ActivityTypesResponse {
        activity_types: available_activity_types(&activities),
    }))
}

// ─── Dashboard ───────────────────────────────────────────────

#[derive(Deserialize)]
struct DashboardQuery {
    /// Activity type to show (defaults to the first available)
    activity_type: Option<String>,
    #[serde(default)]
    units: UnitSystem,
    #[serde(default)]
    chart: ChartMetric,
}

/// Build every time-window tab for one activity type.
///
/// A failed fetch still answers 200, with `data_available: false` and the
/// failure in `error`, so the frontend can render its empty state.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>> {
    validate_activity_type(params.activity_type.as_deref())?;

    tracing::debug!(
        activity_type = ?params.activity_type,
        units = ?params.units,
        chart = ?params.chart,
        "Building dashboard"
    );

    let activities = match state.dashboard.load_activities().await {
        Ok(activities) => activities,
        Err(e) => {
            tracing::warn!(error = %e, "Dashboard data unavailable");
            return Ok(Json(DashboardResponse::unavailable(
                Some(e.diagnostic()),
                params.units,
                params.chart,
            )));
        }
    };

    if activities.is_empty() {
        tracing::info!("Strava returned no activities");
    }

    Ok(Json(build_dashboard(
        &activities,
        params.activity_type.as_deref(),
        params.units,
        params.chart,
        chrono::Utc::now(),
    )))
}

// ─── Leaderboard ─────────────────────────────────────────────

#[derive(Deserialize)]
struct LeaderboardQuery {
    /// Restrict to one activity type (all types if absent)
    activity_type: Option<String>,
    #[serde(default = "default_days")]
    days: u32,
    #[serde(default)]
    metric: RecordMetric,
    #[serde(default = "default_limit")]
    limit: u32,
    #[serde(default)]
    units: UnitSystem,
}

fn default_days() -> u32 {
    365
}
fn default_limit() -> u32 {
    5
}

/// Top activities by one metric.
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>> {
    validate_activity_type(params.activity_type.as_deref())?;

    if params.limit == 0 {
        return Err(AppError::BadRequest(
            "limit must be greater than 0".to_string(),
        ));
    }
    let limit = params.limit.min(MAX_LEADERBOARD_LIMIT);

    if params.days == 0 || params.days > MAX_LEADERBOARD_DAYS {
        return Err(AppError::BadRequest(format!(
            "days must be 1-{}",
            MAX_LEADERBOARD_DAYS
        )));
    }

    let activities = state.dashboard.load_activities().await?;

    Ok(Json(build_leaderboard(
        &activities,
        params.activity_type.as_deref(),
        params.days,
        params.metric,
        limit as usize,
        params.units,
        chrono::Utc::now(),
    )))
}

// ─── Hybrid Score Explanation ────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HybridScoreExplanation {
    pub max_score: f64,
    pub components: Vec<ScoreComponent>,
    pub example: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ScoreComponent {
    pub name: String,
    pub weight: f64,
    /// Amount that earns the full component score
    pub baseline: String,
}

/// How the hybrid score is built, for the dashboard's help panel.
async fn get_hybrid_score_explanation() -> Json<HybridScoreExplanation> {
    let components = vec![
        ScoreComponent {
            name: "Distance".to_string(),
            weight: DISTANCE_WEIGHT,
            baseline: format!("{} km", BASE_DISTANCE_KM),
        },
        ScoreComponent {
            name: "Duration".to_string(),
            weight: TIME_WEIGHT,
            baseline: format!("{} hour", BASE_TIME_HOURS),
        },
        ScoreComponent {
            name: "Elevation".to_string(),
            weight: ELEVATION_WEIGHT,
            baseline: format!("{} m", BASE_ELEVATION_KM * 1000.0),
        },
    ];

    Json(HybridScoreExplanation {
        max_score: MAX_SCORE,
        components,
        example: "10 km in 1 hour with 100 m of climbing scores \
                  (10×0.4) + (10×0.35) + (10×0.25) = 10"
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_activity_type() {
        assert!(validate_activity_type(None).is_ok());
        assert!(validate_activity_type(Some("Run")).is_ok());

        let err = validate_activity_type(Some("")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let long = "a".repeat(MAX_ACTIVITY_TYPE_LEN + 1);
        assert!(validate_activity_type(Some(&long)).is_err());
    }

    #[tokio::test]
    async fn test_explanation_weights_sum_to_one() {
        let Json(explanation) = get_hybrid_score_explanation().await;

        let total: f64 = explanation.components.iter().map(|c| c.weight).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(explanation.components[2].baseline, "100 m");
        assert_eq!(explanation.max_score, 10.0);
    }
}
