// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava activity model and per-activity derived metrics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One activity as returned by `GET /athlete/activities`.
///
/// Field names follow Strava's summary representation; anything else in the
/// payload is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Strava activity ID
    pub id: u64,
    /// Activity name/title
    pub name: String,
    /// Activity type (Run, Ride, Swim, etc.); open-ended
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Start date/time (UTC)
    pub start_date: DateTime<Utc>,
    /// Distance in meters
    #[serde(default)]
    pub distance: f64,
    /// Moving time in seconds
    #[serde(default)]
    pub moving_time: u64,
    /// Elevation gain in meters
    #[serde(default)]
    pub total_elevation_gain: f64,
}

/// Metrics derived from a single activity. Recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    /// Weighted intensity score in [0, 10]
    pub hybrid_score: f64,
    /// Estimated energy expenditure (kcal)
    pub estimated_calories: f64,
}

/// An activity paired with its derived metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnrichedActivity<'a> {
    pub activity: &'a ActivityRecord,
    pub metrics: DerivedMetrics,
}
