// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Metrics engine: derived per-activity scores and period aggregates.
//!
//! Everything here is a pure function of its inputs. Derived metrics are
//! recomputed on every call and never stored alongside the activity.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::{
    ActivityRecord, DerivedMetrics, EnrichedActivity, PeriodRecords, PeriodSummary, RecordMetric,
};

// ─── Hybrid Score ────────────────────────────────────────────

/// Distance that earns a full 10 points (km).
pub const BASE_DISTANCE_KM: f64 = 10.0;
/// Moving time that earns a full 10 points (hours).
pub const BASE_TIME_HOURS: f64 = 1.0;
/// Elevation gain that earns a full 10 points (km).
pub const BASE_ELEVATION_KM: f64 = 0.1;

pub const DISTANCE_WEIGHT: f64 = 0.40;
pub const TIME_WEIGHT: f64 = 0.35;
pub const ELEVATION_WEIGHT: f64 = 0.25;

/// Upper bound of every component score and of the final score.
pub const MAX_SCORE: f64 = 10.0;

/// Combine distance, moving time and climbing into a single 0-10 score.
///
/// Each component is normalized against its baseline and capped at 10
/// before weighting, so one dominant dimension can carry at most its weight.
pub fn compute_hybrid_score(distance_m: f64, moving_time_s: u64, elevation_gain_m: f64) -> f64 {
    let distance_km = distance_m / 1000.0;
    let time_hours = moving_time_s as f64 / 3600.0;
    let elevation_km = elevation_gain_m / 1000.0;

    let distance_score = normalize(distance_km, BASE_DISTANCE_KM);
    let time_score = normalize(time_hours, BASE_TIME_HOURS);
    let elevation_score = normalize(elevation_km, BASE_ELEVATION_KM);

    let weighted = distance_score * DISTANCE_WEIGHT
        + time_score * TIME_WEIGHT
        + elevation_score * ELEVATION_WEIGHT;

    weighted.clamp(0.0, MAX_SCORE)
}

fn normalize(value: f64, baseline: f64) -> f64 {
    ((value / baseline) * MAX_SCORE).min(MAX_SCORE)
}

// ─── Calories ────────────────────────────────────────────────

/// Assumed body weight for calorie estimates (kg).
pub const BODY_WEIGHT_KG: f64 = 70.0;
/// MET used for activity types missing from the table.
pub const DEFAULT_MET: f64 = 5.0;

/// MET values from the Compendium of Physical Activities.
const STANDARD_METS: [(&str, f64); 8] = [
    ("Run", 9.8),            // running 6 mph
    ("Ride", 8.0),           // cycling 12-14 mph
    ("Swim", 7.0),           // moderate effort
    ("Workout", 6.0),        // calisthenics, moderate
    ("Walk", 3.5),           // 3.5 mph
    ("Hike", 5.3),           // cross country
    ("Yoga", 2.5),           // general
    ("WeightTraining", 3.5), // light effort
];

static STANDARD_TABLE: LazyLock<MetTable> = LazyLock::new(MetTable::default);

/// Activity type → MET lookup with an explicit fallback.
///
/// Strava keeps adding activity types, so this is an open mapping rather
/// than an enum.
#[derive(Debug, Clone)]
pub struct MetTable {
    values: HashMap<String, f64>,
    default_met: f64,
}

impl Default for MetTable {
    fn default() -> Self {
        Self {
            values: STANDARD_METS
                .iter()
                .map(|(kind, met)| (kind.to_string(), *met))
                .collect(),
            default_met: DEFAULT_MET,
        }
    }
}

impl MetTable {
    /// Table with no entries; every lookup returns `default_met`.
    pub fn empty(default_met: f64) -> Self {
        Self {
            values: HashMap::new(),
            default_met,
        }
    }

    /// Add or replace the MET for an activity type.
    pub fn insert(&mut self, activity_type: impl Into<String>, met: f64) -> &mut Self {
        self.values.insert(activity_type.into(), met);
        self
    }

    pub fn met(&self, activity_type: &str) -> f64 {
        self.values
            .get(activity_type)
            .copied()
            .unwrap_or(self.default_met)
    }

    pub fn default_met(&self) -> f64 {
        self.default_met
    }
}

/// Estimate calories with the standard MET table.
///
/// `MET × 70 kg × hours`, rounded to the nearest whole kcal.
pub fn compute_calories(activity_type: &str, moving_time_s: u64) -> f64 {
    compute_calories_with(&STANDARD_TABLE, activity_type, moving_time_s, 0.0)
}

/// Estimate calories against a caller-supplied table.
///
/// `_distance_m` is accepted so callers can pass the whole activity shape;
/// the MET model only depends on time.
pub fn compute_calories_with(
    table: &MetTable,
    activity_type: &str,
    moving_time_s: u64,
    _distance_m: f64,
) -> f64 {
    let hours = moving_time_s as f64 / 3600.0;
    (table.met(activity_type) * BODY_WEIGHT_KG * hours).round()
}

/// Attach derived metrics to an activity.
pub fn enrich(activity: &ActivityRecord) -> EnrichedActivity<'_> {
    EnrichedActivity {
        activity,
        metrics: DerivedMetrics {
            hybrid_score: compute_hybrid_score(
                activity.distance,
                activity.moving_time,
                activity.total_elevation_gain,
            ),
            estimated_calories: compute_calories(&activity.activity_type, activity.moving_time),
        },
    }
}

// ─── Elevation Relevance ─────────────────────────────────────

/// Activity types where climbing is worth reporting instead of calories.
pub const ELEVATION_RELEVANT_TYPES: [&str; 3] = ["Run", "Ride", "Hike"];

pub fn is_elevation_relevant(activity_type: &str) -> bool {
    ELEVATION_RELEVANT_TYPES.contains(&activity_type)
}

// ─── Filtering ───────────────────────────────────────────────

/// Keep activities that started within the last `days` days.
pub fn filter_by_recency<'a, I>(records: I, days: i64) -> Vec<&'a ActivityRecord>
where
    I: IntoIterator<Item = &'a ActivityRecord>,
{
    filter_by_recency_at(records, days, Utc::now())
}

/// Keep activities with `start_date` strictly after `now - days`.
///
/// A window reaching past the earliest representable date keeps everything.
pub fn filter_by_recency_at<'a, I>(
    records: I,
    days: i64,
    now: DateTime<Utc>,
) -> Vec<&'a ActivityRecord>
where
    I: IntoIterator<Item = &'a ActivityRecord>,
{
    let cutoff = Duration::try_days(days).and_then(|d| now.checked_sub_signed(d));
    records
        .into_iter()
        .filter(|a| cutoff.is_none_or(|cutoff| a.start_date > cutoff))
        .collect()
}

/// Keep activities of exactly this type.
pub fn filter_by_type<'a, I>(records: I, activity_type: &str) -> Vec<&'a ActivityRecord>
where
    I: IntoIterator<Item = &'a ActivityRecord>,
{
    records
        .into_iter()
        .filter(|a| a.activity_type == activity_type)
        .collect()
}

// ─── Aggregation ─────────────────────────────────────────────

/// Totals plus the single best activity per field.
///
/// # Panics
///
/// Panics if `records` is empty. Callers check for an empty window first and
/// show a "no activities" message instead of aggregating.
pub fn aggregate_period<'a>(records: &[&'a ActivityRecord]) -> PeriodSummary<'a> {
    assert!(
        !records.is_empty(),
        "aggregate_period requires at least one activity"
    );

    let enriched: Vec<EnrichedActivity<'a>> = records.iter().copied().map(enrich).collect();

    let records = PeriodRecords {
        longest_duration: first_max_by(&enriched, RecordMetric::MovingTime),
        longest_distance: first_max_by(&enriched, RecordMetric::Distance),
        most_elevation: first_max_by(&enriched, RecordMetric::Elevation),
        best_hybrid_score: first_max_by(&enriched, RecordMetric::HybridScore),
    };

    PeriodSummary {
        count: enriched.len(),
        total_distance: enriched.iter().map(|e| e.activity.distance).sum(),
        total_elevation_gain: enriched
            .iter()
            .map(|e| e.activity.total_elevation_gain)
            .sum(),
        total_moving_time: enriched.iter().map(|e| e.activity.moving_time).sum(),
        total_calories: enriched.iter().map(|e| e.metrics.estimated_calories).sum(),
        records,
    }
}

/// Value of `metric` for an enriched activity.
pub fn metric_value(activity: &EnrichedActivity<'_>, metric: RecordMetric) -> f64 {
    match metric {
        RecordMetric::MovingTime => activity.activity.moving_time as f64,
        RecordMetric::Distance => activity.activity.distance,
        RecordMetric::Elevation => activity.activity.total_elevation_gain,
        RecordMetric::HybridScore => activity.metrics.hybrid_score,
    }
}

fn first_max_by<'a>(items: &[EnrichedActivity<'a>], metric: RecordMetric) -> EnrichedActivity<'a> {
    let mut best = items[0];
    for item in &items[1..] {
        // Strictly greater keeps the first occurrence on ties
        if metric_value(item, metric) > metric_value(&best, metric) {
            best = *item;
        }
    }
    best
}

/// Up to `n` activities ranked by `metric`, best first.
///
/// The sort is stable, so ties keep input order.
pub fn top_n<'a, I>(records: I, metric: RecordMetric, n: usize) -> Vec<EnrichedActivity<'a>>
where
    I: IntoIterator<Item = &'a ActivityRecord>,
{
    let mut ranked: Vec<EnrichedActivity<'a>> = records.into_iter().map(enrich).collect();
    ranked.sort_by(|a, b| metric_value(b, metric).total_cmp(&metric_value(a, metric)));
    ranked.truncate(n);
    ranked
}
