// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard assembly.
//!
//! Handles:
//! - Loading activities through the fetcher, with the time-boxed cache
//! - Filtering by activity type and time window
//! - Building summary cards, records, chart series and the activity log

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::Result;
use crate::models::{ActivityRecord, ChartMetric, EnrichedActivity, RecordMetric, UnitSystem};
use crate::services::cache::ActivityCache;
use crate::services::fetcher::{ActivityFetcher, ActivitySource};
use crate::services::format::{
    chart_distance, format_calories, format_distance, format_elevation, format_hours,
    format_score, format_time,
};
use crate::services::metrics::{
    aggregate_period, enrich, filter_by_recency_at, filter_by_type, is_elevation_relevant,
    metric_value, top_n,
};
use crate::time_utils::{format_date, format_utc_rfc3339};

/// A named look-back window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePeriod {
    pub name: &'static str,
    pub days: i64,
}

/// Windows shown on the dashboard, shortest first.
pub const TIME_PERIODS: [TimePeriod; 4] = [
    TimePeriod {
        name: "Last 7 Days",
        days: 7,
    },
    TimePeriod {
        name: "Last Month",
        days: 30,
    },
    TimePeriod {
        name: "Last 3 Months",
        days: 90,
    },
    TimePeriod {
        name: "Last Year",
        days: 365,
    },
];

const NO_DATA_MESSAGE: &str = "No data available";

// ─── Service ─────────────────────────────────────────────────

/// Loads activities for the dashboard, serving repeat requests from cache.
pub struct DashboardService<S> {
    fetcher: ActivityFetcher<S>,
    cache: ActivityCache,
    per_page: u32,
}

impl<S: ActivitySource> DashboardService<S> {
    pub fn new(source: S, per_page: u32, cache_ttl: Duration) -> Self {
        Self {
            fetcher: ActivityFetcher::new(source),
            cache: ActivityCache::new(cache_ttl),
            per_page,
        }
    }

    pub fn cache(&self) -> &ActivityCache {
        &self.cache
    }

    /// All activities, from cache if fresh, otherwise fetched from the source.
    ///
    /// Failed fetches are not cached.
    pub async fn load_activities(&self) -> Result<Arc<Vec<ActivityRecord>>> {
        let now = Utc::now();
        if let Some(activities) = self.cache.get(self.per_page, now) {
            tracing::debug!(count = activities.len(), "Serving activities from cache");
            return Ok(activities);
        }

        let activities = Arc::new(self.fetcher.fetch_all(self.per_page).await?);
        self.cache
            .insert(self.per_page, activities.clone(), Utc::now());
        tracing::info!(
            count = activities.len(),
            ttl_secs = self.cache.ttl().num_seconds(),
            "Activities cached"
        );
        Ok(activities)
    }
}

// ─── View Models ─────────────────────────────────────────────

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardResponse {
    /// False when the fetch failed or returned no activities
    pub data_available: bool,
    /// Fetch failure diagnostic
    pub error: Option<String>,
    /// Informational message (e.g. no data)
    pub message: Option<String>,
    /// All activity types present, sorted
    pub activity_types: Vec<String>,
    /// Type the periods were built for
    pub activity_type: Option<String>,
    pub units: UnitSystem,
    pub chart_metric: ChartMetric,
    /// Whether the third card shows elevation (true) or calories (false)
    pub elevation_relevant: bool,
    pub periods: Vec<PeriodView>,
}

impl DashboardResponse {
    /// Response for a failed or empty fetch.
    pub fn unavailable(error: Option<String>, units: UnitSystem, chart_metric: ChartMetric) -> Self {
        Self {
            data_available: false,
            error,
            message: Some(NO_DATA_MESSAGE.to_string()),
            activity_types: vec![],
            activity_type: None,
            units,
            chart_metric,
            elevation_relevant: false,
            periods: vec![],
        }
    }
}

/// One time-window tab.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PeriodView {
    pub name: String,
    pub days: u32,
    /// Set instead of the sections below when the window is empty
    pub empty_message: Option<String>,
    pub summary: Vec<SummaryCard>,
    pub records: Vec<RecordCard>,
    pub chart: Option<ChartSeries>,
    /// Newest first
    pub log: Vec<LogRow>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SummaryCard {
    pub label: String,
    pub value: String,
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecordCard {
    pub title: String,
    pub value: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub activity_id: u64,
    pub activity_name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub detail: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChartSeries {
    pub y_title: String,
    pub tooltip_fields: Vec<String>,
    /// Oldest first
    pub points: Vec<ChartPoint>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChartPoint {
    pub start_date: String,
    pub y: f64,
    pub name: String,
    pub formatted_distance: String,
    pub moving_time: String,
    pub hybrid_score: f64,
    pub total_elevation_gain: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LogRow {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub name: String,
    pub start_date: String,
    pub distance: String,
    pub moving_time: String,
    pub total_elevation_gain: String,
    pub hybrid_score: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LeaderboardResponse {
    pub activity_type: Option<String>,
    pub days: u32,
    pub metric: RecordMetric,
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LeaderboardEntry {
    pub rank: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub activity_id: u64,
    pub name: String,
    pub date: String,
    pub value: String,
    pub hybrid_score: f64,
}

// ─── Builders ────────────────────────────────────────────────

/// Sorted, de-duplicated activity types.
pub fn available_activity_types(records: &[ActivityRecord]) -> Vec<String> {
    records
        .iter()
        .map(|a| a.activity_type.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Build the full dashboard for one activity type.
///
/// With no type given, the first available type is used.
pub fn build_dashboard(
    records: &[ActivityRecord],
    activity_type: Option<&str>,
    units: UnitSystem,
    chart_metric: ChartMetric,
    now: DateTime<Utc>,
) -> DashboardResponse {
    if records.is_empty() {
        return DashboardResponse::unavailable(None, units, chart_metric);
    }

    let activity_types = available_activity_types(records);
    let selected = match activity_type {
        Some(kind) => kind.to_string(),
        // records is non-empty, so there is at least one type
        None => activity_types[0].clone(),
    };

    let of_type = filter_by_type(records, &selected);
    let periods = TIME_PERIODS
        .iter()
        .map(|period| build_period_view(&of_type, &selected, *period, units, chart_metric, now))
        .collect();

    DashboardResponse {
        data_available: true,
        error: None,
        message: None,
        activity_types,
        elevation_relevant: is_elevation_relevant(&selected),
        activity_type: Some(selected),
        units,
        chart_metric,
        periods,
    }
}

/// Build one time-window tab from activities already filtered by type.
pub fn build_period_view(
    of_type: &[&ActivityRecord],
    activity_type: &str,
    period: TimePeriod,
    units: UnitSystem,
    chart_metric: ChartMetric,
    now: DateTime<Utc>,
) -> PeriodView {
    let in_period = filter_by_recency_at(of_type.iter().copied(), period.days, now);

    if in_period.is_empty() {
        return PeriodView {
            name: period.name.to_string(),
            days: period.days as u32,
            empty_message: Some(format!(
                "No {} activities found in the {}",
                activity_type,
                period.name.to_lowercase()
            )),
            summary: vec![],
            records: vec![],
            chart: None,
            log: vec![],
        };
    }

    let elevation_relevant = is_elevation_relevant(activity_type);
    let summary = aggregate_period(&in_period);

    let third_card = if elevation_relevant {
        card(
            "Total Elevation",
            format_elevation(summary.total_elevation_gain, units),
        )
    } else {
        card("Est. Calories", format_calories(summary.total_calories))
    };

    let summary_cards = vec![
        card("Total Activities", summary.count.to_string()),
        card(
            "Total Distance",
            format_distance(summary.total_distance, units),
        ),
        third_card,
        card("Total Time", format_hours(summary.total_moving_time)),
    ];

    let records = &summary.records;
    let best = records.best_hybrid_score;
    let record_cards = vec![
        record_card(
            "Longest Duration",
            format_time(records.longest_duration.activity.moving_time),
            &records.longest_duration,
            None,
        ),
        record_card(
            "Longest Distance",
            format_distance(records.longest_distance.activity.distance, units),
            &records.longest_distance,
            None,
        ),
        record_card(
            "Most Elevation",
            format_elevation(records.most_elevation.activity.total_elevation_gain, units),
            &records.most_elevation,
            None,
        ),
        record_card(
            "Best Combined Performance",
            format!("Score: {}", format_score(best.metrics.hybrid_score)),
            &best,
            Some(format!(
                "Time: {} | Elevation: {}",
                format_time(best.activity.moving_time),
                format_elevation(best.activity.total_elevation_gain, units)
            )),
        ),
    ];

    PeriodView {
        name: period.name.to_string(),
        days: period.days as u32,
        empty_message: None,
        summary: summary_cards,
        records: record_cards,
        chart: Some(build_chart(
            &in_period,
            units,
            chart_metric,
            elevation_relevant,
        )),
        log: build_log(&in_period, units),
    }
}

fn card(label: &str, value: String) -> SummaryCard {
    SummaryCard {
        label: label.to_string(),
        value,
    }
}

fn record_card(
    title: &str,
    value: String,
    record: &EnrichedActivity<'_>,
    detail: Option<String>,
) -> RecordCard {
    RecordCard {
        title: title.to_string(),
        value,
        activity_id: record.activity.id,
        activity_name: record.activity.name.clone(),
        date: format_date(record.activity.start_date),
        detail,
    }
}

fn build_chart(
    activities: &[&ActivityRecord],
    units: UnitSystem,
    chart_metric: ChartMetric,
    elevation_relevant: bool,
) -> ChartSeries {
    let (y_title, mut tooltip_fields) = match chart_metric {
        ChartMetric::Distance => (
            match units {
                UnitSystem::Metric => "Distance (meters)",
                UnitSystem::Imperial => "Distance (feet)",
            },
            vec!["name", "start_date", "formatted_distance", "moving_time"],
        ),
        ChartMetric::HybridScore => (
            "Hybrid Score",
            vec!["name", "start_date", "hybrid_score", "moving_time"],
        ),
    };
    if elevation_relevant {
        tooltip_fields.push("total_elevation_gain");
    }

    let mut ordered: Vec<&ActivityRecord> = activities.to_vec();
    ordered.sort_by_key(|a| a.start_date);

    let points = ordered
        .into_iter()
        .map(enrich)
        .map(|e| ChartPoint {
            start_date: format_utc_rfc3339(e.activity.start_date),
            y: match chart_metric {
                ChartMetric::Distance => chart_distance(e.activity.distance, units),
                ChartMetric::HybridScore => e.metrics.hybrid_score,
            },
            name: e.activity.name.clone(),
            formatted_distance: format_distance(e.activity.distance, units),
            moving_time: format_time(e.activity.moving_time),
            hybrid_score: e.metrics.hybrid_score,
            total_elevation_gain: elevation_relevant
                .then(|| format_elevation(e.activity.total_elevation_gain, units)),
        })
        .collect();

    ChartSeries {
        y_title: y_title.to_string(),
        tooltip_fields: tooltip_fields.into_iter().map(String::from).collect(),
        points,
    }
}

fn build_log(activities: &[&ActivityRecord], units: UnitSystem) -> Vec<LogRow> {
    let mut ordered: Vec<&ActivityRecord> = activities.to_vec();
    ordered.sort_by(|a, b| b.start_date.cmp(&a.start_date));

    ordered
        .into_iter()
        .map(enrich)
        .map(|e| LogRow {
            id: e.activity.id,
            name: e.activity.name.clone(),
            start_date: format_utc_rfc3339(e.activity.start_date),
            distance: format_distance(e.activity.distance, units),
            moving_time: format_time(e.activity.moving_time),
            total_elevation_gain: format_elevation(e.activity.total_elevation_gain, units),
            hybrid_score: format_score(e.metrics.hybrid_score),
        })
        .collect()
}

/// Top `limit` activities of a type within the last `days` days.
pub fn build_leaderboard(
    records: &[ActivityRecord],
    activity_type: Option<&str>,
    days: u32,
    metric: RecordMetric,
    limit: usize,
    units: UnitSystem,
    now: DateTime<Utc>,
) -> LeaderboardResponse {
    let candidates = match activity_type {
        Some(kind) => filter_by_type(records, kind),
        None => records.iter().collect(),
    };
    let recent = filter_by_recency_at(candidates, i64::from(days), now);

    let entries = top_n(recent, metric, limit)
        .into_iter()
        .zip(1..)
        .map(|(e, rank)| LeaderboardEntry {
            rank,
            activity_id: e.activity.id,
            name: e.activity.name.clone(),
            date: format_date(e.activity.start_date),
            value: format_metric(&e, metric, units),
            hybrid_score: e.metrics.hybrid_score,
        })
        .collect();

    LeaderboardResponse {
        activity_type: activity_type.map(String::from),
        days,
        metric,
        entries,
    }
}

fn format_metric(activity: &EnrichedActivity<'_>, metric: RecordMetric, units: UnitSystem) -> String {
    let value = metric_value(activity, metric);
    match metric {
        RecordMetric::MovingTime => format_time(activity.activity.moving_time),
        RecordMetric::Distance => format_distance(value, units),
        RecordMetric::Elevation => format_elevation(value, units),
        RecordMetric::HybridScore => format_score(value),
    }
}
