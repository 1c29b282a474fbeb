//! Aggregates over a filtered set of activities.

use crate::models::EnrichedActivity;

/// Totals and records for one time window.
///
/// Built by [`crate::services::metrics::aggregate_period`] from a non-empty
/// set of activities; the records borrow from that set.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary<'a> {
    /// Number of activities in the window
    pub count: usize,
    /// Total distance (meters)
    pub total_distance: f64,
    /// Total elevation gain (meters)
    pub total_elevation_gain: f64,
    /// Total moving time (seconds)
    pub total_moving_time: u64,
    /// Sum of estimated calories (kcal)
    pub total_calories: f64,
    pub records: PeriodRecords<'a>,
}

/// Single best activity per field. Ties go to the earliest in input order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodRecords<'a> {
    pub longest_duration: EnrichedActivity<'a>,
    pub longest_distance: EnrichedActivity<'a>,
    pub most_elevation: EnrichedActivity<'a>,
    pub best_hybrid_score: EnrichedActivity<'a>,
}
