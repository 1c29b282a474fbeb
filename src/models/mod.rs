// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod stats;
pub mod units;

pub use activity::{ActivityRecord, DerivedMetrics, EnrichedActivity};
pub use stats::{PeriodRecords, PeriodSummary};
pub use units::{ChartMetric, RecordMetric, UnitSystem};
