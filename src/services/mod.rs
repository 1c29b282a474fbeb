// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod cache;
pub mod dashboard;
pub mod fetcher;
pub mod format;
pub mod metrics;
pub mod strava;

pub use cache::ActivityCache;
pub use dashboard::DashboardService;
pub use fetcher::{ActivityFetcher, ActivitySource};
pub use strava::StravaClient;
