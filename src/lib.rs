// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava Dashboard: activity metrics for a personal training dashboard
//!
//! This crate fetches an athlete's activities from Strava, derives
//! comparable metrics (hybrid score, calories, period records) and serves
//! them as JSON for the dashboard frontend.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{DashboardService, StravaClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub dashboard: DashboardService<StravaClient>,
}

impl AppState {
    /// Wire up services from configuration.
    pub fn from_config(config: Config) -> Self {
        let dashboard = DashboardService::new(
            StravaClient::from_config(&config),
            config.per_page,
            chrono::Duration::seconds(config.cache_ttl_secs),
        );

        Self { config, dashboard }
    }
}
