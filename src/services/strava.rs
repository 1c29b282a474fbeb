// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for listing athlete activities.
//!
//! The access token comes from configuration and is sent as a bearer token.
//! Token refresh is not handled here; a 401 surfaces as an error.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::ActivityRecord;
use crate::services::fetcher::ActivitySource;
use serde::Deserialize;

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl StravaClient {
    /// Create a new Strava client for an API base URL and access token.
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.strava_api_url.clone(),
            config.strava_access_token.clone(),
        )
    }

    /// List one page of the authenticated athlete's activities.
    pub async fn list_activities(&self, page: u32, per_page: u32) -> Result<Vec<ActivityRecord>> {
        let url = format!("{}/athlete/activities", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("page", page.to_string()), ("per_page", per_page.to_string())])
            .send()
            .await
            .map_err(|e| AppError::StravaApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();

            tracing::warn!(status, body = %body, "Strava request failed");
            return Err(AppError::StravaStatus { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| AppError::StravaApi(format!("JSON parse error: {}", e)))
    }
}

impl ActivitySource for StravaClient {
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Vec<ActivityRecord>> {
        self.list_activities(page, per_page).await
    }
}
