// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Paginated activity fetching.
//!
//! Pages are requested one at a time, in order, until the source runs dry.
//! Any failed page aborts the whole fetch; partial results are discarded.

use std::future::Future;

use crate::error::{AppError, Result};
use crate::models::ActivityRecord;

/// Default page size (Strava's maximum for the activity list).
pub const DEFAULT_PER_PAGE: u32 = 200;

/// A paginated collection of activities.
pub trait ActivitySource {
    /// Fetch one page. `page` is 1-indexed.
    fn fetch_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<ActivityRecord>>> + Send;
}

/// Walks every page of an [`ActivitySource`].
#[derive(Clone)]
pub struct ActivityFetcher<S> {
    source: S,
}

impl<S: ActivitySource> ActivityFetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch all activities in source order.
    ///
    /// Stops after the first page holding fewer than `per_page` items.
    pub async fn fetch_all(&self, per_page: u32) -> Result<Vec<ActivityRecord>> {
        if per_page == 0 {
            return Err(AppError::BadRequest(
                "per_page must be greater than 0".to_string(),
            ));
        }

        let mut activities = Vec::new();
        let mut page = 1;

        loop {
            let batch = match self.source.fetch_page(page, per_page).await {
                Ok(batch) => batch,
                Err(e) => {
                    tracing::warn!(
                        page,
                        discarded = activities.len(),
                        error = %e,
                        "Activity fetch failed, discarding partial results"
                    );
                    return Err(e);
                }
            };

            let count = batch.len();
            tracing::debug!(page, count, "Fetched activity page");
            activities.extend(batch);

            if count < per_page as usize {
                break;
            }
            page += 1;
        }

        tracing::info!(
            pages = page,
            total = activities.len(),
            "Fetched all activities"
        );
        Ok(activities)
    }
}
