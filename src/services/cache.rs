//! Time-boxed, in-memory cache of fetched activity lists.
//!
//! Keyed by page size only. An entry is either fresh and returned whole, or
//! expired and dropped whole; there is no partial invalidation.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;

use crate::models::ActivityRecord;

/// Cached activity list with the time it was fetched.
#[derive(Clone)]
struct CachedActivities {
    activities: Arc<Vec<ActivityRecord>>,
    fetched_at: DateTime<Utc>,
}

/// Activity list cache shared by request handlers.
pub struct ActivityCache {
    entries: DashMap<u32, CachedActivities>,
    ttl: Duration,
}

impl ActivityCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached list for `per_page` if it is younger than the TTL.
    ///
    /// Expired entries are removed.
    pub fn get(&self, per_page: u32, now: DateTime<Utc>) -> Option<Arc<Vec<ActivityRecord>>> {
        if let Some(cached) = self.entries.get(&per_page) {
            if now - cached.fetched_at < self.ttl {
                return Some(cached.activities.clone());
            }
        }

        let ttl = self.ttl;
        if self
            .entries
            .remove_if(&per_page, |_, cached| now - cached.fetched_at >= ttl)
            .is_some()
        {
            tracing::debug!(per_page, "Activity cache entry expired");
        }
        None
    }

    pub fn insert(
        &self,
        per_page: u32,
        activities: Arc<Vec<ActivityRecord>>,
        fetched_at: DateTime<Utc>,
    ) {
        self.entries.insert(
            per_page,
            CachedActivities {
                activities,
                fetched_at,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn activities(n: u64) -> Arc<Vec<ActivityRecord>> {
        Arc::new(
            (0..n)
                .map(|id| ActivityRecord {
                    id,
                    name: format!("Activity {}", id),
                    activity_type: "Ride".to_string(),
                    start_date: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
                    distance: 20000.0,
                    moving_time: 3600,
                    total_elevation_gain: 300.0,
                })
                .collect(),
        )
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_hit_within_ttl() {
        let cache = ActivityCache::new(Duration::hours(1));
        cache.insert(200, activities(3), t0());

        let hit = cache.get(200, t0() + Duration::minutes(59)).unwrap();
        assert_eq!(hit.len(), 3);
    }

    #[test]
    fn test_keyed_by_page_size() {
        let cache = ActivityCache::new(Duration::hours(1));
        cache.insert(200, activities(3), t0());

        assert!(cache.get(100, t0()).is_none());
        assert!(cache.get(200, t0()).is_some());
    }

    #[test]
    fn test_expired_entry_is_dropped() {
        let cache = ActivityCache::new(Duration::hours(1));
        cache.insert(200, activities(3), t0());

        assert!(cache.get(200, t0() + Duration::hours(1)).is_none());
        assert!(cache.is_empty());

        // A fresh insert is served again
        cache.insert(200, activities(1), t0() + Duration::hours(2));
        assert_eq!(cache.get(200, t0() + Duration::hours(2)).unwrap().len(), 1);
        assert_eq!(cache.len(), 1);
    }
}
