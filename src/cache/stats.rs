//! Cache Statistics Module
//!
//! Read-only snapshot of cache counters and configuration.

use std::time::Duration;

use serde::{Serialize, Serializer};

// == Cache Stats ==
/// Snapshot returned by [`Cache::stats`](crate::cache::Cache::stats).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of successful lookups
    pub hits: u64,
    /// Number of failed lookups (key absent or expired)
    pub misses: u64,
    /// Number of entries evicted to honour the limit
    pub evictions: u64,
    /// Number of indexed entries at snapshot time
    pub size: usize,
    /// Capacity bound, None = unbounded
    pub limit: Option<usize>,
    /// Time-to-live, None = entries never expire
    #[serde(rename = "ttl_ms", serialize_with = "serialize_ttl_ms")]
    pub ttl: Option<Duration>,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Total Lookups ==
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }
}

fn serialize_ttl_ms<S>(ttl: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match ttl {
        Some(ttl) => serializer.serialize_u64(u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX)),
        None => serializer.serialize_none(),
    }
}
