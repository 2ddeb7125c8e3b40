//! Cache Entry Module
//!
//! Defines the stored unit: a key, its value and the last time it was touched.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cache entry.
///
/// Owned exclusively by the recency list; callers only ever receive clones
/// of the key and value.
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    /// The key this entry is indexed under
    pub key: K,
    /// The stored value
    pub value: V,
    /// Last time the entry was created, updated or touched
    pub touched_at: Instant,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates a new entry stamped with `now`.
    pub fn new(key: K, value: V, now: Instant) -> Self {
        Self {
            key,
            value,
            touched_at: now,
        }
    }

    // == Refresh ==
    /// Restamps the entry, restarting its TTL window.
    pub fn refresh(&mut self, now: Instant) {
        self.touched_at = now;
    }

    // == Age ==
    /// Time elapsed since the entry was last touched.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.touched_at)
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry is expired only once its age is strictly
    /// greater than the TTL. With no TTL nothing ever expires.
    pub fn is_expired(&self, ttl: Option<Duration>, now: Instant) -> bool {
        ttl.is_some_and(|ttl| self.age(now) > ttl)
    }
}
