//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with the arena recency list,
//! a capacity bound and lazy TTL expiration.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::entry::Entry;
use crate::cache::lru::{self, RecencyList};
use crate::cache::{CacheStats, Clock, DiagnosticSink, SystemClock, TracingSink};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Cache ==
/// Bounded key-value cache with LRU eviction and optional TTL.
///
/// Every live key has exactly one index record and one recency list node.
/// Expired entries are only discovered on access; there is no sweeper.
///
/// The cache does no internal locking. Share it across threads by wrapping
/// it, e.g. in `Arc<Mutex<Cache<..>>>`.
pub struct Cache<K, V, C = SystemClock> {
    /// Key to recency list slot
    index: HashMap<K, usize>,
    /// Entry storage in recency order
    list: RecencyList<K, V>,
    /// Maximum number of entries, None = unbounded
    limit: Option<usize>,
    /// Maximum age since last set/touch, None = never expires
    ttl: Option<Duration>,
    /// Whether diagnostic lines are emitted
    logging: bool,
    hits: u64,
    misses: u64,
    evictions: u64,
    clock: C,
    sink: Box<dyn DiagnosticSink>,
}

impl<K, V> Cache<K, V> {
    // == Constructors ==
    /// Creates an unbounded cache without TTL.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Creates a cache holding at most `limit` entries.
    pub fn with_limit(limit: usize) -> Result<Self> {
        validate_limit(limit)?;
        let mut cache = Self::new();
        cache.limit = Some(limit);
        Ok(cache)
    }

    /// Creates a cache from loaded configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::from_config_with_clock(config, SystemClock)
    }
}

impl<K, V> Default for Cache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> Cache<K, V, C> {
    /// Creates an unbounded cache without TTL reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            index: HashMap::new(),
            list: RecencyList::new(),
            limit: None,
            ttl: None,
            logging: false,
            hits: 0,
            misses: 0,
            evictions: 0,
            clock,
            sink: Box::new(TracingSink),
        }
    }

    /// Creates a cache from loaded configuration reading time from `clock`.
    pub fn from_config_with_clock(config: &CacheConfig, clock: C) -> Result<Self> {
        if let Some(limit) = config.limit {
            validate_limit(limit)?;
        }
        if let Some(ttl) = config.ttl {
            validate_ttl(ttl)?;
        }

        let mut cache = Self::with_clock(clock);
        cache.limit = config.limit;
        cache.ttl = config.ttl;
        cache.logging = config.logging;
        Ok(cache)
    }

    /// Replaces the diagnostic sink (default: [`TracingSink`]).
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    // == Length ==
    /// Returns the number of indexed entries, including expired entries
    /// that have not been accessed since they expired.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    pub fn logging_enabled(&self) -> bool {
        self.logging
    }

    // == Stats ==
    /// Returns a snapshot of counters and configuration.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            size: self.index.len(),
            limit: self.limit,
            ttl: self.ttl,
        }
    }

    // == Set Logging ==
    pub fn set_logging(&mut self, enabled: bool) {
        self.logging = enabled;
    }

    /// Emits a diagnostic line if logging is enabled.
    ///
    /// The message is only formatted when it will be emitted.
    fn log(&self, message: impl FnOnce() -> String) {
        if self.logging {
            self.sink.emit(&message());
        }
    }
}

impl<K, V, C> Cache<K, V, C>
where
    K: Eq + Hash + Clone + Display,
    V: Clone + Display,
    C: Clock,
{
    // == Get ==
    /// Retrieves a value by key, marking it most recently used.
    ///
    /// Absent and expired keys count as misses; an expired entry is removed.
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        let now = self.clock.now();
        let Some(idx) = self.live_slot(key, now) else {
            self.misses += 1;
            self.log(|| format!("Cache miss for key: {key}"));
            return None;
        };

        self.hits += 1;
        self.list.move_to_front(idx);
        self.log(|| format!("Cache hit for key: {key}"));
        self.list.get(idx).map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Stores a key-value pair and returns the stored value.
    ///
    /// An existing key is overwritten in place, restamped and moved to the
    /// front without eviction. A new key is inserted at the front, then the
    /// least recently used entries are evicted while over the limit.
    pub fn set(&mut self, key: K, value: V) -> V {
        let now = self.clock.now();

        if let Some(&idx) = self.index.get(&key) {
            if let Some(entry) = self.list.get_mut(idx) {
                entry.value = value.clone();
                entry.refresh(now);
            }
            self.list.move_to_front(idx);
            self.log(|| format!("Updated cache for key: {key}, value: {value}"));
            return value;
        }

        self.log(|| format!("Added cache for key: {key}, value: {value}"));
        let idx = self
            .list
            .push_front(Entry::new(key.clone(), value.clone(), now));
        self.index.insert(key, idx);
        self.enforce_limit();
        value
    }

    // == Has ==
    /// Checks membership without touching stats or recency.
    ///
    /// An entry that [`get`](Cache::get) would treat as expired is reported
    /// absent, but it is left in place.
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        self.index
            .get(key)
            .and_then(|&idx| self.list.get(idx))
            .is_some_and(|entry| !entry.is_expired(self.ttl, now))
    }

    // == Peek ==
    /// Returns a live value without touching stats or recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        self.index
            .get(key)
            .and_then(|&idx| self.list.get(idx))
            .filter(|entry| !entry.is_expired(self.ttl, now))
            .map(|entry| entry.value.clone())
    }

    // == Peek LRU ==
    /// Returns the key that the next eviction would remove.
    pub fn peek_lru(&self) -> Option<&K> {
        self.list
            .back()
            .and_then(|idx| self.list.get(idx))
            .map(|entry| &entry.key)
    }

    // == Delete ==
    /// Removes an entry by key. Absent keys are ignored.
    pub fn delete<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        if let Some(idx) = self.index.remove(key) {
            self.list.remove(idx);
            self.log(|| format!("Deleted cache for key: {key}"));
        }
    }

    // == Clear ==
    /// Removes every entry and resets the counters.
    ///
    /// Limit, TTL and the logging flag are kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
        self.hits = 0;
        self.misses = 0;
        self.evictions = 0;
        self.log(|| "Cleared cache".to_string());
    }

    // == Touch ==
    /// Restamps a live entry and marks it most recently used.
    ///
    /// Returns false if the key is absent or expired. The value and the
    /// hit/miss counters are unchanged.
    pub fn touch<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        let now = self.clock.now();
        let Some(idx) = self.live_slot(key, now) else {
            return false;
        };

        if let Some(entry) = self.list.get_mut(idx) {
            entry.refresh(now);
        }
        self.list.move_to_front(idx);
        self.log(|| format!("Touched cache for key: {key}"));
        true
    }

    // == Find ==
    /// Returns the first live entry, in insertion order, matching `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<(K, V)>
    where
        F: FnMut(&K, &V) -> bool,
    {
        let now = self.clock.now();
        self.list
            .iter_insertion()
            .filter(|entry| !entry.is_expired(self.ttl, now))
            .find(|entry| predicate(&entry.key, &entry.value))
            .map(|entry| (entry.key.clone(), entry.value.clone()))
    }

    // == Keys ==
    /// Lazily iterates live keys in insertion order.
    ///
    /// Each call starts a fresh pass. Expired entries are skipped without
    /// being removed, so they are still counted by [`len`](Cache::len).
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            entries: self.list.iter_insertion(),
            ttl: self.ttl,
            now: self.clock.now(),
        }
    }

    /// Lazily iterates live keys from most to least recently used.
    pub fn recent_keys(&self) -> Keys<'_, K, V> {
        Keys {
            entries: self.list.iter(),
            ttl: self.ttl,
            now: self.clock.now(),
        }
    }

    // == Values ==
    /// Snapshot of live values in insertion order, skipping expired entries.
    pub fn values(&self) -> Vec<V> {
        let now = self.clock.now();
        self.list
            .iter_insertion()
            .filter(|entry| !entry.is_expired(self.ttl, now))
            .map(|entry| entry.value.clone())
            .collect()
    }

    // == Set TTL ==
    /// Sets or clears the TTL.
    ///
    /// Only later accesses are affected; nothing is evicted here.
    pub fn set_ttl(&mut self, ttl: Option<Duration>) -> Result<()> {
        if let Some(ttl) = ttl {
            validate_ttl(ttl)?;
        }
        self.ttl = ttl;
        self.log(|| format!("Set TTL to: {}", format_ttl(ttl)));
        Ok(())
    }

    // == Set Limit ==
    /// Sets the capacity bound, evicting least recently used entries
    /// until the cache fits.
    pub fn set_limit(&mut self, limit: usize) -> Result<()> {
        validate_limit(limit)?;
        self.limit = Some(limit);
        self.log(|| format!("Set limit to: {limit}"));
        self.enforce_limit();
        Ok(())
    }

    // == Internals ==
    /// Resolves `key` to a live slot, collecting it if it has expired.
    fn live_slot<Q>(&mut self, key: &Q, now: Instant) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        let expired = self
            .list
            .get(idx)
            .is_some_and(|entry| entry.is_expired(self.ttl, now));

        if expired {
            self.index.remove(key);
            self.list.remove(idx);
            return None;
        }
        Some(idx)
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        while self.list.len() > limit {
            if self.evict_lru().is_none() {
                break;
            }
        }
    }

    /// Removes the tail of the recency list from both structures.
    fn evict_lru(&mut self) -> Option<K> {
        let entry = self.list.pop_back()?;
        self.index.remove(&entry.key);
        self.evictions += 1;
        debug!(key = %entry.key, limit = ?self.limit, "evicted least recently used entry");
        Some(entry.key)
    }
}

impl<K, V, C> fmt::Debug for Cache<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("len", &self.index.len())
            .field("limit", &self.limit)
            .field("ttl", &self.ttl)
            .field("logging", &self.logging)
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .field("evictions", &self.evictions)
            .finish_non_exhaustive()
    }
}

// == Keys Iterator ==
/// Lazy view over the live keys of a [`Cache`].
///
/// Returned by [`Cache::keys`] (insertion order) and [`Cache::recent_keys`]
/// (recency order).
///
/// Expired entries are skipped but stay indexed until accessed, so the
/// yielded count can be lower than [`Cache::len`] and `stats().size`.
#[derive(Debug)]
pub struct Keys<'a, K, V> {
    entries: lru::Iter<'a, K, V>,
    ttl: Option<Duration>,
    now: Instant,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let (ttl, now) = (self.ttl, self.now);
        self.entries
            .find(|entry| !entry.is_expired(ttl, now))
            .map(|entry| &entry.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.entries.size_hint().1)
    }
}

// == Validation ==
fn validate_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(CacheError::InvalidLimit(limit));
    }
    Ok(())
}

fn validate_ttl(ttl: Duration) -> Result<()> {
    if ttl.is_zero() {
        return Err(CacheError::InvalidTtl(ttl));
    }
    Ok(())
}

/// Renders a TTL for diagnostics: whole milliseconds, or `none`.
fn format_ttl(ttl: Option<Duration>) -> String {
    match ttl {
        Some(ttl) => ttl.as_millis().to_string(),
        None => "none".to_string(),
    }
}
