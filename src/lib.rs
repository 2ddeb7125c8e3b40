//! LRU TTL Cache - A bounded in-memory key-value cache
//!
//! Provides O(1) least-recently-used eviction with optional lazy TTL
//! expiration, hit/miss statistics and optional diagnostic logging.
//!
//! # Example
//! ```
//! use lru_ttl_cache::Cache;
//!
//! let mut cache: Cache<String, i32> = Cache::with_limit(2).unwrap();
//! cache.set("a".to_string(), 1);
//! cache.set("b".to_string(), 2);
//! cache.get("a");
//! cache.set("c".to_string(), 3); // evicts "b"
//!
//! assert!(cache.has("a"));
//! assert!(!cache.has("b"));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod shell;

pub use cache::{Cache, CacheStats, Clock, DiagnosticSink, ManualClock, SystemClock, TracingSink};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
