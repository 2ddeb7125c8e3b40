//! Cache Module
//!
//! Provides a bounded in-memory cache with O(1) LRU eviction and lazy TTL
//! expiration.

mod clock;
mod diagnostics;
mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use diagnostics::{DiagnosticSink, TracingSink};
pub use stats::CacheStats;
pub use store::{Cache, Keys};
