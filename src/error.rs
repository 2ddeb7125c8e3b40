//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its shell front end.
///
/// Lookups never fail: absence is reported through `Option`/`bool`.
/// Only reconfiguration and the shell's I/O can produce an error.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Capacity limit of zero
    #[error("Invalid limit: {0} (limit must be at least 1)")]
    InvalidLimit(usize),

    /// Zero-length TTL
    #[error("Invalid TTL: {0:?} (ttl must be greater than zero)")]
    InvalidTtl(Duration),

    /// Shell command that could not be parsed or validated
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Configuration rejected at load time
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Shell input/output failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Reply serialization failure
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
