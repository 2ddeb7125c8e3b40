//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables. Anything unset or
/// unparsable falls back to the default: unbounded, no TTL, logging off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries, None = unbounded
    pub limit: Option<usize>,
    /// Time-to-live measured from an entry's last set/touch, None = never expires
    pub ttl: Option<Duration>,
    /// Whether diagnostic lines are emitted
    pub logging: bool,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_LIMIT` - Maximum cache entries (default: unbounded)
    /// - `CACHE_TTL_MS` - Entry TTL in milliseconds (default: none)
    /// - `CACHE_LOGGING` - `1`, `true`, `yes` or `on` enables diagnostics (default: off)
    pub fn from_env() -> Self {
        Self {
            limit: env::var("CACHE_LIMIT").ok().and_then(|v| v.parse().ok()),
            ttl: env::var("CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis),
            logging: env::var("CACHE_LOGGING")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    /// Rejects values the cache cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.limit == Some(0) {
            return Err(CacheError::InvalidConfig(
                "CACHE_LIMIT must be at least 1".to_string(),
            ));
        }
        if self.ttl == Some(Duration::ZERO) {
            return Err(CacheError::InvalidConfig(
                "CACHE_TTL_MS must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
