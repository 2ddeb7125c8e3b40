//! Shell reply DTOs
//!
//! Every executed command produces one [`Reply`], written as a JSON line.

use serde::Serialize;

use crate::cache::CacheStats;

/// Any reply the shell can write
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Get(GetReply),
    Set(SetReply),
    Delete(DeleteReply),
    Has(HasReply),
    Touch(TouchReply),
    Find(FindReply),
    Keys(KeysReply),
    Values(ValuesReply),
    Stats(StatsReply),
    Message(MessageReply),
    Error(ErrorReply),
}

/// Reply to `get`
#[derive(Debug, Clone, Serialize)]
pub struct GetReply {
    /// The requested key
    pub key: String,
    /// The stored value, null on a miss
    pub value: Option<String>,
    /// Whether the lookup was a hit
    pub found: bool,
}

impl GetReply {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            key: key.into(),
            found: value.is_some(),
            value,
        }
    }
}

/// Reply to `set`
#[derive(Debug, Clone, Serialize)]
pub struct SetReply {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
    /// The stored value
    pub value: String,
}

impl SetReply {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
            value: value.into(),
        }
    }
}

/// Reply to `del`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteReply {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteReply {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Reply to `has`
#[derive(Debug, Clone, Serialize)]
pub struct HasReply {
    pub key: String,
    pub present: bool,
}

/// Reply to `touch`
#[derive(Debug, Clone, Serialize)]
pub struct TouchReply {
    pub key: String,
    pub touched: bool,
}

/// Reply to `find`; both fields are null when nothing matched
#[derive(Debug, Clone, Serialize)]
pub struct FindReply {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl FindReply {
    pub fn new(entry: Option<(String, String)>) -> Self {
        match entry {
            Some((key, value)) => Self {
                key: Some(key),
                value: Some(value),
            },
            None => Self {
                key: None,
                value: None,
            },
        }
    }
}

/// Reply to `keys`
#[derive(Debug, Clone, Serialize)]
pub struct KeysReply {
    pub keys: Vec<String>,
}

/// Reply to `values`
#[derive(Debug, Clone, Serialize)]
pub struct ValuesReply {
    pub values: Vec<String>,
}

/// Reply to `stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsReply {
    /// Counters and configuration
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Snapshot time in ISO 8601 format
    pub timestamp: String,
}

impl StatsReply {
    /// Creates a new StatsReply stamped with the current time
    pub fn new(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Reply to commands that only change state
#[derive(Debug, Clone, Serialize)]
pub struct MessageReply {
    pub message: String,
}

impl MessageReply {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Reply for any rejected command
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReply {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorReply {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
