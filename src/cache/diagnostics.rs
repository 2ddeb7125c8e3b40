//! Diagnostics Module
//!
//! Destinations for the cache's optional diagnostic log lines.

use tracing::info;

// == Diagnostic Sink ==
/// Receives formatted diagnostic lines while logging is enabled.
///
/// Any `Fn(&str)` closure that is `Send + Sync` is a sink, which makes it
/// easy to capture lines in tests or forward them elsewhere.
pub trait DiagnosticSink: Send + Sync {
    /// Handles one diagnostic line.
    fn emit(&self, message: &str);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn emit(&self, message: &str) {
        self(message)
    }
}

// == Tracing Sink ==
/// Default sink: forwards every line as a `tracing` info event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, message: &str) {
        info!(target: "lru_ttl_cache::diagnostics", "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_closure_sink_receives_lines() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&lines);
        let sink = move |message: &str| captured.lock().unwrap().push(message.to_string());

        sink.emit("Cleared cache");
        sink.emit("Set limit to: 3");

        assert_eq!(
            *lines.lock().unwrap(),
            vec!["Cleared cache".to_string(), "Set limit to: 3".to_string()]
        );
    }

    #[test]
    fn test_tracing_sink_without_subscriber() {
        // No subscriber installed: emitting must be a harmless no-op
        TracingSink.emit("Cache hit for key: a");
    }
}
