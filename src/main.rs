//! LRU TTL Cache - interactive shell
//!
//! Reads commands from stdin and writes one JSON reply per line to stdout.

use std::io;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lru_ttl_cache::{shell, Cache, CacheConfig};

/// Main entry point for the cache shell.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the cache with configured parameters
/// 4. Run the shell on stdin/stdout until EOF or `quit`
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lru_ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Starting LRU TTL cache shell");

    let config = CacheConfig::from_env();
    config.validate().context("invalid cache configuration")?;
    info!(
        limit = ?config.limit,
        ttl = ?config.ttl,
        logging = config.logging,
        "Configuration loaded"
    );

    let mut cache = Cache::from_config(&config).context("failed to create cache")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let executed = shell::run(&mut cache, stdin.lock(), stdout.lock())
        .context("shell session failed")?;

    info!(executed, "Shutdown complete");
    Ok(())
}
