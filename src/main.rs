//! DB Pool Query - Main entry point.
//!
//! Runs one SQL statement through the pool cache and prints the normalized rows
//! as a JSON array on stdout.

use clap::Parser;
use db_pool_cache::config::Config;
use db_pool_cache::db::{PoolCache, QueryExecutor};
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the result rows.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse configuration from command line and environment
    let config = Config::parse();

    // Initialize logging
    init_tracing(&config);

    info!("Starting db-pool-query v{}", env!("CARGO_PKG_VERSION"));

    let params = config.connection_parameters()?;
    let options = config.pool_options()?;

    info!(
        backend = params.kind().display_name(),
        host = %params.host(),
        port = params.port_or_default(),
        database = params.database().unwrap_or_default(),
        "Target resolved"
    );

    let cache = Arc::new(PoolCache::with_options(options));
    let executor = QueryExecutor::new(Arc::clone(&cache));

    let rows = match executor.run_query(&config.sql, &params).await {
        Ok(rows) => rows,
        Err(e) => {
            error!(error = %e, retryable = e.is_retryable(), "Query failed");
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Hint: {}", suggestion);
            }
            return Err(e.into());
        }
    };

    println!("{}", serde_json::to_string_pretty(&rows)?);

    for entry in cache.list_cache_entries() {
        debug!(
            key = %entry.key,
            resource_id = entry.resource_id,
            age_secs = entry.age_secs,
            open_connections = entry.open_connections,
            "Cached pool"
        );
    }

    // Close gracefully so servers see a clean disconnect
    if let Some(resource) = cache.get(&params) {
        resource.pool().close().await;
    }

    Ok(())
}
