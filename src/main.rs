//! Configuration checker for the market data ingestion pipeline.
//!
//! Loads the settings document, applies `MARKETDATA_*` environment
//! overrides, validates every field, and logs the effective settings for
//! the selected environment. Exits non-zero with the full list of
//! problems if the document would not let the pipeline start.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};

use marketdata_config::{telemetry, Environment, Settings};

/// Environment variable naming the settings document path.
const CONFIG_PATH_ENV_VAR: &str = "MARKETDATA_CONFIG";

/// Default document location relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "config/database.yaml";

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_tracing_from_env();

    let path = config_path();
    let environment = Environment::from_env().context("Invalid MARKETDATA_ENVIRONMENT")?;

    info!(
        path = %path.display(),
        environment = %environment,
        "Checking settings document"
    );

    let settings = match Settings::load(&path) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{e}");
            anyhow::bail!("configuration check failed for `{}`", path.display());
        }
    };

    let resolved = settings
        .for_environment(environment)
        .with_context(|| format!("cannot resolve environment `{environment}`"))?;

    info!(
        url = %resolved.connection.redacted_url(),
        echo = resolved.connection.echo,
        max_connections = resolved.connection.max_connections(),
        pool_recycle = resolved.connection.pool_recycle,
        "Database connection"
    );
    info!(
        chunk_time_interval = %resolved.timescale.chunk_time_interval,
        compression_after = %resolved.timescale.compression_after,
        compression_policy = resolved.timescale.compression_policy.as_str(),
        retention_policy = %resolved.timescale.retention_policy,
        "Time-series storage"
    );
    info!(
        symbols = resolved.watchlist.len(),
        batch_size = resolved.symbols.batch_size,
        flush_interval = resolved.symbols.flush_interval,
        max_queue_size = resolved.symbols.max_queue_size,
        "Watchlist and batching"
    );
    info!(
        connection_pool_size = resolved.performance.connection_pool_size,
        statement_timeout = resolved.performance.statement_timeout,
        query_timeout = resolved.performance.query_timeout,
        batch_insert_size = resolved.performance.batch_insert_size,
        "Performance"
    );

    info!("Configuration OK");
    Ok(())
}

/// Resolve the document path: CLI argument, then `MARKETDATA_CONFIG`,
/// then the default location.
fn config_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_PATH_ENV_VAR).ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
