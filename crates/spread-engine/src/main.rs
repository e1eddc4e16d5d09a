//! Event spread service binary.
//!
//! Wires configuration, logging, the dispatch table, and the HTTP transport
//! together and serves until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `event-spread.yaml` (or `EVENT_SPREAD_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the dispatch table and event spread service
//! 4. Serve the HTTP API

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use spread_core::config::LoggingConfig;
use spread_core::{EventSpreadService, ServiceConfig};
use spread_server::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "event-spread.yaml";

/// Application entry point for the spread engine.
///
/// # Errors
///
/// Returns an error if any initialization step or the server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so remember whether
    //    defaults were used and report it afterwards.
    let (config, config_path) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("spread-engine starting");
    match &config_path {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }

    // 3. Build the service. The dispatch table is fixed from here on.
    let service = EventSpreadService::from_config(&config).map_err(EngineError::from)?;
    let spread_types: Vec<String> = service
        .dispatch()
        .spread_types()
        .map(|t| t.to_string())
        .collect();
    info!(
        spread_types = ?spread_types,
        query_timeout_ms = config.query.timeout_ms,
        "Event spread service initialized"
    );

    // 4. Serve until shutdown.
    let state = Arc::new(AppState::new(Arc::new(service)));
    spread_server::start_server(&config.server, state)
        .await
        .map_err(EngineError::from)?;

    info!("spread-engine shutdown complete");
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load the service configuration.
///
/// Reads `EVENT_SPREAD_CONFIG` if set, otherwise `event-spread.yaml` in the
/// current working directory. A missing default file yields defaults; a
/// missing explicit file is an error.
fn load_config() -> Result<(ServiceConfig, Option<PathBuf>), EngineError> {
    if let Ok(explicit) = std::env::var("EVENT_SPREAD_CONFIG") {
        let path = PathBuf::from(explicit);
        let config = ServiceConfig::from_file(&path)?;
        return Ok((config, Some(path)));
    }

    let path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if path.exists() {
        let config = ServiceConfig::from_file(&path)?;
        Ok((config, Some(path)))
    } else {
        Ok((ServiceConfig::parse("")?, None))
    }
}
