//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging, then parse the rule text
//! - Build the server and bind the listener
//! - Serve until a shutdown signal arrives
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Rules are fully parsed before any handler exists
//! - Listener binds last (traffic only when ready)

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{self, ConfigError};
use crate::http::{HttpServer, RoutesError};
use crate::lifecycle::{signals, Shutdown};
use crate::observability::logging;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("route setup failed: {0}")]
    Routes(#[from] RoutesError),

    #[error("failed to bind listener: {0}")]
    Bind(#[from] std::io::Error),
}

/// Load `config_path`, then serve until SIGINT / SIGTERM.
pub async fn run(config_path: &Path) -> Result<(), StartupError> {
    let config = config::load_config(config_path)?;
    logging::init(&config.observability);

    tracing::info!(
        config = %config_path.display(),
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let rules = config::load_rules(&config, base_dir)?;
    tracing::info!(rules = rules.len(), paths = ?rules.paths(), "CORS rules parsed");

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config, &rules)?;

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(Arc::clone(&shutdown));

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
