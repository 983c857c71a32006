//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the preflight routes for the configured paths
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener and serve until shutdown

use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::preflight::OriginPolicy;
use crate::http::routes::{self, RoutesError};
use crate::rules::RuleSet;

/// HTTP server answering CORS preflights.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a server for `rules`, installing the paths listed in `config`.
    pub fn new(config: ServerConfig, rules: &RuleSet) -> Result<Self, RoutesError> {
        let policy = OriginPolicy::from_enforce(config.rules.enforce_origin);
        let preflight = routes::preflight_routes_with_policy(config.rules.paths.as_slice(), rules, policy)?;

        let router = Self::build_router(&config, preflight);
        Ok(Self { router, config })
    }

    /// Layer the routes with timeout, request id and tracing middleware.
    fn build_router(config: &ServerConfig, routes: Router) -> Router {
        routes
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            paths = self.config.rules.paths.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
