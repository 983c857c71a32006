//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing / timeout / request-id layers)
//!     → routes.rs (OPTIONS-only handler per known path)
//!       or middleware/cors.rs (CORS wrapped around an application handler)
//!     → preflight.rs (decision: 200 / 400 / 403 + Access-Control-* headers)
//!     → Send to client
//! ```

pub mod headers;
pub mod middleware;
pub mod preflight;
pub mod routes;
pub mod server;

pub use middleware::{wrap, Cors, CorsLayer};
pub use preflight::{OriginPolicy, Preflight};
pub use routes::{
    preflight_routes, preflight_routes_from_config, preflight_routes_with_policy, RoutesError,
};
pub use server::HttpServer;
