//! Path-scoped CORS policy engine.
//!
//! Rule text is parsed once into a [`RuleSet`]; each rule drives either a
//! [`CorsLayer`] wrapped around an application handler or an OPTIONS-only
//! preflight route installed with [`preflight_routes`].

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rules;

pub use config::ServerConfig;
pub use http::{preflight_routes, wrap, CorsLayer, HttpServer, OriginPolicy};
pub use lifecycle::Shutdown;
pub use rules::{Rule, RuleBuilder, RuleError, RuleSet};
