//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → loader.rs load_rules (rule text file or inline)
//!     → RuleSet (parsed once, shared read-only)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_rules, ConfigError};
pub use schema::{ListenerConfig, LogFormat, ObservabilityConfig, RulesConfig, ServerConfig, TimeoutConfig};
pub use validation::ValidationError;
