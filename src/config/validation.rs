//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, address parses)
//! - Check the rule source is unambiguous
//! - Check installed paths are routable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Rule text is validated separately by the rule parser

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::http::routes::is_valid_path;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("rules: exactly one of `file` or `inline` must be set")]
    RuleSource,

    #[error("rules.paths cannot be empty")]
    NoPaths,

    #[error("rules.paths entry {0:?} must start with '/' and use whole-segment {{name}} captures")]
    Path(String),

    #[error("timeouts.request_secs must be greater than zero")]
    RequestTimeout,

    #[error("observability.log_level cannot be empty")]
    LogLevel,
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.rules.file.is_some() == config.rules.inline.is_some() {
        errors.push(ValidationError::RuleSource);
    }

    if config.rules.paths.is_empty() {
        errors.push(ValidationError::NoPaths);
    }
    for path in &config.rules.paths {
        if !is_valid_path(path) {
            errors.push(ValidationError::Path(path.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }

    if config.observability.log_level.trim().is_empty() {
        errors.push(ValidationError::LogLevel);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
