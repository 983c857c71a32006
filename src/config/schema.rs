//! Configuration schema definitions.
//!
//! This module defines the server process configuration. All types derive
//! Serde traits for deserialization from TOML files. CORS rules themselves
//! are never expressed here: `[rules]` only points at rule text.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the CORS gate server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where the rule text lives and which paths to install.
    pub rules: RulesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Rule source and installed paths.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RulesConfig {
    /// Rule text file, relative to the config file's directory.
    pub file: Option<PathBuf>,

    /// Rule text given inline.
    pub inline: Option<String>,

    /// Externally known paths to install preflight handlers for.
    pub paths: Vec<String>,

    /// Reject preflights whose origin is not allowed by the rule.
    pub enforce_origin: bool,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` is unset (e.g., "info").
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [rules]
            inline = "*;*;;*"
            paths = ["/a"]
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
        assert_eq!(config.rules.inline.as_deref(), Some("*;*;;*"));
        assert!(!config.rules.enforce_origin);
    }

    #[test]
    fn test_full_config() {
        let config: ServerConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [rules]
            file = "cors.rules"
            paths = ["/a", "/b"]
            enforce_origin = true

            [timeouts]
            request_secs = 5

            [observability]
            log_level = "debug"
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.rules.file, Some(PathBuf::from("cors.rules")));
        assert_eq!(config.rules.paths, ["/a", "/b"]);
        assert!(config.rules.enforce_origin);
        assert_eq!(config.timeouts.request_secs, 5);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let result: Result<ServerConfig, _> = toml::from_str(
            r#"
            [observability]
            log_format = "xml"
            "#,
        );
        assert!(result.is_err());
    }
}
