//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (rule parsing, preflight decisions, server lifecycle)
//!     → logging.rs (subscriber: filter + pretty/JSON formatter)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID (x-request-id) attached by the HTTP layer, visible in trace spans

pub mod logging;
