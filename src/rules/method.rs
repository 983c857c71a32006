//! HTTP method vocabulary.
//!
//! # Responsibilities
//! - Define the methods a rule may name
//! - Define the default-allowed subset a `*` methods field expands to
//! - Normalize method tokens (case-insensitive in rule text)
//!
//! # Design Decisions
//! - Plain constants, no lazy initialization
//! - CONNECT, OPTIONS and TRACE are configurable but never implied by `*`

use axum::http::Method;

/// Every method token accepted in rule text.
pub const VOCABULARY: [Method; 9] = [
    Method::CONNECT,
    Method::DELETE,
    Method::GET,
    Method::HEAD,
    Method::OPTIONS,
    Method::PATCH,
    Method::POST,
    Method::PUT,
    Method::TRACE,
];

/// Methods a `*` methods field expands to (everything but CONNECT, OPTIONS, TRACE).
pub const DEFAULT_ALLOWED: [Method; 6] = [
    Method::DELETE,
    Method::GET,
    Method::HEAD,
    Method::PATCH,
    Method::POST,
    Method::PUT,
];

/// Resolve a method token against the vocabulary, ignoring case and surrounding whitespace.
pub fn parse_method(token: &str) -> Option<Method> {
    let token = token.trim();
    VOCABULARY
        .iter()
        .find(|m| m.as_str().eq_ignore_ascii_case(token))
        .cloned()
}

/// Returns true if the token names a method of the vocabulary.
pub fn is_known(token: &str) -> bool {
    parse_method(token).is_some()
}

/// The default-allowed methods as an owned list.
pub fn default_allowed() -> Vec<Method> {
    DEFAULT_ALLOWED.to_vec()
}
