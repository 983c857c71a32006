//! HTTP middleware.
//!
//! # Data Flow
//! ```text
//! Request
//!     → cors.rs
//!         OPTIONS  → preflight decision (200 / 400 / 403), inner service skipped
//!         other    → inner service → Access-Control-Allow-Origin added on the way out
//!     → Response
//! ```

pub mod cors;

pub use cors::{wrap, Cors, CorsLayer};
