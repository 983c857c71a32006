//! CORS rule subsystem.
//!
//! # Data Flow
//! ```text
//! rule text ("<paths>;<origins>;<headers>;<methods>" per line)
//!     → parser.rs (split lines/fields, validate, expand "*" methods)
//!     → registry.rs (RuleSet: ordered paths + path → Rule map)
//!     → rule_for(path): explicit match, else "*" rule, else None
//!
//! Programmatic construction:
//!     RuleBuilder (rule.rs) → Rule
//! ```
//!
//! # Design Decisions
//! - RuleSet is built once and immutable afterwards (thread-safe without locks)
//! - First occurrence of a path wins; later duplicates are ignored
//! - A "*" path ends parsing: everything after it is unreachable anyway
//! - Method vocabulary is static data (method.rs), never mutated

pub mod error;
pub mod method;
pub mod parser;
pub mod registry;
pub mod rule;

pub use error::RuleError;
pub use registry::RuleSet;
pub use rule::{Rule, RuleBuilder};

/// Token that stands for "any" in the path, origin and method fields.
pub const WILDCARD: &str = "*";
