//! Path-indexed rule registry.
//!
//! # Responsibilities
//! - Store rules in path registration order
//! - Look up the rule for a request path
//! - Retain the source text for diagnostics
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) exact lookup via HashMap
//! - Explicit match beats the `*` fallback; no match is an explicit `None`

use std::collections::HashMap;
use std::str::FromStr;

use crate::rules::error::{RuleError, RuleResult};
use crate::rules::parser;
use crate::rules::rule::Rule;
use crate::rules::WILDCARD;

/// Parsed rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    source: String,
    paths: Vec<String>,
    rules: HashMap<String, Rule>,
}

impl RuleSet {
    /// Parse rule text. See [`parser::parse`].
    pub fn parse(text: &str) -> RuleResult<Self> {
        parser::parse(text)
    }

    /// Rule registered for `path`, falling back to the `*` rule.
    pub fn rule_for(&self, path: &str) -> Option<&Rule> {
        self.rules.get(path).or_else(|| self.wildcard())
    }

    /// Rule registered for the `*` path, if any.
    pub fn wildcard(&self) -> Option<&Rule> {
        self.rules.get(WILDCARD)
    }

    /// Registered paths in first-seen order.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// The rule text this set was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// True if `path` was registered explicitly (no wildcard fallback).
    pub fn contains(&self, path: &str) -> bool {
        self.rules.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// `(path, rule)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> + '_ {
        self.paths
            .iter()
            .filter_map(move |p| self.rules.get(p).map(|r| (p.as_str(), r)))
    }
}

impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// In-progress registry, local to a single parse.
#[derive(Debug, Default)]
pub(crate) struct RuleSetBuilder {
    paths: Vec<String>,
    rules: HashMap<String, Rule>,
}

impl RuleSetBuilder {
    pub(crate) fn contains(&self, path: &str) -> bool {
        self.rules.contains_key(path)
    }

    /// Caller checks `contains` first; an existing path is left untouched.
    pub(crate) fn insert(&mut self, path: String, rule: Rule) {
        if self.rules.contains_key(&path) {
            return;
        }
        self.paths.push(path.clone());
        self.rules.insert(path, rule);
    }

    pub(crate) fn finish(self, source: &str) -> RuleSet {
        RuleSet {
            source: source.to_string(),
            paths: self.paths,
            rules: self.rules,
        }
    }
}
