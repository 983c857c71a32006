//! Rule text parsing.
//!
//! # Responsibilities
//! - Split rule text into lines and `;`-separated fields
//! - Validate field count, paths and method tokens
//! - Expand a `*` methods field into the default-allowed set
//! - Register paths in first-seen order, stopping at the `*` path
//!
//! # Design Decisions
//! - Lines are trimmed, so indented multi-line configs parse as written
//! - Error line numbers are physical (blank lines still count)
//! - The registry under construction never escapes a failed parse

use axum::http::Method;

use crate::rules::error::{RuleError, RuleResult};
use crate::rules::method;
use crate::rules::registry::{RuleSet, RuleSetBuilder};
use crate::rules::rule::Rule;
use crate::rules::WILDCARD;

/// Separates rules.
pub const RULE_DELIMITER: char = '\n';
/// Separates the fields of a rule.
pub const FIELD_DELIMITER: char = ';';
/// Separates entries within a field.
pub const LIST_DELIMITER: char = ',';
/// Fields per rule: paths, origins, headers, methods.
pub const FIELDS: usize = 4;

const PATHS_IDX: usize = 0;
const ORIGINS_IDX: usize = 1;
const HEADERS_IDX: usize = 2;
const METHODS_IDX: usize = 3;

/// One rule line: the paths it covers and the rule they share.
#[derive(Debug)]
struct ParsedLine {
    paths: Vec<String>,
    rule: Rule,
}

/// Parse rule text into an immutable [`RuleSet`].
pub fn parse(text: &str) -> RuleResult<RuleSet> {
    if text.trim().is_empty() {
        return Err(RuleError::EmptyConfig);
    }

    let mut registry = RuleSetBuilder::default();

    'lines: for (idx, raw) in text.split(RULE_DELIMITER).enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let parsed = parse_line(line, idx + 1)?;
        for path in parsed.paths {
            if registry.contains(&path) {
                tracing::debug!(path = %path, line = idx + 1, "Path already registered, skipping");
                continue;
            }

            let is_wildcard = path == WILDCARD;
            tracing::debug!(path = %path, line = idx + 1, "Registered CORS rule");
            registry.insert(path, parsed.rule.clone());

            if is_wildcard {
                tracing::debug!(line = idx + 1, "Wildcard path registered, ignoring remaining rules");
                break 'lines;
            }
        }
    }

    Ok(registry.finish(text))
}

fn parse_line(line: &str, line_no: usize) -> RuleResult<ParsedLine> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() != FIELDS {
        return Err(RuleError::FieldCountMismatch {
            line: line_no,
            got: fields.len(),
            want: FIELDS,
        });
    }

    let paths = parse_paths(fields[PATHS_IDX], line_no)?;
    let origins = parse_list(fields[ORIGINS_IDX]);
    let headers = parse_list(fields[HEADERS_IDX]);
    let methods = parse_methods(fields[METHODS_IDX], line_no)?;

    Ok(ParsedLine {
        paths,
        rule: Rule::new(origins, headers, methods),
    })
}

fn parse_paths(field: &str, line_no: usize) -> RuleResult<Vec<String>> {
    field
        .split(LIST_DELIMITER)
        .map(str::trim)
        .map(|path| {
            if path.is_empty() {
                Err(RuleError::EmptyPath { line: line_no })
            } else {
                Ok(path.to_string())
            }
        })
        .collect()
}

fn parse_list(field: &str) -> Vec<String> {
    field
        .split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

fn parse_methods(field: &str, line_no: usize) -> RuleResult<Vec<Method>> {
    let field = field.trim();
    if field == WILDCARD {
        return Ok(method::default_allowed());
    }

    field
        .split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            method::parse_method(token).ok_or_else(|| RuleError::InvalidMethod {
                method: token.to_string(),
                line: line_no,
            })
        })
        .collect()
}
