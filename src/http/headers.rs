//! CORS header helpers.
//!
//! # Responsibilities
//! - Re-case header names for display (`content-type` → `Content-Type`)
//! - Split comma-separated request header lists
//!
//! # Design Decisions
//! - Re-casing is an explicit pure function: output casing is observable
//! - Names with non-token characters are returned unchanged

use axum::http::header::{GetAll, HeaderValue};

pub use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
};

/// Separator used when joining header names into a single value.
pub const HEADER_LIST_SEPARATOR: &str = ",";

/// Canonical display form of a header name.
///
/// The first letter and every letter following a `-` are upper-cased, all
/// other letters lower-cased.
pub fn canonical_header_name(name: &str) -> String {
    if name.is_empty() || !name.bytes().all(is_token_byte) {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
        upper = c == '-';
    }
    out
}

/// Lower-cased, trimmed, non-empty entries of every occurrence of a list header.
///
/// Returns `None` if any occurrence is not visible ASCII.
pub fn split_header_list(values: GetAll<'_, HeaderValue>) -> Option<Vec<String>> {
    let mut entries = Vec::new();
    for value in values {
        let value = value.to_str().ok()?;
        entries.extend(
            value
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_ascii_lowercase),
        );
    }
    Some(entries)
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
        )
}
