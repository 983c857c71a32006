//! Preflight decision procedure.
//!
//! # Responsibilities
//! - Classify an OPTIONS request against a [`Rule`]
//! - Decide accept (200), malformed (400) or forbidden (403)
//! - Render the decision as CORS response headers
//!
//! # Design Decisions
//! - `evaluate` is pure: headers in, decision out, no I/O
//! - Allow-Methods echoes the single requested method, not the full list
//! - Origin mismatches only reject under [`OriginPolicy::Enforce`]

use axum::http::{HeaderMap, HeaderValue, Method, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::http::headers::{
    self, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
};
use crate::rules::{Rule, WILDCARD};

/// How a request `Origin` outside the rule's origins is treated during preflight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginPolicy {
    /// Accept the preflight but omit `Access-Control-Allow-Origin`.
    #[default]
    Annotate,
    /// Reject the preflight with 403.
    Enforce,
}

impl OriginPolicy {
    pub fn from_enforce(enforce: bool) -> Self {
        if enforce {
            Self::Enforce
        } else {
            Self::Annotate
        }
    }
}

/// Outcome of a preflight check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preflight {
    Accepted(Allowance),
    Rejected(Rejection),
}

/// What an accepted preflight grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allowance {
    /// `Access-Control-Allow-Origin` value, if the request origin is allowed.
    pub origin: Option<HeaderValue>,
    /// The requested method, echoed back.
    pub method: Method,
    /// Requested headers in canonical casing; empty if none were requested.
    pub headers: Vec<String>,
}

/// Why a preflight was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No `Access-Control-Request-Method` header.
    MissingRequestMethod,
    MethodNotAllowed(String),
    HeaderNotAllowed(String),
    OriginNotAllowed(String),
}

impl Rejection {
    pub fn status(&self) -> StatusCode {
        match self {
            Rejection::MissingRequestMethod => StatusCode::BAD_REQUEST,
            Rejection::MethodNotAllowed(_)
            | Rejection::HeaderNotAllowed(_)
            | Rejection::OriginNotAllowed(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl Preflight {
    pub fn status(&self) -> StatusCode {
        match self {
            Preflight::Accepted(_) => StatusCode::OK,
            Preflight::Rejected(rejection) => rejection.status(),
        }
    }

    /// Build the response for this decision. Rejections carry no CORS headers.
    pub fn into_response<B: Default>(self) -> Response<B> {
        let mut response = Response::new(B::default());
        *response.status_mut() = self.status();

        if let Preflight::Accepted(allowance) = self {
            let map = response.headers_mut();
            if let Some(origin) = allowance.origin {
                map.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            }
            if let Ok(method) = HeaderValue::from_str(allowance.method.as_str()) {
                map.insert(ACCESS_CONTROL_ALLOW_METHODS, method);
            }
            if !allowance.headers.is_empty() {
                let joined = allowance.headers.join(headers::HEADER_LIST_SEPARATOR);
                if let Ok(value) = HeaderValue::from_str(&joined) {
                    map.insert(ACCESS_CONTROL_ALLOW_HEADERS, value);
                }
            }
        }

        response
    }
}

/// Decide a preflight request against `rule`.
pub fn evaluate(rule: &Rule, policy: OriginPolicy, request: &HeaderMap) -> Preflight {
    let requested_method = match request
        .get(ACCESS_CONTROL_REQUEST_METHOD)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
    {
        Some(m) if !m.is_empty() => m.to_ascii_uppercase(),
        _ => return Preflight::Rejected(Rejection::MissingRequestMethod),
    };

    let method = match Method::from_bytes(requested_method.as_bytes()) {
        Ok(m) if rule.allows_method(&m) => m,
        _ => return Preflight::Rejected(Rejection::MethodNotAllowed(requested_method)),
    };

    let Some(requested_headers) =
        headers::split_header_list(request.get_all(ACCESS_CONTROL_REQUEST_HEADERS))
    else {
        return Preflight::Rejected(Rejection::HeaderNotAllowed(String::from("<non-ascii>")));
    };
    if let Some(denied) = requested_headers.iter().find(|h| !rule.allows_header(h)) {
        return Preflight::Rejected(Rejection::HeaderNotAllowed(denied.clone()));
    }

    let origin = allow_origin(rule, request);
    if policy == OriginPolicy::Enforce && origin.is_none() {
        let requested = request
            .get(ORIGIN)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        return Preflight::Rejected(Rejection::OriginNotAllowed(requested));
    }

    Preflight::Accepted(Allowance {
        origin,
        method,
        headers: requested_headers
            .iter()
            .map(|h| headers::canonical_header_name(h))
            .collect(),
    })
}

/// `Access-Control-Allow-Origin` value for a request.
///
/// `*` whenever the rule allows any origin, even without an `Origin` header;
/// otherwise the request `Origin` if the rule lists it.
pub fn allow_origin(rule: &Rule, request: &HeaderMap) -> Option<HeaderValue> {
    if rule.allows_any_origin() {
        return Some(HeaderValue::from_static(WILDCARD));
    }
    let origin = request.get(ORIGIN)?;
    let allowed = rule.allowed_origin(origin.to_str().ok()?)?;
    if allowed == WILDCARD {
        Some(HeaderValue::from_static(WILDCARD))
    } else {
        Some(origin.clone())
    }
}

/// Evaluate, log and render a preflight in one step.
pub fn respond<B: Default>(rule: &Rule, policy: OriginPolicy, request: &HeaderMap) -> Response<B> {
    let decision = evaluate(rule, policy, request);
    match &decision {
        Preflight::Accepted(allowance) => {
            tracing::debug!(
                method = %allowance.method,
                headers = ?allowance.headers,
                origin = ?allowance.origin,
                "Preflight accepted"
            );
        }
        Preflight::Rejected(rejection) => {
            tracing::warn!(
                reason = ?rejection,
                status = %rejection.status(),
                "Preflight rejected"
            );
        }
    }
    decision.into_response()
}
