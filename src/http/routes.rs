//! OPTIONS-only preflight routes for a known set of paths.
//!
//! # Responsibilities
//! - Resolve each externally known path to a rule (wildcard fallback applies)
//! - Install an OPTIONS handler answering preflights from that rule
//! - Leave 404 / 405 handling to axum
//!
//! # Design Decisions
//! - Paths without a rule get no handler at all
//! - Duplicate paths are installed once
//! - Path syntax is checked up front; axum panics on malformed paths
//!   and on captures that name the same position differently

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::body::Body;
use axum::http::HeaderMap;
use axum::routing::options;
use axum::Router;
use thiserror::Error;

use crate::http::preflight::{self, OriginPolicy};
use crate::rules::{RuleError, RuleSet};

/// Errors that can occur while installing preflight routes.
#[derive(Debug, Error)]
pub enum RoutesError {
    /// No paths were given.
    #[error("invalid paths list: cannot be empty")]
    EmptyPaths,

    /// A path the router cannot register.
    #[error("invalid path {0:?}: must start with '/' and use {{name}} captures")]
    InvalidPath(String),

    /// Two paths put differently named captures at the same position.
    #[error("path {path:?} conflicts with {existing:?}: captures at the same position must share a name")]
    Conflict { path: String, existing: String },

    /// The rule text failed to parse.
    #[error(transparent)]
    Rules(#[from] RuleError),
}

/// Install OPTIONS-only preflight handlers for `paths`.
pub fn preflight_routes<P: AsRef<str>>(paths: &[P], rules: &RuleSet) -> Result<Router, RoutesError> {
    preflight_routes_with_policy(paths, rules, OriginPolicy::default())
}

/// Parse `config` and install OPTIONS-only preflight handlers for `paths`.
pub fn preflight_routes_from_config<P: AsRef<str>>(
    paths: &[P],
    config: &str,
) -> Result<Router, RoutesError> {
    if paths.is_empty() {
        return Err(RoutesError::EmptyPaths);
    }
    let rules = RuleSet::parse(config)?;
    preflight_routes(paths, &rules)
}

/// Like [`preflight_routes`], with an explicit origin policy.
pub fn preflight_routes_with_policy<P: AsRef<str>>(
    paths: &[P],
    rules: &RuleSet,
    policy: OriginPolicy,
) -> Result<Router, RoutesError> {
    if paths.is_empty() {
        return Err(RoutesError::EmptyPaths);
    }

    let mut router = Router::new();
    let mut seen = HashSet::new();
    let mut captures = CaptureIndex::default();

    for path in paths {
        let path = path.as_ref();
        if !is_valid_path(path) {
            return Err(RoutesError::InvalidPath(path.to_string()));
        }
        if !seen.insert(path) {
            continue;
        }
        captures.insert(path)?;

        let Some(rule) = rules.rule_for(path) else {
            tracing::debug!(path = %path, "No CORS rule for path, leaving unrouted");
            continue;
        };

        tracing::debug!(path = %path, "Installing preflight route");
        let rule = Arc::new(rule.clone());
        router = router.route(
            path,
            options(move |headers: HeaderMap| async move {
                preflight::respond::<Body>(&rule, policy, &headers)
            }),
        );
    }

    Ok(router)
}

/// True if `path` can be registered as a route.
///
/// Paths start with `/`. A segment is either static text without `{`, `}`,
/// a leading `:` or a leading `*`, or a whole-segment `{name}` capture.
/// Capture names are unique within a path.
pub fn is_valid_path(path: &str) -> bool {
    if !path.starts_with('/') {
        return false;
    }
    let mut names = HashSet::new();
    path.split('/').all(|segment| match capture_name(segment) {
        Some(name) => is_capture_name(name) && names.insert(name),
        None => {
            !segment.starts_with(':')
                && !segment.starts_with('*')
                && !segment.contains(['{', '}'])
        }
    })
}

fn capture_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

fn is_capture_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('*') && !name.contains(['{', '}'])
}

/// Capture names seen so far, keyed by the route prefix leading up to them.
#[derive(Default)]
struct CaptureIndex<'a> {
    names: HashMap<String, (&'a str, &'a str)>,
}

impl<'a> CaptureIndex<'a> {
    fn insert(&mut self, path: &'a str) -> Result<(), RoutesError> {
        let mut prefix = String::new();
        for segment in path.split('/').skip(1) {
            prefix.push('/');
            let Some(name) = capture_name(segment) else {
                prefix.push_str(segment);
                continue;
            };
            prefix.push_str("{}");
            let (existing_name, existing) = *self.names.entry(prefix.clone()).or_insert((name, path));
            if existing_name != name {
                return Err(RoutesError::Conflict {
                    path: path.to_string(),
                    existing: existing.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    fn preflight(path: &str, method: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri(path)
            .header("Origin", "https://foo.bar.org")
            .header("Access-Control-Request-Method", method)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_empty_paths() {
        let rules = RuleSet::parse("*;*;;*").unwrap();
        let empty: [&str; 0] = [];
        assert!(matches!(preflight_routes(&empty, &rules), Err(RoutesError::EmptyPaths)));
        assert_eq!(
            preflight_routes_from_config(&empty, "*;*;;*").unwrap_err().to_string(),
            "invalid paths list: cannot be empty"
        );
    }

    #[test]
    fn test_rule_errors_surface() {
        let err = preflight_routes_from_config(&["/a"], "").unwrap_err();
        assert!(matches!(err, RoutesError::Rules(RuleError::EmptyConfig)));
        assert_eq!(err.to_string(), "invalid cors rules: cannot be empty");
    }

    #[test]
    fn test_invalid_paths() {
        let rules = RuleSet::parse("*;*;;*").unwrap();
        for path in [
            "a",
            "*",
            "/users/:id",
            "/files/*rest",
            "/a/{",
            "/a/}",
            "/a/{}",
            "/a/x{id}",
            "/files/{*rest}",
            "/{id}/{id}",
        ] {
            assert!(
                matches!(preflight_routes(&[path], &rules), Err(RoutesError::InvalidPath(_))),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn test_conflicting_captures() {
        let rules = RuleSet::parse("*;*;;*").unwrap();
        let err = preflight_routes(&["/users/{id}", "/users/{name}"], &rules).unwrap_err();
        assert!(matches!(
            &err,
            RoutesError::Conflict { path, existing } if path == "/users/{name}" && existing == "/users/{id}"
        ));

        let err = preflight_routes(&["/users/{id}", "/users/{name}/posts"], &rules).unwrap_err();
        assert!(matches!(err, RoutesError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_compatible_captures() {
        let rules = RuleSet::parse("*;*;;*").unwrap();
        let router =
            preflight_routes(&["/users/{id}", "/users/{id}/posts", "/users/me", "/teams/{name}"], &rules)
                .unwrap();
        let res = router.clone().oneshot(preflight("/users/7/posts", "GET")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let res = router.oneshot(preflight("/teams/core", "GET")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_path_without_rule_is_not_routed() {
        let rules = RuleSet::parse("/a;*;;*").unwrap();
        let router = preflight_routes(&["/a", "/b"], &rules).unwrap();

        let res = router.clone().oneshot(preflight("/a", "GET")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = router.oneshot(preflight("/b", "GET")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_duplicate_paths_install_once() {
        let rules = RuleSet::parse("*;*;;*").unwrap();
        let router = preflight_routes(&["/a", "/a"], &rules).unwrap();
        let res = router.oneshot(preflight("/a", "PUT")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_captures_are_supported() {
        let rules = RuleSet::parse("*;*;;*").unwrap();
        let router = preflight_routes(&["/users/{id}"], &rules).unwrap();
        let res = router.oneshot(preflight("/users/42", "DELETE")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["access-control-allow-methods"], "DELETE");
    }
}
