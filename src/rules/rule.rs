//! A single CORS rule and its builder.

use axum::http::Method;
use serde::{Serialize, Serializer};

use crate::rules::method;
use crate::rules::WILDCARD;

/// Allowed origins, headers and methods for one path.
///
/// An empty list means the field is absent. Absent headers or methods allow
/// nothing; absent origins allow any origin, the same as `*`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rule {
    origins: Vec<String>,
    headers: Vec<String>,
    #[serde(serialize_with = "serialize_methods")]
    methods: Vec<Method>,
}

impl Rule {
    pub(crate) fn new(origins: Vec<String>, headers: Vec<String>, methods: Vec<Method>) -> Self {
        Self {
            origins,
            headers,
            methods,
        }
    }

    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// True if the rule lists the `*` origin or has no origin list at all.
    pub fn allows_any_origin(&self) -> bool {
        self.origins.is_empty() || self.origins.iter().any(|o| o == WILDCARD)
    }

    /// Value to send as `Access-Control-Allow-Origin` for a request origin.
    ///
    /// `*` when the rule allows any origin, otherwise the rule's own entry
    /// equal to `origin`, otherwise `None`.
    pub fn allowed_origin(&self, origin: &str) -> Option<&str> {
        if self.allows_any_origin() {
            return Some(WILDCARD);
        }
        self.origins
            .iter()
            .find(|o| o.as_str() == origin)
            .map(String::as_str)
    }

    pub fn allows_method(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }

    /// Header names compare case-insensitively.
    pub fn allows_header(&self, header: &str) -> bool {
        self.headers.iter().any(|h| h.eq_ignore_ascii_case(header))
    }

    /// Start a builder pre-populated with this rule's fields.
    pub fn to_builder(&self) -> RuleBuilder {
        RuleBuilder {
            origins: self.origins.clone(),
            headers: self.headers.clone(),
            methods: self.methods.clone(),
        }
    }
}

fn serialize_methods<S: Serializer>(methods: &[Method], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(methods.iter().map(Method::as_str))
}

/// Fluent construction of a [`Rule`] without going through rule text.
///
/// Setters are independent: calling them in any order yields the same rule,
/// and an empty input leaves the field as it was.
#[derive(Debug, Clone, Default)]
pub struct RuleBuilder {
    origins: Vec<String>,
    headers: Vec<String>,
    methods: Vec<Method>,
}

impl RuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origins<I, T>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let origins: Vec<String> = origins.into_iter().map(Into::into).collect();
        if !origins.is_empty() {
            self.origins = origins;
        }
        self
    }

    pub fn with_headers<I, T>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if !headers.is_empty() {
            self.headers = headers;
        }
        self
    }

    /// Tokens outside the method vocabulary are dropped; `*` expands to the
    /// default-allowed set.
    pub fn with_methods<I, T>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut parsed: Vec<Method> = Vec::new();
        for token in methods {
            let token = token.as_ref();
            if token.trim() == WILDCARD {
                parsed.extend(method::default_allowed());
            } else if let Some(m) = method::parse_method(token) {
                parsed.push(m);
            }
        }
        if !parsed.is_empty() {
            self.methods = parsed;
        }
        self
    }

    pub fn build(self) -> Rule {
        Rule::new(self.origins, self.headers, self.methods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_default_build() {
        let rule = RuleBuilder::new().build();
        assert!(rule.origins().is_empty());
        assert!(rule.headers().is_empty());
        assert!(rule.methods().is_empty());
    }

    #[test]
    fn test_fully_custom_build() {
        let rule = RuleBuilder::new()
            .with_origins(["a", "b"])
            .with_headers(["content-type"])
            .with_methods(["DELETE", "PATCH"])
            .build();
        assert_eq!(rule.origins(), ["a", "b"]);
        assert_eq!(rule.headers(), ["content-type"]);
        assert_eq!(rule.methods(), [Method::DELETE, Method::PATCH]);
    }

    #[test]
    fn test_setter_order_is_irrelevant() {
        let a = RuleBuilder::new()
            .with_methods(["put"])
            .with_origins(["x.org"])
            .with_headers(["accept"])
            .build();
        let b = RuleBuilder::new()
            .with_headers(["accept"])
            .with_origins(["x.org"])
            .with_methods(["PUT"])
            .build();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_setters_keep_previous_value() {
        let rule = RuleBuilder::new()
            .with_origins(["a"])
            .with_origins(NONE)
            .with_methods(["GET"])
            .with_methods(NONE)
            .build();
        assert_eq!(rule.origins(), ["a"]);
        assert_eq!(rule.methods(), [Method::GET]);
    }

    #[test]
    fn test_invalid_methods_are_dropped() {
        let rule = RuleBuilder::new().with_methods(["FETCH", "get", "*x"]).build();
        assert_eq!(rule.methods(), [Method::GET]);

        let rule = RuleBuilder::new().with_methods(["FETCH", "BREW"]).build();
        assert!(rule.methods().is_empty());
    }

    #[test]
    fn test_wildcard_methods_expand() {
        let rule = RuleBuilder::new().with_methods(["*"]).build();
        assert_eq!(rule.methods(), method::DEFAULT_ALLOWED);
        assert!(!rule.allows_method(&Method::OPTIONS));
    }

    #[test]
    fn test_allowed_origin() {
        let rule = RuleBuilder::new().with_origins(["https://foo.bar.org"]).build();
        assert_eq!(rule.allowed_origin("https://foo.bar.org"), Some("https://foo.bar.org"));
        assert_eq!(rule.allowed_origin("https://evil.org"), None);

        let any = RuleBuilder::new().with_origins(["*"]).build();
        assert_eq!(any.allowed_origin("https://evil.org"), Some("*"));

        assert_eq!(Rule::default().allowed_origin("https://foo.bar.org"), Some("*"));
    }

    #[test]
    fn test_absent_origins_allow_any_origin() {
        let rule = RuleBuilder::new().with_methods(["GET"]).build();
        assert!(rule.origins().is_empty());
        assert!(rule.allows_any_origin());
        assert_eq!(rule.allowed_origin("https://bar.foo.org"), Some("*"));

        let listed = RuleBuilder::new().with_origins(["bar.com"]).build();
        assert!(!listed.allows_any_origin());
    }

    #[test]
    fn test_allows_header_ignores_case() {
        let rule = RuleBuilder::new().with_headers(["Content-Type"]).build();
        assert!(rule.allows_header("content-type"));
        assert!(rule.allows_header("CONTENT-TYPE"));
        assert!(!rule.allows_header("x-correlation-id"));
    }

    #[test]
    fn test_to_builder_round_trips() {
        let rule = RuleBuilder::new()
            .with_origins(["a"])
            .with_methods(["PUT"])
            .build();
        let refined = rule.to_builder().with_headers(["accept"]).build();
        assert_eq!(refined.origins(), rule.origins());
        assert_eq!(refined.methods(), rule.methods());
        assert_eq!(refined.headers(), ["accept"]);
    }
}
