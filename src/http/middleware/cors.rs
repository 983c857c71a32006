//! CORS enforcement for a single rule.
//!
//! Wraps any `tower::Service` (an axum handler, `MethodRouter` or whole
//! `Router`) so that preflight requests are answered from the rule and
//! actual requests carry `Access-Control-Allow-Origin` when their origin is
//! allowed.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::{Method, Request, Response};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::http::headers::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
use crate::http::preflight::{self, OriginPolicy};
use crate::rules::Rule;

/// Layer that applies [`Cors`] with one rule.
#[derive(Debug, Clone)]
pub struct CorsLayer {
    rule: Arc<Rule>,
    policy: OriginPolicy,
}

impl CorsLayer {
    pub fn new(rule: Rule) -> Self {
        Self {
            rule: Arc::new(rule),
            policy: OriginPolicy::default(),
        }
    }

    /// Set how preflights from unlisted origins are treated.
    pub fn origin_policy(mut self, policy: OriginPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }
}

impl<S> Layer<S> for CorsLayer {
    type Service = Cors<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Cors {
            inner,
            rule: Arc::clone(&self.rule),
            policy: self.policy,
        }
    }
}

/// Wrap `inner` with CORS enforcement for `rule`.
pub fn wrap<S>(rule: Rule, inner: S) -> Cors<S> {
    CorsLayer::new(rule).layer(inner)
}

/// Service produced by [`CorsLayer`].
#[derive(Debug, Clone)]
pub struct Cors<S> {
    inner: S,
    rule: Arc<Rule>,
    policy: OriginPolicy,
}

impl<S> Cors<S> {
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for Cors<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    ResBody: Default + Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        if req.method() == Method::OPTIONS {
            let response = preflight::respond(&self.rule, self.policy, req.headers());
            return Box::pin(async move { Ok::<_, S::Error>(response) });
        }

        let allow_origin = req
            .headers()
            .contains_key(ORIGIN)
            .then(|| preflight::allow_origin(&self.rule, req.headers()))
            .flatten();
        let future = self.inner.call(req);

        Box::pin(async move {
            let mut response = future.await?;
            if let Some(origin) = allow_origin {
                tracing::trace!(origin = ?origin, "Annotating response with allowed origin");
                response
                    .headers_mut()
                    .insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            }
            Ok::<_, S::Error>(response)
        })
    }
}
