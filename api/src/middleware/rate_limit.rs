//! Admission control middleware
//!
//! Every inbound request passes through the per-client token-bucket gate
//! before any handler runs. A denied request is answered immediately with
//! a fixed 429 body; the handler is never invoked. Denial is control flow,
//! not an error, so the decision path never fails a request for any other
//! reason.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpResponse,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use serde_json::json;
use std::{rc::Rc, sync::Arc};
use tracing::debug;

use vr_core::services::rate_limit::RateLimiter;

/// Fixed response body for denied requests
const DENIED_MESSAGE: &str = "Too many requests. Please try again later.";

/// Admission control middleware factory
pub struct RateLimit {
    limiter: Arc<RateLimiter>,
}

impl RateLimit {
    /// Create the middleware over a shared limiter
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        }))
    }
}

/// Admission control middleware service
pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limiter: Arc<RateLimiter>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let key = client_key(&req);

        if !self.limiter.allow(&key) {
            debug!(key = %key, "Request denied by admission control");
            let response = HttpResponse::TooManyRequests().json(json!({
                "error": "rate_limit_exceeded",
                "message": DENIED_MESSAGE,
            }));
            let (request, _) = req.into_parts();
            let response = ServiceResponse::new(request, response).map_into_right_body();
            return Box::pin(ready(Ok(response)));
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
    }
}

/// Derive the admission key from the caller's network address
///
/// Clients behind shared network address translation share a key, and
/// therefore a bucket.
fn client_key(req: &ServiceRequest) -> String {
    // X-Forwarded-For carries the original client for reverse proxy setups
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            if let Some(ip) = forwarded_str.split(',').next() {
                let ip = ip.trim();
                if !ip.is_empty() {
                    return ip.to_string();
                }
            }
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(ip_str) = real_ip.to_str() {
            return ip_str.to_string();
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}
