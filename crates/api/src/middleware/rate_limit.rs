//! Rate limiting middleware.
//!
//! All gated traffic shares one API secret, so the limiter is a single
//! process-wide bucket rather than a per-caller map.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovRateLimiter,
};
use serde_json::json;
use std::num::NonZeroU32;

use crate::app::AppState;

/// Process-wide rate limiter for gated routes.
pub struct RateLimiterState {
    limiter: GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    rate_limit_per_minute: u32,
}

impl RateLimiterState {
    /// Create a new rate limiter with the specified limit per minute.
    pub fn new(rate_limit_per_minute: u32) -> Self {
        let quota = Quota::per_minute(
            NonZeroU32::new(rate_limit_per_minute).unwrap_or(NonZeroU32::new(100).unwrap()),
        );
        Self {
            limiter: GovRateLimiter::direct(quota),
            rate_limit_per_minute,
        }
    }

    /// Check whether a request should be allowed.
    /// Returns Ok(()) if allowed, or Err with retry-after seconds.
    pub fn check(&self) -> Result<(), u64> {
        match self.limiter.check() {
            Ok(_) => Ok(()),
            Err(not_until) => {
                let wait_time = not_until.wait_time_from(governor::clock::Clock::now(
                    &governor::clock::DefaultClock::default(),
                ));
                Err(wait_time.as_secs().max(1))
            }
        }
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}

/// Middleware that applies rate limiting to gated routes.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(ref rate_limiter) = state.rate_limiter {
        if let Err(retry_after) = rate_limiter.check() {
            return rate_limited_response(state.config.security.rate_limit_per_minute, retry_after);
        }
    }

    next.run(req).await
}

/// Create a rate limited response with proper headers and body.
fn rate_limited_response(limit: u32, retry_after: u64) -> Response {
    let body = json!({
        "error": format!("Rate limit of {} requests/minute exceeded", limit),
    });

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();

    response.headers_mut().insert(
        header::RETRY_AFTER,
        retry_after.to_string().parse().unwrap(),
    );

    response
}
