//! Global token-bucket rate limiting.
//!
//! A single limiter is shared by every route. Requests over the limit are
//! rejected immediately with 429; nothing is queued.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use core_config::rate_limit::RateLimitConfig;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::sync::Arc;

use crate::errors::{messages, AppError};

pub type SharedRateLimiter = Arc<DefaultDirectRateLimiter>;

/// Build the process-wide limiter from configuration.
pub fn rate_limiter(config: &RateLimitConfig) -> SharedRateLimiter {
    let quota = Quota::per_second(config.requests_per_second).allow_burst(config.burst);
    Arc::new(RateLimiter::direct(quota))
}

/// Middleware body for `axum::middleware::from_fn_with_state`.
///
/// # Example
/// ```ignore
/// let limiter = rate_limiter(&RateLimitConfig::default());
/// let app = router.layer(axum::middleware::from_fn_with_state(limiter, rate_limit));
/// ```
pub async fn rate_limit(
    State(limiter): State<SharedRateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    if limiter.check().is_err() {
        return AppError::TooManyRequests(messages::TOO_MANY_REQUESTS.to_string())
            .into_response();
    }

    next.run(request).await
}
