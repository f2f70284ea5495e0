//! Cross-cutting request middleware.

pub mod rate_limit;

pub use rate_limit::{rate_limit, rate_limiter, SharedRateLimiter};
