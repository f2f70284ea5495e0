use crate::{env_parse, ConfigError, FromEnv};
use std::num::NonZeroU32;

/// Token-bucket settings shared by every route.
///
/// Zero values are rejected at parse time because a bucket that never
/// refills would reject all traffic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub requests_per_second: NonZeroU32,
    pub burst: NonZeroU32,
}

impl RateLimitConfig {
    pub fn new(requests_per_second: NonZeroU32, burst: NonZeroU32) -> Self {
        Self {
            requests_per_second,
            burst,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: NonZeroU32::MIN,
            burst: NonZeroU32::new(5).unwrap_or(NonZeroU32::MIN),
        }
    }
}

impl FromEnv for RateLimitConfig {
    /// - RATE_LIMIT_RPS: defaults to 1
    /// - RATE_LIMIT_BURST: defaults to 5
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            requests_per_second: env_parse("RATE_LIMIT_RPS", "1")?,
            burst: env_parse("RATE_LIMIT_BURST", "5")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_defaults() {
        temp_env::with_vars(
            [("RATE_LIMIT_RPS", None::<&str>), ("RATE_LIMIT_BURST", None::<&str>)],
            || {
                let config = RateLimitConfig::from_env().unwrap();
                assert_eq!(config, RateLimitConfig::default());
                assert_eq!(config.requests_per_second.get(), 1);
                assert_eq!(config.burst.get(), 5);
            },
        );
    }

    #[test]
    fn test_rate_limit_custom_values() {
        temp_env::with_vars(
            [("RATE_LIMIT_RPS", Some("20")), ("RATE_LIMIT_BURST", Some("40"))],
            || {
                let config = RateLimitConfig::from_env().unwrap();
                assert_eq!(config.requests_per_second.get(), 20);
                assert_eq!(config.burst.get(), 40);
            },
        );
    }

    #[test]
    fn test_rate_limit_rejects_zero() {
        temp_env::with_vars(
            [("RATE_LIMIT_RPS", Some("0")), ("RATE_LIMIT_BURST", None::<&str>)],
            || {
                let err = RateLimitConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("RATE_LIMIT_RPS"));
            },
        );
    }
}
