//! Rate limiting implementation
//!
//! Uses the governor crate for token bucket rate limiting. The bucket holds
//! a single token by default, so requests are spaced evenly at the configured
//! rate with no burst.

use crate::config::DEFAULT_RATE_LIMIT;
use crate::context::CallContext;
use crate::error::Result;
use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for rate limiting
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Sustained requests per second; fractional rates are allowed
    pub requests_per_second: f64,
    /// Burst size (max tokens in bucket)
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            requests_per_second: DEFAULT_RATE_LIMIT,
            burst_size: 1,
        }
    }
}

impl RateLimiterConfig {
    /// Create a config with a bucket of one token
    pub fn new(requests_per_second: f64) -> Self {
        Self {
            requests_per_second,
            burst_size: 1,
        }
    }

    fn quota(&self) -> Quota {
        let qps = if self.requests_per_second.is_finite() && self.requests_per_second > 0.0 {
            self.requests_per_second
        } else {
            DEFAULT_RATE_LIMIT
        };
        let burst = NonZeroU32::new(self.burst_size).unwrap_or(NonZeroU32::MIN);

        // A zero period means the rate is too high to represent; don't limit.
        Quota::with_period(Duration::from_secs_f64(1.0 / qps))
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MAX))
            .allow_burst(burst)
    }
}

/// Token bucket rate limiter shared by every request of a client
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self {
            limiter: Arc::new(Governor::direct(config.quota())),
        }
    }

    /// Wait for a token, giving up when the context is cancelled or expires
    pub async fn wait(&self, ctx: &CallContext) -> Result<()> {
        ctx.run(async {
            self.limiter.until_ready().await;
            Ok(())
        })
        .await
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(&RateLimiterConfig::default())
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod rate_limit_tests {
    use super::*;
    use crate::error::Error;
    use std::time::Instant;

    #[test]
    fn test_rate_limiter_config_default() {
        let config = RateLimiterConfig::default();
        assert!((config.requests_per_second - DEFAULT_RATE_LIMIT).abs() < f64::EPSILON);
        assert_eq!(config.burst_size, 1);
    }

    #[test]
    fn test_single_token_bucket() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(1.0));
        assert!(limiter.limiter.check().is_ok());
        assert!(limiter.limiter.check().is_err());
    }

    #[test]
    fn test_burst() {
        let limiter = RateLimiter::new(&RateLimiterConfig {
            burst_size: 3,
            ..RateLimiterConfig::new(1.0)
        });
        for _ in 0..3 {
            assert!(limiter.limiter.check().is_ok());
        }
        assert!(limiter.limiter.check().is_err());
    }

    #[test]
    fn test_invalid_rate_falls_back() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(f64::NAN));
        assert!(limiter.limiter.check().is_ok());

        let limiter = RateLimiter::new(&RateLimiterConfig::new(f64::MAX));
        for _ in 0..100 {
            assert!(limiter.limiter.check().is_ok());
        }
    }

    #[tokio::test]
    async fn test_wait_spaces_requests() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(20.0));
        let ctx = CallContext::new();

        let started = Instant::now();
        for _ in 0..5 {
            tokio_test::assert_ok!(limiter.wait(&ctx).await);
        }
        // First token is free, the next four are 50ms apart.
        assert!(started.elapsed() >= Duration::from_millis(150));
    }

    #[tokio::test]
    async fn test_wait_shared_across_tasks() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(50.0));
        let started = Instant::now();

        let handles = (0..10).map(|_| {
            let limiter = limiter.clone();
            tokio::spawn(async move { limiter.wait(&CallContext::new()).await })
        });
        for result in futures::future::join_all(handles).await {
            result.unwrap().unwrap();
        }

        assert!(started.elapsed() >= Duration::from_millis(140));
    }

    #[tokio::test]
    async fn test_wait_honours_deadline() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(0.1));
        limiter.wait(&CallContext::new()).await.unwrap();

        let ctx = CallContext::new().with_timeout(Duration::from_millis(30));
        let started = Instant::now();
        let result = limiter.wait(&ctx).await;
        assert!(matches!(result, Err(Error::DeadlineExceeded)));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_wait_refuses_cancelled_context() {
        let limiter = RateLimiter::default();
        let ctx = CallContext::new();
        ctx.cancel();
        assert!(matches!(limiter.wait(&ctx).await, Err(Error::Cancelled)));
    }
}
