//! Rate limiting implementation
//!
//! Uses the governor crate. Calls are spaced evenly at `60 / N` seconds
//! with a burst of one, so no 60 second window ever admits more than
//! `requests_per_minute` calls.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default number of calls admitted per minute
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 500;

/// Configuration for rate limiting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Maximum number of requests in any 60 second window
    pub requests_per_minute: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
        }
    }
}

impl RateLimiterConfig {
    /// Create a new rate limiter config
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute,
        }
    }
}

/// Sliding-window rate limiter shared by clones
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
    config: RateLimiterConfig,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self {
            limiter: Arc::new(Governor::direct(quota(config))),
            config: *config,
        }
    }

    /// The configuration this limiter was built from
    pub fn config(&self) -> RateLimiterConfig {
        self.config
    }

    /// Wait until a request can be made
    pub async fn wait(&self) {
        if self.limiter.check().is_ok() {
            return;
        }
        debug!(
            "Rate limit of {}/min reached, waiting for capacity",
            self.config.requests_per_minute
        );
        self.limiter.until_ready().await;
    }

    /// Try to acquire a permit, returning immediately
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }

    /// Wait with a timeout
    pub async fn wait_with_timeout(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, self.wait()).await.is_ok()
    }
}

/// GCRA quota for a config; a zero rate is clamped to one call per minute
fn quota(config: &RateLimiterConfig) -> Quota {
    let per_minute = NonZeroU32::new(config.requests_per_minute).unwrap_or(NonZeroU32::MIN);
    // A burst above one would let 2N - 1 calls through a single window
    Quota::per_minute(per_minute)
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(&RateLimiterConfig::default())
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("requests_per_minute", &self.config.requests_per_minute)
            .finish()
    }
}
