//! Pacing between consecutive page fetches
//!
//! Multi-page traversals call [`Pacer::pause`] between two fetches, never
//! before the first one or after the last one.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cryptomkt_types::RateLimitCategory;
use tracing::debug;

use crate::rate_limiter::SharedRateLimiter;

/// Interval used by [`FixedInterval::reference`]
pub const REFERENCE_INTERVAL: Duration = Duration::from_secs(2);

/// Waits between two page fetches
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Return once the next fetch may go out
    async fn pause(&self);
}

#[async_trait]
impl<P: Pacer + ?Sized> Pacer for Arc<P> {
    async fn pause(&self) {
        (**self).pause().await
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pause(&self) {}
}

/// Sleeps a fixed interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInterval {
    interval: Duration,
}

impl FixedInterval {
    /// Sleep `interval` between fetches
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Two seconds between fetches
    pub fn reference() -> Self {
        Self::new(REFERENCE_INTERVAL)
    }

    /// Configured interval
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[async_trait]
impl Pacer for FixedInterval {
    async fn pause(&self) {
        debug!("Pausing {:?} before next page", self.interval);
        tokio::time::sleep(self.interval).await;
    }
}

/// Draws from a shared rate limiter bucket
///
/// Walks sharing one limiter are paced together.
#[derive(Debug, Clone)]
pub struct TokenBucketPacer {
    limiter: SharedRateLimiter,
    category: RateLimitCategory,
}

impl TokenBucketPacer {
    /// Pace against `category` of `limiter`
    pub fn new(limiter: SharedRateLimiter, category: RateLimitCategory) -> Self {
        Self { limiter, category }
    }

    /// Pace against the book-walk bucket of `limiter`
    pub fn book_walk(limiter: SharedRateLimiter) -> Self {
        Self::new(limiter, RateLimitCategory::BookWalk)
    }
}

#[async_trait]
impl Pacer for TokenBucketPacer {
    async fn pause(&self) {
        self.limiter.acquire(self.category).await;
    }
}
