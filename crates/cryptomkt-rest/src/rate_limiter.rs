//! Thread-safe rate limiter for CryptoMarket requests
//!
//! One token bucket per [`RateLimitCategory`]. The HTTP executor draws from
//! the public or private bucket on every request; the liquidity walker can
//! draw from the book-walk bucket between page fetches.

use std::collections::HashMap;
use std::sync::Arc;

use cryptomkt_types::{RateLimitCategory, RateLimitConfig, RateLimitResult, TokenBucketConfig};
use parking_lot::Mutex;
use tracing::instrument;

use crate::endpoint::{Access, Endpoint};

/// Thread-safe rate limiter for managing API rate limits
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    buckets: HashMap<RateLimitCategory, Mutex<cryptomkt_types::TokenBucket>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::cryptomkt_defaults())
    }
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration
    pub fn new(config: RateLimitConfig) -> Self {
        let buckets = [
            RateLimitCategory::RestPublic,
            RateLimitCategory::RestPrivate,
            RateLimitCategory::BookWalk,
        ]
        .into_iter()
        .map(|category| (category, Mutex::new(category.get_config(&config).create_bucket())))
        .collect();

        Self { config, buckets }
    }

    /// Create a permissive rate limiter (for testing)
    pub fn permissive() -> Self {
        Self::new(RateLimitConfig::permissive())
    }

    /// Category a request to `endpoint` is charged to
    pub fn category_for(endpoint: Endpoint) -> RateLimitCategory {
        match endpoint.access() {
            Access::Public => RateLimitCategory::RestPublic,
            Access::Private => RateLimitCategory::RestPrivate,
        }
    }

    /// Try to acquire one token for the given category
    pub fn try_acquire(&self, category: RateLimitCategory) -> RateLimitResult {
        match self.buckets.get(&category) {
            Some(bucket) => match bucket.lock().try_acquire(1) {
                Ok(()) => RateLimitResult::Allowed,
                Err(wait) => RateLimitResult::Limited { wait, category },
            },
            None => RateLimitResult::Allowed,
        }
    }

    /// Check if a request would be allowed without consuming a token
    pub fn check(&self, category: RateLimitCategory) -> bool {
        self.buckets
            .get(&category)
            .map_or(true, |bucket| bucket.lock().check_available(1))
    }

    /// Get available tokens for a category
    pub fn available(&self, category: RateLimitCategory) -> u32 {
        self.buckets
            .get(&category)
            .map_or(u32::MAX, |bucket| bucket.lock().available())
    }

    /// Wait until a token is available, then take it
    #[instrument(skip(self), level = "debug")]
    pub async fn acquire(&self, category: RateLimitCategory) {
        loop {
            match self.try_acquire(category) {
                RateLimitResult::Allowed => return,
                RateLimitResult::Limited { wait, .. } => {
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }

    /// Reset a specific category
    pub fn reset(&self, category: RateLimitCategory) {
        if let Some(bucket) = self.buckets.get(&category) {
            bucket.lock().reset();
        }
    }

    /// Get the configuration for a category
    pub fn get_config(&self, category: RateLimitCategory) -> TokenBucketConfig {
        category.get_config(&self.config)
    }
}

/// Shared rate limiter that can be cloned and used across tasks
pub type SharedRateLimiter = Arc<RateLimiter>;
