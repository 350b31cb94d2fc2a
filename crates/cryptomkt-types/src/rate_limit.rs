//! Client-side rate limiting for the CryptoMarket API
//!
//! Token buckets keep request bursts under the exchange's limits. Separate
//! budgets exist for public endpoints, private endpoints and orderbook walks.

use std::time::{Duration, Instant};

/// Token bucket rate limiter
///
/// Tokens are consumed per request and refill continuously at `refill_rate`
/// tokens per second, up to `capacity`.
#[derive(Debug)]
pub struct TokenBucket {
    capacity: u32,
    tokens: f64,
    refill_rate: f64,
    last_refill: Instant,
}

impl TokenBucket {
    /// Create a full bucket
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of tokens the bucket can hold
    /// * `refill_rate` - Number of tokens added per second
    pub fn new(capacity: u32, refill_rate: f64) -> Self {
        Self {
            capacity,
            tokens: capacity as f64,
            refill_rate,
            last_refill: Instant::now(),
        }
    }

    /// Try to take `tokens` from the bucket
    ///
    /// Returns `Err(wait)` with the time until enough tokens will be there.
    pub fn try_acquire(&mut self, tokens: u32) -> Result<(), Duration> {
        self.refill();

        let wanted = tokens as f64;
        if self.tokens >= wanted {
            self.tokens -= wanted;
            return Ok(());
        }

        if self.refill_rate <= 0.0 {
            return Err(Duration::MAX);
        }
        let missing = wanted - self.tokens;
        Err(Duration::try_from_secs_f64(missing / self.refill_rate).unwrap_or(Duration::MAX))
    }

    /// Check if tokens are available without consuming them
    pub fn check_available(&mut self, tokens: u32) -> bool {
        self.refill();
        self.tokens >= tokens as f64
    }

    /// Get current available tokens
    pub fn available(&mut self) -> u32 {
        self.refill();
        self.tokens.floor() as u32
    }

    /// Get the capacity of this bucket
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Get the refill rate (tokens per second)
    pub fn refill_rate(&self) -> f64 {
        self.refill_rate
    }

    /// Reset the bucket to full capacity
    pub fn reset(&mut self) {
        self.tokens = self.capacity as f64;
        self.last_refill = Instant::now();
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.refill_rate).min(self.capacity as f64);
        self.last_refill = now;
    }
}

/// Configuration for a single token bucket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenBucketConfig {
    /// Maximum tokens
    pub capacity: u32,
    /// Tokens per second refill rate
    pub refill_rate: f64,
}

impl TokenBucketConfig {
    /// Create a new token bucket configuration
    pub const fn new(capacity: u32, refill_rate: f64) -> Self {
        Self {
            capacity,
            refill_rate,
        }
    }

    /// Bucket that lets one request through every `interval`
    pub fn every(interval: Duration) -> Self {
        let secs = interval.as_secs_f64();
        let rate = if secs > 0.0 { 1.0 / secs } else { f64::MAX };
        Self::new(1, rate)
    }

    /// Create a token bucket from this configuration
    pub fn create_bucket(&self) -> TokenBucket {
        TokenBucket::new(self.capacity, self.refill_rate)
    }
}

/// Rate limit configuration per endpoint category
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    /// Public market data endpoints
    pub rest_public: TokenBucketConfig,
    /// Authenticated endpoints
    pub rest_private: TokenBucketConfig,
    /// Successive orderbook page fetches during a liquidity walk
    pub book_walk: TokenBucketConfig,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::cryptomkt_defaults()
    }
}

impl RateLimitConfig {
    /// Conservative limits for the public v1 API
    pub fn cryptomkt_defaults() -> Self {
        Self {
            rest_public: TokenBucketConfig::new(10, 1.0),
            rest_private: TokenBucketConfig::new(10, 0.5),
            // one book page every two seconds
            book_walk: TokenBucketConfig::new(1, 0.5),
        }
    }

    /// Create a very permissive configuration (for testing)
    pub fn permissive() -> Self {
        Self {
            rest_public: TokenBucketConfig::new(1000, 1000.0),
            rest_private: TokenBucketConfig::new(1000, 1000.0),
            book_walk: TokenBucketConfig::new(1000, 1000.0),
        }
    }
}

/// Rate limiter category for different endpoint types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitCategory {
    /// Public REST endpoints
    RestPublic,
    /// Private REST endpoints (authenticated)
    RestPrivate,
    /// Orderbook walk pacing
    BookWalk,
}

impl RateLimitCategory {
    /// Get the configuration for this category
    pub fn get_config(self, config: &RateLimitConfig) -> TokenBucketConfig {
        match self {
            Self::RestPublic => config.rest_public,
            Self::RestPrivate => config.rest_private,
            Self::BookWalk => config.book_walk,
        }
    }
}

/// Result of a rate limit check
#[derive(Debug, Clone, PartialEq)]
pub enum RateLimitResult {
    /// Request is allowed
    Allowed,
    /// Request is rate limited, wait the specified duration
    Limited {
        wait: Duration,
        category: RateLimitCategory,
    },
}

impl RateLimitResult {
    /// Check if the request is allowed
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Get the wait duration if rate limited
    pub fn wait_duration(&self) -> Option<Duration> {
        match self {
            Self::Allowed => None,
            Self::Limited { wait, .. } => Some(*wait),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_drains_then_limits() {
        let mut bucket = TokenBucket::new(3, 1.0);

        assert!(bucket.try_acquire(2).is_ok());
        assert!(bucket.try_acquire(1).is_ok());

        let wait = bucket.try_acquire(1).unwrap_err();
        assert!(wait > Duration::ZERO);
        assert!(wait <= Duration::from_secs(1));
    }

    #[test]
    fn test_bucket_refills_over_time() {
        let mut bucket = TokenBucket::new(5, 200.0);
        assert!(bucket.try_acquire(5).is_ok());
        assert_eq!(bucket.available(), 0);

        std::thread::sleep(Duration::from_millis(20));
        assert!(bucket.available() >= 1);
    }

    #[test]
    fn test_bucket_never_exceeds_capacity() {
        let mut bucket = TokenBucket::new(2, 1000.0);
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(bucket.available(), 2);
        assert!(!bucket.check_available(3));
    }

    #[test]
    fn test_bucket_reset() {
        let mut bucket = TokenBucket::new(4, 0.1);
        bucket.try_acquire(4).unwrap();
        bucket.reset();
        assert_eq!(bucket.available(), 4);
    }

    #[test]
    fn test_zero_refill_rate_waits_forever() {
        let mut bucket = TokenBucket::new(1, 0.0);
        bucket.try_acquire(1).unwrap();
        assert_eq!(bucket.try_acquire(1), Err(Duration::MAX));
    }

    #[test]
    fn test_tiny_refill_rate_saturates_wait() {
        let mut bucket = TokenBucket::new(1, 1e-300);
        bucket.try_acquire(1).unwrap();
        assert_eq!(bucket.try_acquire(1), Err(Duration::MAX));
    }

    #[test]
    fn test_every_interval() {
        let config = TokenBucketConfig::every(Duration::from_secs(2));
        assert_eq!(config.capacity, 1);
        assert!((config.refill_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_defaults_pace_book_walk() {
        let config = RateLimitConfig::cryptomkt_defaults();
        let walk = RateLimitCategory::BookWalk.get_config(&config);
        assert_eq!(walk, TokenBucketConfig::every(Duration::from_secs(2)));
        assert_eq!(RateLimitCategory::RestPublic.get_config(&config).capacity, 10);
    }

    #[test]
    fn test_rate_limit_result() {
        assert!(RateLimitResult::Allowed.is_allowed());

        let limited = RateLimitResult::Limited {
            wait: Duration::from_millis(250),
            category: RateLimitCategory::RestPrivate,
        };
        assert!(!limited.is_allowed());
        assert_eq!(limited.wait_duration(), Some(Duration::from_millis(250)));
    }
}
