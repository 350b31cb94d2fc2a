//! Shared types for the CryptoMarket REST API
//!
//! This crate provides the core type definitions used across the workspace.
//! It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`Envelope`] - Raw response envelope returned by every endpoint
//! - [`Pagination`] - Page cursor metadata attached to list responses
//! - [`Level`] - Orderbook price level with decimal precision
//! - [`Side`], [`Timeframe`] - Request enums
//! - [`TypesError`] - Error types
//! - [`TokenBucket`], [`RateLimitConfig`] - Client-side rate limiting

pub mod enums;
pub mod envelope;
pub mod error;
pub mod level;
pub mod pagination;
pub mod rate_limit;

// Re-export commonly used types
pub use enums::*;
pub use envelope::*;
pub use error::*;
pub use level::*;
pub use pagination::*;
pub use rate_limit::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
