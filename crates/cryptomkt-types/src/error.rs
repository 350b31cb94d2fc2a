//! Error types for parsing shared CryptoMarket types

use thiserror::Error;

/// Errors raised when converting strings into shared types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// Side was neither `buy` nor `sell`
    #[error("invalid side: {0} (expected buy or sell)")]
    InvalidSide(String),

    /// Timeframe is not one the prices endpoint accepts
    #[error("invalid timeframe: {0} (supported: 1, 5, 15, 60, 240, 1440, 10080)")]
    InvalidTimeframe(String),

    /// Decimal string could not be parsed
    #[error("invalid decimal: {0}")]
    InvalidDecimal(String),
}

/// Result type alias for type conversions
pub type TypesResult<T> = Result<T, TypesError>;
