//! Side and Timeframe enums

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Trade side
///
/// Used both for the caller's trade direction and for the orderbook side
/// requested from the `book` endpoint (`type=buy` returns the bids).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    /// Returns the side as used in request parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(TypesError::InvalidSide(s.to_string())),
        }
    }
}

/// Candle timeframe in minutes, as accepted by the `prices` endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// 1 minute
    #[serde(rename = "1")]
    M1 = 1,
    /// 5 minutes
    #[serde(rename = "5")]
    M5 = 5,
    /// 15 minutes
    #[serde(rename = "15")]
    M15 = 15,
    /// 1 hour (60 minutes)
    #[serde(rename = "60")]
    H1 = 60,
    /// 4 hours (240 minutes)
    #[serde(rename = "240")]
    H4 = 240,
    /// 1 day (1440 minutes)
    #[serde(rename = "1440")]
    D1 = 1440,
    /// 1 week (10080 minutes)
    #[serde(rename = "10080")]
    W1 = 10080,
}

impl Timeframe {
    /// Get the timeframe in minutes
    pub fn as_minutes(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_minutes())
    }
}

impl FromStr for Timeframe {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Self::M1),
            "5" => Ok(Self::M5),
            "15" => Ok(Self::M15),
            "60" => Ok(Self::H1),
            "240" => Ok(Self::H4),
            "1440" => Ok(Self::D1),
            "10080" => Ok(Self::W1),
            _ => Err(TypesError::InvalidTimeframe(s.to_string())),
        }
    }
}
