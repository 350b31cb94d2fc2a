//! Price level types with decimal precision

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::error::{TypesError, TypesResult};

/// A single resting price level returned by the `book` endpoint
///
/// Book pages arrive best price first for the requested side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Price of this level
    #[serde(deserialize_with = "deserialize_decimal")]
    pub price: Decimal,
    /// Remaining size at this price
    #[serde(deserialize_with = "deserialize_decimal")]
    pub amount: Decimal,
    /// Server timestamp of the level, if sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Level {
    /// Create a new price level
    pub fn new(price: Decimal, amount: Decimal) -> Self {
        Self {
            price,
            amount,
            timestamp: None,
        }
    }

    /// Create a level from the decimal strings the API sends
    pub fn parse(price: &str, amount: &str) -> TypesResult<Self> {
        let price = Decimal::from_str(price).map_err(|_| TypesError::InvalidDecimal(price.into()))?;
        let amount =
            Decimal::from_str(amount).map_err(|_| TypesError::InvalidDecimal(amount.into()))?;
        Ok(Self::new(price, amount))
    }

    /// Quote-currency value of the whole level
    pub fn notional(&self) -> Decimal {
        self.price * self.amount
    }

    /// Check if this level has zero size
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

/// Decimals arrive as strings; some endpoints send bare JSON numbers instead.
pub(crate) fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    use rust_decimal::prelude::FromPrimitive;
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => Decimal::from_str(s.trim()).map_err(D::Error::custom),
        StringOrNumber::Number(n) => {
            let s = n.to_string();
            // Scientific notation (e.g. 5e-6) only survives the f64 route
            if s.contains('e') || s.contains('E') {
                let f = n.as_f64().ok_or_else(|| D::Error::custom("invalid number"))?;
                Decimal::from_f64(f).ok_or_else(|| D::Error::custom("cannot convert to decimal"))
            } else {
                Decimal::from_str(&s).map_err(D::Error::custom)
            }
        }
    }
}
