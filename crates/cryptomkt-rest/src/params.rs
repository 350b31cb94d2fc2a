//! Request parameters
//!
//! [`Params`] is an ordered string map with typed setters for the keys the
//! API understands. Endpoints check their required keys with
//! [`Params::require`] before any request is built.

use cryptomkt_types::{Side, Timeframe};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::endpoint::Endpoint;
use crate::error::{RestError, RestResult};

/// Key/value request parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    inner: BTreeMap<String, String>,
}

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary parameter
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Set an arbitrary parameter in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.inner.insert(key.into(), value.to_string());
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    /// Check if a non-empty value is present for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.trim().is_empty())
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if no parameters are set
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over parameters in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Borrowed key/value pairs, as expected by the form encoder and signer
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.iter().collect()
    }

    /// Fail with [`RestError::MissingArgument`] for the first absent or empty key
    pub fn require(&self, keys: &[&str]) -> RestResult<()> {
        match keys.iter().find(|key| !self.contains(key)) {
            Some(missing) => Err(RestError::MissingArgument((*missing).to_string())),
            None => Ok(()),
        }
    }

    /// Check the required parameters of `endpoint`
    pub fn require_for(&self, endpoint: Endpoint) -> RestResult<()> {
        self.require(endpoint.required_params())
    }

    /// Copy of these parameters without pagination keys
    pub fn without_paging(&self) -> Self {
        let mut filter = self.clone();
        filter.inner.remove("page");
        filter.inner.remove("limit");
        filter
    }

    // ------------------------------------------------------------------
    // Typed setters
    // ------------------------------------------------------------------

    /// Market pair, e.g. `ETHCLP`
    pub fn market(self, market: impl Into<String>) -> Self {
        self.with("market", market.into())
    }

    /// Currency code, e.g. `ETH`
    pub fn currency(self, currency: impl Into<String>) -> Self {
        self.with("currency", currency.into())
    }

    /// Order or book side, sent as `type`
    pub fn side(self, side: Side) -> Self {
        self.with("type", side.as_str())
    }

    /// Amount as a decimal string
    pub fn amount(self, amount: Decimal) -> Self {
        self.with("amount", amount.normalize())
    }

    /// Price as a decimal string
    pub fn price(self, price: Decimal) -> Self {
        self.with("price", price.normalize())
    }

    /// Page index (0-based)
    pub fn page(self, page: u32) -> Self {
        self.with("page", page)
    }

    /// Page size limit
    pub fn limit(self, limit: u32) -> Self {
        self.with("limit", limit)
    }

    /// Candle timeframe
    pub fn timeframe(self, timeframe: Timeframe) -> Self {
        self.with("timeframe", timeframe)
    }

    /// Start date (`YYYY-MM-DD`)
    pub fn start(self, date: impl Into<String>) -> Self {
        self.with("start", date.into())
    }

    /// End date (`YYYY-MM-DD`)
    pub fn end(self, date: impl Into<String>) -> Self {
        self.with("end", date.into())
    }

    /// Order or payment id
    pub fn id(self, id: impl Into<String>) -> Self {
        self.with("id", id.into())
    }

    /// Destination address of a transfer
    pub fn address(self, address: impl Into<String>) -> Self {
        self.with("address", address.into())
    }

    /// Transfer memo / destination tag
    pub fn memo(self, memo: impl Into<String>) -> Self {
        self.with("memo", memo.into())
    }

    /// Registered bank account id
    pub fn bank_account(self, account: impl Into<String>) -> Self {
        self.with("bank_account", account.into())
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}
