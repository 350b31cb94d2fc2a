//! API endpoint implementations

pub mod market;
pub mod account;
pub mod trading;
pub mod funding;
pub mod payments;

pub use market::MarketEndpoints;
pub use account::AccountEndpoints;
pub use trading::TradingEndpoints;
pub use funding::FundingEndpoints;
pub use payments::PaymentEndpoints;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::endpoint::Endpoint;
use crate::error::{RestError, RestResult};
use crate::executor::RequestExecutor;
use crate::params::Params;

/// Page size the server applies when none is given
pub const SERVER_PAGE_LIMIT: u32 = 20;

/// Page index and size of a single-page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    /// Page index (0-based)
    pub page: u32,
    /// Page size limit
    pub limit: u32,
}

impl Paging {
    /// Page `page` with `limit` entries
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// First page with `limit` entries
    pub fn first(limit: u32) -> Self {
        Self::new(0, limit)
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self::first(SERVER_PAGE_LIMIT)
    }
}

/// Call a non-paginated endpoint and decode its payload
pub(crate) async fn call<T, E>(executor: &E, endpoint: Endpoint, params: &Params) -> RestResult<T>
where
    T: DeserializeOwned,
    E: RequestExecutor + ?Sized,
{
    let data = call_raw(executor, endpoint, params).await?;
    Ok(serde_json::from_value(data)?)
}

/// Call an endpoint whose payload is of no interest
pub(crate) async fn call_unit<E>(executor: &E, endpoint: Endpoint, params: &Params) -> RestResult<()>
where
    E: RequestExecutor + ?Sized,
{
    call_raw(executor, endpoint, params).await.map(|_| ())
}

async fn call_raw<E>(executor: &E, endpoint: Endpoint, params: &Params) -> RestResult<serde_json::Value>
where
    E: RequestExecutor + ?Sized,
{
    params.require_for(endpoint)?;
    debug!("Calling {}", endpoint);

    let envelope = executor.execute(endpoint, params).await?;
    envelope
        .into_result()
        .map(|payload| payload.data)
        .map_err(RestError::Server)
}
