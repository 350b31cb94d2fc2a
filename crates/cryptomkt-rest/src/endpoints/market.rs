//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use cryptomkt_types::{Level, Side, Timeframe};
use tracing::{debug, instrument};

use super::{call, Paging};
use crate::cursor::{fetch_page, Page, PageQuery};
use crate::endpoint::Endpoint;
use crate::error::RestResult;
use crate::executor::RequestExecutor;
use crate::params::Params;
use crate::types::{Candle, Ticker, Trade};

/// Public market data endpoints
pub struct MarketEndpoints<'a, E: ?Sized> {
    executor: &'a E,
}

impl<'a, E: RequestExecutor + ?Sized> MarketEndpoints<'a, E> {
    pub fn new(executor: &'a E) -> Self {
        Self { executor }
    }

    /// List available market pairs
    #[instrument(skip(self))]
    pub async fn get_markets(&self) -> RestResult<Vec<String>> {
        debug!("Fetching markets");
        call(self.executor, Endpoint::Markets, &Params::new()).await
    }

    /// Get tickers
    ///
    /// # Arguments
    /// * `market` - Market pair (e.g., "ETHCLP"), or `None` for every market
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, market: Option<&str>) -> RestResult<Vec<Ticker>> {
        let mut params = Params::new();
        if let Some(market) = market {
            params.insert("market", market);
        }
        call(self.executor, Endpoint::Ticker, &params).await
    }

    /// Get one page of the orderbook side `side`
    ///
    /// Levels arrive best price first.
    #[instrument(skip(self))]
    pub async fn get_book(&self, market: &str, side: Side, paging: Paging) -> RestResult<Page<Level>> {
        let filter = Params::new().market(market).side(side);
        let query = PageQuery::new(Endpoint::Book, filter, paging.limit);
        fetch_page(self.executor, query, paging.page).await
    }

    /// Get one page of executed trades
    ///
    /// # Arguments
    /// * `start` / `end` - Optional date bounds (`YYYY-MM-DD`)
    #[instrument(skip(self))]
    pub async fn get_trades(
        &self,
        market: &str,
        start: Option<&str>,
        end: Option<&str>,
        paging: Paging,
    ) -> RestResult<Page<Trade>> {
        let mut filter = Params::new().market(market);
        if let Some(start) = start {
            filter = filter.start(start);
        }
        if let Some(end) = end {
            filter = filter.end(end);
        }
        let query = PageQuery::new(Endpoint::Trades, filter, paging.limit);
        fetch_page(self.executor, query, paging.page).await
    }

    /// Get one page of price candles
    ///
    /// Ask candles come first, then bid candles; see [`Candle::side`].
    #[instrument(skip(self))]
    pub async fn get_prices(
        &self,
        market: &str,
        timeframe: Timeframe,
        paging: Paging,
    ) -> RestResult<Page<Candle>> {
        let filter = Params::new().market(market).timeframe(timeframe);
        let query = PageQuery::new(Endpoint::Prices, filter, paging.limit);
        fetch_page(self.executor, query, paging.page).await
    }
}
