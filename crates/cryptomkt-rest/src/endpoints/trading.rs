//! Private trading endpoints
//!
//! These endpoints require authentication.

use cryptomkt_types::Side;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use super::{call, call_unit, Paging};
use crate::cursor::{drain_all, fetch_page, DrainOptions, Page, PageQuery};
use crate::endpoint::Endpoint;
use crate::error::{RestError, RestResult};
use crate::executor::RequestExecutor;
use crate::liquidity::{LiquidityEstimate, LiquidityWalker, WalkOptions};
use crate::params::Params;
use crate::types::{InstantQuote, Order};

/// Private trading endpoints
pub struct TradingEndpoints<'a, E: ?Sized> {
    executor: &'a E,
    walk_options: WalkOptions,
}

impl<'a, E: RequestExecutor + ?Sized> TradingEndpoints<'a, E> {
    pub fn new(executor: &'a E) -> Self {
        Self {
            executor,
            walk_options: WalkOptions::default(),
        }
    }

    /// Bounds used by [`TradingEndpoints::estimate_instant`]
    pub fn with_walk_options(mut self, options: WalkOptions) -> Self {
        self.walk_options = options;
        self
    }

    /// Get one page of active orders in `market`
    #[instrument(skip(self))]
    pub async fn get_active_orders(&self, market: &str, paging: Paging) -> RestResult<Page<Order>> {
        let query = PageQuery::new(Endpoint::ActiveOrders, Params::new().market(market), paging.limit);
        fetch_page(self.executor, query, paging.page).await
    }

    /// Get one page of executed orders in `market`
    #[instrument(skip(self))]
    pub async fn get_executed_orders(&self, market: &str, paging: Paging) -> RestResult<Page<Order>> {
        let query = PageQuery::new(Endpoint::ExecutedOrders, Params::new().market(market), paging.limit);
        fetch_page(self.executor, query, paging.page).await
    }

    /// Get every active order in `market`, 100 per page
    #[instrument(skip(self))]
    pub async fn get_all_active_orders(&self, market: &str) -> RestResult<Vec<Order>> {
        drain_all(
            self.executor,
            Endpoint::ActiveOrders,
            Params::new().market(market),
            DrainOptions::default(),
        )
        .await
    }

    /// Get every executed order in `market`, 100 per page
    #[instrument(skip(self))]
    pub async fn get_all_executed_orders(&self, market: &str) -> RestResult<Vec<Order>> {
        drain_all(
            self.executor,
            Endpoint::ExecutedOrders,
            Params::new().market(market),
            DrainOptions::default(),
        )
        .await
    }

    /// Get the current state of an order
    #[instrument(skip(self))]
    pub async fn get_order_status(&self, id: &str) -> RestResult<Order> {
        call(self.executor, Endpoint::OrderStatus, &Params::new().id(id)).await
    }

    /// Place a limit order
    ///
    /// # Arguments
    /// * `market` - Market pair (e.g., "ETHCLP")
    /// * `side` - Buy or sell
    /// * `amount` - Base amount
    /// * `price` - Limit price
    #[instrument(skip(self))]
    pub async fn create_order(
        &self,
        market: &str,
        side: Side,
        amount: Decimal,
        price: Decimal,
    ) -> RestResult<Order> {
        if amount <= Decimal::ZERO || price <= Decimal::ZERO {
            return Err(RestError::InvalidParameter(
                "amount and price must be positive".into(),
            ));
        }
        let params = Params::new()
            .market(market)
            .side(side)
            .amount(amount)
            .price(price);

        let order: Order = call(self.executor, Endpoint::CreateOrder, &params).await?;
        info!("Order placed: {}", order.id);
        Ok(order)
    }

    /// Cancel an order by id
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: &str) -> RestResult<Order> {
        call(self.executor, Endpoint::CancelOrder, &Params::new().id(id)).await
    }

    /// Cancel every order of a page, in page order
    ///
    /// Stops at the first failure; orders after it are left untouched.
    #[instrument(skip(self, orders), fields(count = orders.len()))]
    pub async fn cancel_orders(&self, orders: &Page<Order>) -> RestResult<Vec<Order>> {
        let mut cancelled = Vec::with_capacity(orders.len());
        for order in orders {
            cancelled.push(self.cancel_order(&order.id).await?);
        }
        debug!("Cancelled {} orders", cancelled.len());
        Ok(cancelled)
    }

    /// Re-query the status of every order of a page, in page order
    #[instrument(skip(self, orders), fields(count = orders.len()))]
    pub async fn refresh_orders(&self, orders: &Page<Order>) -> RestResult<Vec<Order>> {
        let mut refreshed = Vec::with_capacity(orders.len());
        for order in orders {
            refreshed.push(self.get_order_status(&order.id).await?);
        }
        Ok(refreshed)
    }

    /// Ask the server for an instant exchange quote
    #[instrument(skip(self))]
    pub async fn get_instant(&self, market: &str, side: Side, amount: Decimal) -> RestResult<InstantQuote> {
        let params = Params::new().market(market).side(side).amount(amount);
        call(self.executor, Endpoint::InstantGet, &params).await
    }

    /// Estimate an instant exchange by walking the orderbook
    ///
    /// Pages are fetched back to back under the configured walk options;
    /// use [`LiquidityWalker`] directly for pacing or cancellation.
    pub async fn estimate_instant(
        &self,
        market: &str,
        side: Side,
        amount: Decimal,
    ) -> RestResult<LiquidityEstimate> {
        LiquidityWalker::new(self.executor)
            .with_options(self.walk_options)
            .estimate(market, side, amount)
            .await
    }

    /// Execute an instant exchange
    #[instrument(skip(self))]
    pub async fn create_instant(&self, market: &str, side: Side, amount: Decimal) -> RestResult<()> {
        let params = Params::new().market(market).side(side).amount(amount);
        call_unit(self.executor, Endpoint::CreateInstant, &params).await?;
        info!("Instant exchange executed on {}", market);
        Ok(())
    }
}
