//! Main REST client implementation

use cryptomkt_auth::Credentials;
use cryptomkt_types::{Level, RateLimitConfig, Side, Timeframe};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

use crate::cursor::{drain_all, DrainOptions, Page, PageEntry};
use crate::endpoint::Endpoint;
use crate::endpoints::{
    AccountEndpoints, FundingEndpoints, MarketEndpoints, Paging, PaymentEndpoints, TradingEndpoints,
};
use crate::error::RestResult;
use crate::executor::RequestExecutor;
use crate::http::HttpExecutor;
use crate::liquidity::{LiquidityEstimate, LiquidityWalker, WalkOptions};
use crate::pacing::TokenBucketPacer;
use crate::params::Params;
use crate::types::{Balance, Candle, InstantQuote, Order, Ticker, Trade};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.cryptomkt.com/v1/";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CryptoMarket REST API client
///
/// Provides access to both public and private endpoints through any
/// [`RequestExecutor`]; the default executor talks HTTP.
///
/// # Example
///
/// ```no_run
/// use cryptomkt_rest::{CryptoMktClient, Credentials};
/// use cryptomkt_types::Side;
/// use rust_decimal_macros::dec;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = CryptoMktClient::new()?;
///     let estimate = client.estimate_instant("ETHCLP", Side::Sell, dec!(1.5)).await?;
///     println!("Selling 1.5 ETH yields {} CLP", estimate.obtained);
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = CryptoMktClient::with_credentials(creds)?;
///     let orders = auth_client.get_all_executed_orders("ETHCLP").await?;
///     println!("{} executed orders", orders.len());
///
///     Ok(())
/// }
/// ```
pub struct CryptoMktClient<E: ?Sized = HttpExecutor> {
    executor: Arc<E>,
    walk_options: WalkOptions,
}

impl<E: ?Sized> Clone for CryptoMktClient<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            walk_options: self.walk_options,
        }
    }
}

impl CryptoMktClient<HttpExecutor> {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let executor = HttpExecutor::new(&config)?;
        info!("Created CryptoMarket REST client");
        Ok(Self::with_executor(executor).with_walk_options(config.walk_options))
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.executor.has_credentials()
    }

    /// Estimate an instant exchange, pacing book pages with the client's
    /// book-walk rate limit
    pub async fn estimate_instant_paced(
        &self,
        market: &str,
        side: Side,
        amount: Decimal,
    ) -> RestResult<LiquidityEstimate> {
        let pacer = TokenBucketPacer::book_walk(Arc::clone(self.executor.rate_limiter()));
        self.liquidity_walker()
            .with_pacer(pacer)
            .estimate(market, side, amount)
            .await
    }
}

impl<E: RequestExecutor> CryptoMktClient<E> {
    /// Create a client around any executor
    pub fn with_executor(executor: E) -> Self {
        Self::from_shared(Arc::new(executor))
    }
}

impl<E: RequestExecutor + ?Sized> CryptoMktClient<E> {
    /// Create a client around a shared executor
    pub fn from_shared(executor: Arc<E>) -> Self {
        Self {
            executor,
            walk_options: WalkOptions::default(),
        }
    }

    /// Set the options used by [`Self::liquidity_walker`] and
    /// [`TradingEndpoints::estimate_instant`]
    pub fn with_walk_options(mut self, options: WalkOptions) -> Self {
        self.walk_options = options;
        self
    }

    /// Executor requests go through
    pub fn executor(&self) -> &E {
        &self.executor
    }

    // ========================================================================
    // Endpoint Groups
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_, E> {
        MarketEndpoints::new(self.executor())
    }

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> AccountEndpoints<'_, E> {
        AccountEndpoints::new(self.executor())
    }

    /// Get trading endpoints (requires credentials)
    pub fn trading(&self) -> TradingEndpoints<'_, E> {
        TradingEndpoints::new(self.executor()).with_walk_options(self.walk_options)
    }

    /// Get funding endpoints (requires credentials)
    pub fn funding(&self) -> FundingEndpoints<'_, E> {
        FundingEndpoints::new(self.executor())
    }

    /// Get payment order endpoints (requires credentials)
    pub fn payments(&self) -> PaymentEndpoints<'_, E> {
        PaymentEndpoints::new(self.executor())
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Fetch the page after `page`
    pub async fn next_page<T: PageEntry>(&self, page: &Page<T>) -> RestResult<Page<T>> {
        page.next(self.executor()).await
    }

    /// Fetch the page before `page`
    pub async fn previous_page<T: PageEntry>(&self, page: &Page<T>) -> RestResult<Page<T>> {
        page.previous(self.executor()).await
    }

    /// Collect every entry of a paginated endpoint
    pub async fn drain<T: PageEntry>(
        &self,
        endpoint: Endpoint,
        filter: Params,
        options: DrainOptions,
    ) -> RestResult<Vec<T>> {
        drain_all(self.executor(), endpoint, filter, options).await
    }

    /// Book walker bound to this client's executor and walk options
    pub fn liquidity_walker(&self) -> LiquidityWalker<'_, E> {
        LiquidityWalker::new(self.executor()).with_options(self.walk_options)
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// List available market pairs
    pub async fn get_markets(&self) -> RestResult<Vec<String>> {
        self.market().get_markets().await
    }

    /// Get the ticker of one market
    pub async fn get_ticker(&self, market: &str) -> RestResult<Vec<Ticker>> {
        self.market().get_ticker(Some(market)).await
    }

    /// Get the first page of one orderbook side
    pub async fn get_book(&self, market: &str, side: Side) -> RestResult<Page<Level>> {
        self.market().get_book(market, side, Paging::default()).await
    }

    /// Get the latest trades of a market
    pub async fn get_trades(&self, market: &str) -> RestResult<Page<Trade>> {
        self.market().get_trades(market, None, None, Paging::default()).await
    }

    /// Get the latest price candles of a market
    pub async fn get_prices(&self, market: &str, timeframe: Timeframe) -> RestResult<Page<Candle>> {
        self.market().get_prices(market, timeframe, Paging::default()).await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get the balance of every wallet
    pub async fn get_balance(&self) -> RestResult<Vec<Balance>> {
        self.account().get_balance().await
    }

    // ========================================================================
    // Private Trading Endpoints
    // ========================================================================

    /// Get every active order in `market`
    pub async fn get_all_active_orders(&self, market: &str) -> RestResult<Vec<Order>> {
        self.trading().get_all_active_orders(market).await
    }

    /// Get every executed order in `market`
    pub async fn get_all_executed_orders(&self, market: &str) -> RestResult<Vec<Order>> {
        self.trading().get_all_executed_orders(market).await
    }

    /// Place a limit order
    pub async fn create_order(
        &self,
        market: &str,
        side: Side,
        amount: Decimal,
        price: Decimal,
    ) -> RestResult<Order> {
        self.trading().create_order(market, side, amount, price).await
    }

    /// Cancel an order by id
    pub async fn cancel_order(&self, id: &str) -> RestResult<Order> {
        self.trading().cancel_order(id).await
    }

    /// Ask the server for an instant exchange quote
    pub async fn get_instant(&self, market: &str, side: Side, amount: Decimal) -> RestResult<InstantQuote> {
        self.trading().get_instant(market, side, amount).await
    }

    /// Estimate an instant exchange by walking the orderbook
    ///
    /// Uses the client's walk options, without pacing.
    pub async fn estimate_instant(
        &self,
        market: &str,
        side: Side,
        amount: Decimal,
    ) -> RestResult<LiquidityEstimate> {
        self.liquidity_walker().estimate(market, side, amount).await
    }
}

impl<E: ?Sized> std::fmt::Debug for CryptoMktClient<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoMktClient")
            .field("walk_options", &self.walk_options)
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL
    pub base_url: String,
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Client-side rate limits
    pub rate_limits: RateLimitConfig,
    /// Liquidity walk bounds
    pub walk_options: WalkOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            rate_limits: RateLimitConfig::cryptomkt_defaults(),
            walk_options: WalkOptions::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Load credentials from `CRYPTOMKT_API_KEY` / `CRYPTOMKT_API_SECRET`
    pub fn with_env_credentials(self) -> RestResult<Self> {
        Ok(self.with_credentials(Credentials::from_env()?))
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set client-side rate limits
    pub fn with_rate_limits(mut self, rate_limits: RateLimitConfig) -> Self {
        self.rate_limits = rate_limits;
        self
    }

    /// Set liquidity walk bounds
    pub fn with_walk_options(mut self, options: WalkOptions) -> Self {
        self.walk_options = options;
        self
    }
}
