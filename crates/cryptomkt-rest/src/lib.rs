//! REST API client for the CryptoMarket exchange
//!
//! This crate provides a REST API client for trading on CryptoMarket,
//! including market data, account management, order execution and payment
//! orders.
//!
//! # Features
//!
//! - **Market Data**: Markets, tickers, orderbook pages, trades, price candles
//! - **Account**: Account info, balances, wallet movements
//! - **Trading**: Place, cancel and inspect orders, instant exchange
//! - **Funding**: Deposit notifications, withdrawals, crypto transfers
//! - **Payments**: Payment orders and their wallets
//!
//! # Pagination
//!
//! List endpoints return a [`Page`]: an immutable snapshot holding the
//! entries, the server's pagination metadata and the query that produced
//! it. [`Page::next`] and [`Page::previous`] fetch a sibling page through the
//! executor passed in; [`drain_all`] collects every page.
//!
//! # Instant exchange estimation
//!
//! [`LiquidityWalker`] walks the opposite orderbook side to estimate what an
//! instant exchange would cost or yield, with optional pacing between pages,
//! cancellation and a deadline.
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Requests are signed with
//! HMAC-SHA384, see [`cryptomkt_auth`].
//!
//! # Example
//!
//! ```no_run
//! use cryptomkt_rest::{CryptoMktClient, Credentials, Paging};
//! use cryptomkt_types::Side;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = CryptoMktClient::new()?;
//!     let bids = client.market().get_book("ETHCLP", Side::Buy, Paging::first(10)).await?;
//!     for level in &bids {
//!         println!("{} @ {}", level.amount, level.price);
//!     }
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = CryptoMktClient::with_credentials(creds)?;
//!     let balance = auth_client.get_balance().await?;
//!     println!("Balances: {:?}", balance);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Rate Limiting
//!
//! The HTTP executor keeps separate token buckets for public and private
//! endpoints, see `cryptomkt_types::RateLimitConfig`. Nothing is retried
//! automatically.

pub mod client;
pub mod cursor;
pub mod endpoint;
pub mod endpoints;
pub mod error;
pub mod executor;
pub mod http;
pub mod liquidity;
pub mod pacing;
pub mod params;
pub mod rate_limiter;
pub mod types;

/// User agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str = concat!("cryptomkt-rest/", env!("CARGO_PKG_VERSION"));

// Re-export main types
pub use client::{ClientConfig, CryptoMktClient, DEFAULT_BASE_URL};
pub use cryptomkt_auth::Credentials;
pub use cursor::{
    drain_all, fetch_page, page_stream, DrainOptions, Page, PageEntry, PageQuery,
    DEFAULT_MAX_PAGES, DEFAULT_PAGE_LIMIT,
};
pub use endpoint::{Access, Endpoint, Method};
pub use endpoints::Paging;
pub use error::{RestError, RestResult};
pub use executor::RequestExecutor;
pub use http::HttpExecutor;
pub use liquidity::{LiquidityEstimate, LiquidityWalker, WalkOptions};
pub use pacing::{FixedInterval, NoPacing, Pacer, TokenBucketPacer};
pub use params::Params;
pub use rate_limiter::{RateLimiter, SharedRateLimiter};

// Re-export endpoint-specific types
pub use types::{
    // Market data
    Candle, Ticker, Trade,
    // Account
    Account, AccountRate, BankAccount, Balance, Transaction,
    // Trading
    InstantQuote, Order, OrderAmount,
    // Funding
    DepositRequest,
    // Payments
    PaymentOrder, PaymentOrderRequest, PaymentState,
};
