//! Client-side instant exchange estimation
//!
//! [`LiquidityWalker`] walks the resting orders of the book side opposite to
//! the caller's intent, best price first and page by page, until the
//! requested amount is matched or the book runs out.
//!
//! Selling walks the buy side; buying walks the sell side. The totals are
//! reported from the caller's point of view:
//!
//! | intent | `required`              | `obtained`              |
//! |--------|-------------------------|-------------------------|
//! | sell   | base amount given up    | quote amount received   |
//! | buy    | quote amount paid       | base amount received    |

use std::time::Duration;

use cryptomkt_types::{Level, Side};
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::cursor::{fetch_page, Page, PageQuery, DEFAULT_MAX_PAGES, DEFAULT_PAGE_LIMIT};
use crate::endpoint::Endpoint;
use crate::error::{RestError, RestResult};
use crate::executor::RequestExecutor;
use crate::pacing::{NoPacing, Pacer};
use crate::params::Params;

/// Result of a liquidity walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityEstimate {
    /// Amount the caller would receive
    pub obtained: Decimal,
    /// Amount the caller would give up
    pub required: Decimal,
    /// Base amount the caller asked for
    pub requested: Decimal,
    /// Base amount the book could match
    pub matched: Decimal,
}

impl LiquidityEstimate {
    /// Returns true if the book ran out before `requested` was matched
    pub fn is_partial_fill(&self) -> bool {
        self.matched < self.requested
    }

    /// Base amount the book could not match
    pub fn shortfall(&self) -> Decimal {
        self.requested - self.matched
    }

    /// Average execution price in quote per base, if anything matched
    pub fn average_price(&self, side: Side) -> Option<Decimal> {
        if self.matched.is_zero() {
            return None;
        }
        let quote = match side {
            Side::Sell => self.obtained,
            Side::Buy => self.required,
        };
        Some(quote / self.matched)
    }
}

/// Bounds of a liquidity walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Levels requested per book page
    pub page_size: u32,
    /// Give up with [`RestError::PageBudgetExhausted`] past this many pages
    pub max_pages: u32,
    /// Give up with [`RestError::Timeout`] after this long
    pub deadline: Option<Duration>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_LIMIT,
            max_pages: DEFAULT_MAX_PAGES,
            deadline: None,
        }
    }
}

impl WalkOptions {
    /// Set the page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the page budget
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set the overall deadline
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Running totals while consuming book levels
#[derive(Debug, Clone, Copy)]
struct Fill {
    remaining: Decimal,
    matched: Decimal,
    counter: Decimal,
}

impl Fill {
    fn new(requested: Decimal) -> Self {
        Self {
            remaining: requested,
            matched: Decimal::ZERO,
            counter: Decimal::ZERO,
        }
    }

    fn is_complete(&self) -> bool {
        self.remaining <= Decimal::ZERO
    }

    /// Consume levels in order until the remaining amount is matched
    fn consume(&mut self, levels: &[Level]) {
        for level in levels {
            if self.is_complete() {
                break;
            }
            // empty or malformed levels match nothing
            if level.amount <= Decimal::ZERO {
                continue;
            }
            let take = level.amount.min(self.remaining);
            self.matched += take;
            self.counter += take * level.price;
            self.remaining -= take;
        }
    }

    fn finish(self, side: Side, requested: Decimal) -> LiquidityEstimate {
        let (obtained, required) = match side {
            Side::Sell => (self.counter, self.matched),
            Side::Buy => (self.matched, self.counter),
        };
        LiquidityEstimate {
            obtained,
            required,
            requested,
            matched: self.matched,
        }
    }
}

/// Estimates instant exchanges by walking the orderbook
///
/// The walker borrows the executor it fetches through and holds no state
/// between estimates.
pub struct LiquidityWalker<'a, E: ?Sized, P = NoPacing> {
    executor: &'a E,
    pacer: P,
    options: WalkOptions,
    cancel: Option<CancellationToken>,
}

impl<'a, E> LiquidityWalker<'a, E, NoPacing>
where
    E: RequestExecutor + ?Sized,
{
    /// Create a walker that fetches pages back to back
    pub fn new(executor: &'a E) -> Self {
        Self {
            executor,
            pacer: NoPacing,
            options: WalkOptions::default(),
            cancel: None,
        }
    }
}

impl<'a, E, P> LiquidityWalker<'a, E, P>
where
    E: RequestExecutor + ?Sized,
    P: Pacer,
{
    /// Pace page fetches with `pacer`
    pub fn with_pacer<Q: Pacer>(self, pacer: Q) -> LiquidityWalker<'a, E, Q> {
        LiquidityWalker {
            executor: self.executor,
            pacer,
            options: self.options,
            cancel: self.cancel,
        }
    }

    /// Replace the walk options
    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    /// Abort estimates with [`RestError::Cancelled`] once `token` fires
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Current walk options
    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Estimate an instant exchange of `requested` base units
    ///
    /// `side` is the caller's intent. A book too thin to match everything
    /// still yields an estimate; check [`LiquidityEstimate::is_partial_fill`].
    /// Any fetch failure aborts the walk and no partial totals are returned.
    /// A zero or negative `requested` is rejected with
    /// [`RestError::InvalidParameter`] rather than quoted as zero.
    #[instrument(skip(self), fields(page_size = self.options.page_size))]
    pub async fn estimate(
        &self,
        market: &str,
        side: Side,
        requested: Decimal,
    ) -> RestResult<LiquidityEstimate> {
        if requested <= Decimal::ZERO {
            return Err(RestError::InvalidParameter(format!(
                "amount must be positive, got {}",
                requested
            )));
        }
        if self.options.page_size == 0 {
            return Err(RestError::InvalidParameter("page size must be positive".into()));
        }

        let walk = async {
            match self.options.deadline {
                Some(deadline) => {
                    match tokio::time::timeout(deadline, self.walk(market, side, requested)).await {
                        Ok(result) => result,
                        Err(_) => {
                            warn!("Walk exceeded its deadline of {:?}", deadline);
                            Err(RestError::Timeout)
                        }
                    }
                }
                None => self.walk(market, side, requested).await,
            }
        };

        match &self.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!("Walk cancelled");
                        Err(RestError::Cancelled)
                    }
                    result = walk => result,
                }
            }
            None => walk.await,
        }
    }

    async fn walk(&self, market: &str, side: Side, requested: Decimal) -> RestResult<LiquidityEstimate> {
        let book_side = side.opposite();
        let query = PageQuery::new(
            Endpoint::Book,
            Params::new().market(market).side(book_side),
            self.options.page_size,
        );

        let mut fill = Fill::new(requested);
        let mut page: Page<Level> = fetch_page(self.executor, query, 0).await?;
        let mut fetched: u32 = 1;

        loop {
            fill.consume(page.entries());
            debug!(
                "Consumed page {} of {} book: matched {} of {}",
                page.page_index(),
                book_side,
                fill.matched,
                requested
            );

            if fill.is_complete() || !page.has_next() {
                break;
            }
            if fetched >= self.options.max_pages {
                warn!("Page budget of {} exhausted", self.options.max_pages);
                return Err(RestError::PageBudgetExhausted { pages: fetched });
            }

            self.pacer.pause().await;
            page = page.next(self.executor).await?;
            fetched += 1;
        }

        let estimate = fill.finish(side, requested);
        if estimate.is_partial_fill() {
            warn!("Book exhausted after {} pages, short by {}", fetched, estimate.shortfall());
        } else {
            info!("Walk matched {} in {} pages", requested, fetched);
        }
        Ok(estimate)
    }
}

impl<E: ?Sized, P: std::fmt::Debug> std::fmt::Debug for LiquidityWalker<'_, E, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiquidityWalker")
            .field("pacer", &self.pacer)
            .field("options", &self.options)
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}
