//! Paginated result cursor
//!
//! A [`Page`] is an immutable snapshot of one fetched page: the decoded
//! entries, the pagination metadata that came with them and the query that
//! produced them. Navigating never mutates a page; [`Page::next`] and
//! [`Page::previous`] fetch a sibling page through the executor passed in
//! and return a new snapshot.
//!
//! ```no_run
//! # async fn example() -> Result<(), cryptomkt_rest::RestError> {
//! use cryptomkt_rest::{CryptoMktClient, Paging};
//! use cryptomkt_types::Side;
//!
//! let client = CryptoMktClient::new()?;
//! let first = client.market().get_book("ETHCLP", Side::Buy, Paging::first(50)).await?;
//! if first.has_next() {
//!     let second = first.next(client.executor()).await?;
//!     println!("{} levels on page {}", second.len(), second.page_index());
//! }
//! # Ok(())
//! # }
//! ```

use cryptomkt_types::{Level, Pagination};
use futures::stream::{self, Stream};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::endpoint::Endpoint;
use crate::error::{RestError, RestResult};
use crate::executor::RequestExecutor;
use crate::params::Params;
use crate::types::{Candle, CandleGroups, Order, PaymentOrder, Trade, Transaction};

/// Page size used by exhaustive traversals
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Upper bound on pages fetched by one traversal
pub const DEFAULT_MAX_PAGES: u32 = 1000;

// ============================================================================
// Page entries
// ============================================================================

/// A type that can be decoded from the `data` field of a paginated response
pub trait PageEntry: Sized + Send + Sync {
    /// Decode the entries of one page
    fn decode_page(data: serde_json::Value) -> serde_json::Result<Vec<Self>>;
}

fn decode_list<T: DeserializeOwned>(data: serde_json::Value) -> serde_json::Result<Vec<T>> {
    if data.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(data)
}

macro_rules! list_entry {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PageEntry for $ty {
                fn decode_page(data: serde_json::Value) -> serde_json::Result<Vec<Self>> {
                    decode_list(data)
                }
            }
        )*
    };
}

list_entry!(Level, Trade, Order, Transaction, PaymentOrder);

impl PageEntry for Candle {
    /// Candles arrive grouped by side; the page holds ask candles first,
    /// then bid candles, each tagged with its side
    fn decode_page(data: serde_json::Value) -> serde_json::Result<Vec<Self>> {
        if data.is_null() {
            return Ok(Vec::new());
        }
        let groups: CandleGroups = serde_json::from_value(data)?;
        let asks = groups.ask.into_iter().map(|mut c| {
            c.side = Some(cryptomkt_types::Side::Sell);
            c
        });
        let bids = groups.bid.into_iter().map(|mut c| {
            c.side = Some(cryptomkt_types::Side::Buy);
            c
        });
        Ok(asks.chain(bids).collect())
    }
}

// ============================================================================
// Queries and pages
// ============================================================================

/// The request a page was fetched with, minus the page index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Paginated endpoint
    pub endpoint: Endpoint,
    /// Filter parameters (market, side, currency...)
    pub filter: Params,
    /// Page size limit
    pub limit: u32,
}

impl PageQuery {
    /// Create a query; pagination keys in `filter` are dropped
    pub fn new(endpoint: Endpoint, filter: Params, limit: u32) -> Self {
        Self {
            endpoint,
            filter: filter.without_paging(),
            limit,
        }
    }

    /// Full parameter set for page `page`
    pub fn params_for(&self, page: u32) -> Params {
        self.filter.clone().page(page).limit(self.limit)
    }
}

/// Immutable snapshot of one fetched page
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    query: PageQuery,
    entries: Vec<T>,
    pagination: Pagination,
}

impl<T> Page<T> {
    /// Assemble a page from its parts
    pub fn from_parts(query: PageQuery, entries: Vec<T>, pagination: Pagination) -> Self {
        Self {
            query,
            entries,
            pagination,
        }
    }

    /// Entries of this page
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Consume the page and return its entries
    pub fn into_entries(self) -> Vec<T> {
        self.entries
    }

    /// Pagination metadata of this page
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Query this page was fetched with
    pub fn query(&self) -> &PageQuery {
        &self.query
    }

    /// Index of this page
    pub fn page_index(&self) -> u32 {
        self.pagination.page
    }

    /// Returns true if a following page exists
    pub fn has_next(&self) -> bool {
        self.pagination.next.is_some()
    }

    /// Returns true if a preceding page exists
    pub fn has_previous(&self) -> bool {
        self.pagination.previous.is_some()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the page holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }
}

impl<T: PageEntry> Page<T> {
    /// Fetch the following page
    ///
    /// Fails with [`RestError::NoMorePages`] on the last page, without a
    /// request.
    pub async fn next<E>(&self, executor: &E) -> RestResult<Page<T>>
    where
        E: RequestExecutor + ?Sized,
    {
        match self.pagination.next {
            Some(index) => fetch_page(executor, self.query.clone(), index).await,
            None => Err(RestError::NoMorePages),
        }
    }

    /// Fetch the preceding page
    ///
    /// Fails with [`RestError::NoPreviousPage`] on the first page, without a
    /// request.
    pub async fn previous<E>(&self, executor: &E) -> RestResult<Page<T>>
    where
        E: RequestExecutor + ?Sized,
    {
        match self.pagination.previous {
            Some(index) => fetch_page(executor, self.query.clone(), index).await,
            None => Err(RestError::NoPreviousPage),
        }
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ============================================================================
// Fetching
// ============================================================================

/// Fetch one page of `query`
///
/// Required parameters are checked before anything is sent. A response
/// without pagination metadata is treated as a single, complete page.
#[instrument(skip(executor, query), fields(endpoint = %query.endpoint, limit = query.limit))]
pub async fn fetch_page<T, E>(executor: &E, query: PageQuery, page: u32) -> RestResult<Page<T>>
where
    T: PageEntry,
    E: RequestExecutor + ?Sized,
{
    query.filter.require_for(query.endpoint)?;

    let params = query.params_for(page);
    debug!("Fetching page {}", page);

    let envelope = executor.execute(query.endpoint, &params).await?;
    let payload = envelope.into_result().map_err(RestError::Server)?;

    let entries = T::decode_page(payload.data)?;
    let pagination = payload.pagination.unwrap_or(Pagination {
        page,
        limit: query.limit,
        previous: None,
        next: None,
    });

    debug!(
        "Fetched {} entries (previous={:?}, next={:?})",
        entries.len(),
        pagination.previous,
        pagination.next
    );

    Ok(Page::from_parts(query, entries, pagination))
}

/// Options for [`drain_all`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainOptions {
    /// First page to fetch
    pub start_page: u32,
    /// Page size limit
    pub limit: u32,
    /// Give up with [`RestError::PageBudgetExhausted`] past this many pages
    pub max_pages: u32,
}

impl Default for DrainOptions {
    fn default() -> Self {
        Self {
            start_page: 0,
            limit: DEFAULT_PAGE_LIMIT,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl DrainOptions {
    /// Set the first page
    pub fn with_start_page(mut self, page: u32) -> Self {
        self.start_page = page;
        self
    }

    /// Set the page size limit
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the page budget
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// Collect every entry from `options.start_page` to the last page
///
/// Entries are returned in server page order. Reaching the last page ends the
/// traversal normally; any other failure aborts it and discards what was
/// collected so far.
#[instrument(skip(executor, filter), fields(endpoint = %endpoint))]
pub async fn drain_all<T, E>(
    executor: &E,
    endpoint: Endpoint,
    filter: Params,
    options: DrainOptions,
) -> RestResult<Vec<T>>
where
    T: PageEntry,
    E: RequestExecutor + ?Sized,
{
    let query = PageQuery::new(endpoint, filter, options.limit);
    let mut page: Page<T> = fetch_page(executor, query, options.start_page).await?;
    let mut fetched: u32 = 1;
    let mut entries = Vec::new();

    loop {
        let next = if page.has_next() && fetched >= options.max_pages {
            warn!("Page budget of {} exhausted", options.max_pages);
            return Err(RestError::PageBudgetExhausted { pages: fetched });
        } else {
            page.next(executor).await
        };

        entries.extend(page.into_entries());

        match next {
            Ok(following) => {
                page = following;
                fetched += 1;
            }
            Err(RestError::NoMorePages) => break,
            Err(e) => return Err(e),
        }
    }

    debug!("Drained {} entries from {} pages", entries.len(), fetched);
    Ok(entries)
}

/// Lazily fetch pages of `query`, starting at `start_page`
///
/// The stream ends after the last page or after the first error, which is
/// yielded. It carries no page budget; bound it with `StreamExt::take`.
pub fn page_stream<'a, T, E>(
    executor: &'a E,
    query: PageQuery,
    start_page: u32,
) -> impl Stream<Item = RestResult<Page<T>>> + 'a
where
    T: PageEntry + 'a,
    E: RequestExecutor + ?Sized,
{
    stream::try_unfold(Some(start_page), move |cursor| {
        let query = query.clone();
        async move {
            let Some(index) = cursor else {
                return Ok(None);
            };
            let page: Page<T> = fetch_page(executor, query, index).await?;
            let following = page.pagination().next;
            Ok(Some((page, following)))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptomkt_types::Side;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_level_page_decoding() {
        let data = json!([
            {"price": "10", "amount": "5", "timestamp": "2017-08-01T15:21:46"},
            {"price": "9.5", "amount": "1"}
        ]);
        let levels = Level::decode_page(data).unwrap();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[1].price, dec!(9.5));
    }

    #[test]
    fn test_null_data_is_empty_page() {
        let levels = Level::decode_page(serde_json::Value::Null).unwrap();
        assert!(levels.is_empty());
    }

    #[test]
    fn test_candles_flatten_ask_first() {
        let candle = |id: u64| {
            json!({
                "candle_id": id,
                "open_price": "1",
                "hight_price": "2",
                "close_price": "1.5",
                "low_price": "0.5",
                "volume_sum": "10",
                "candle_date": "2017-10-12 16:00:00",
                "tick_count": 3
            })
        };
        let data = json!({"ask": [candle(1), candle(2)], "bid": [candle(3)]});
        let candles = Candle::decode_page(data).unwrap();

        let ids: Vec<u64> = candles.iter().map(|c| c.candle_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(candles[0].side, Some(Side::Sell));
        assert_eq!(candles[2].side, Some(Side::Buy));
    }

    #[test]
    fn test_query_drops_paging_keys() {
        let filter = Params::new().market("ETHCLP").page(7).limit(3);
        let query = PageQuery::new(Endpoint::Trades, filter, 100);
        let params = query.params_for(2);

        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.get("limit"), Some("100"));
        assert_eq!(params.get("market"), Some("ETHCLP"));
    }

    #[test]
    fn test_page_accessors() {
        let query = PageQuery::new(Endpoint::Book, Params::new(), 20);
        let pagination = Pagination {
            page: 1,
            limit: 20,
            previous: Some(0),
            next: None,
        };
        let page = Page::from_parts(query, vec![1, 2, 3], pagination);

        assert_eq!(page.page_index(), 1);
        assert!(page.has_previous());
        assert!(!page.has_next());
        assert_eq!(page.len(), 3);
        assert_eq!(page.iter().sum::<i32>(), 6);
        assert_eq!(page.into_entries(), vec![1, 2, 3]);
    }

    #[test]
    fn test_drain_defaults() {
        let options = DrainOptions::default();
        assert_eq!(options.start_page, 0);
        assert_eq!(options.limit, 100);
        assert_eq!(options.max_pages, 1000);
    }
}
