//! Private account endpoints
//!
//! These endpoints require authentication.

use tracing::instrument;

use super::{call, Paging};
use crate::cursor::{drain_all, fetch_page, DrainOptions, Page, PageQuery};
use crate::endpoint::Endpoint;
use crate::error::RestResult;
use crate::executor::RequestExecutor;
use crate::params::Params;
use crate::types::{Account, Balance, Transaction};

/// Private account endpoints
pub struct AccountEndpoints<'a, E: ?Sized> {
    executor: &'a E,
}

impl<'a, E: RequestExecutor + ?Sized> AccountEndpoints<'a, E> {
    pub fn new(executor: &'a E) -> Self {
        Self { executor }
    }

    /// Get account information
    #[instrument(skip(self))]
    pub async fn get_account(&self) -> RestResult<Account> {
        call(self.executor, Endpoint::Account, &Params::new()).await
    }

    /// Get the balance of every wallet
    #[instrument(skip(self))]
    pub async fn get_balance(&self) -> RestResult<Vec<Balance>> {
        call(self.executor, Endpoint::Balance, &Params::new()).await
    }

    /// Get wallets (same as [`Self::get_balance`])
    pub async fn get_wallets(&self) -> RestResult<Vec<Balance>> {
        self.get_balance().await
    }

    /// Get one page of wallet movements
    ///
    /// # Arguments
    /// * `currency` - Wallet currency (e.g., "ETH")
    #[instrument(skip(self))]
    pub async fn get_transactions(&self, currency: &str, paging: Paging) -> RestResult<Page<Transaction>> {
        let query = PageQuery::new(Endpoint::Transactions, Params::new().currency(currency), paging.limit);
        fetch_page(self.executor, query, paging.page).await
    }

    /// Get every wallet movement of `currency`
    #[instrument(skip(self))]
    pub async fn get_all_transactions(&self, currency: &str) -> RestResult<Vec<Transaction>> {
        drain_all(
            self.executor,
            Endpoint::Transactions,
            Params::new().currency(currency),
            DrainOptions::default(),
        )
        .await
    }
}
