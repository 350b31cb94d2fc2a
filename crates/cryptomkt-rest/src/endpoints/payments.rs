//! Private payment order endpoints
//!
//! These endpoints require authentication.

use tracing::{info, instrument};

use super::{call, Paging};
use crate::cursor::{drain_all, fetch_page, DrainOptions, Page, PageQuery};
use crate::endpoint::Endpoint;
use crate::error::RestResult;
use crate::executor::RequestExecutor;
use crate::params::Params;
use crate::types::{PaymentOrder, PaymentOrderRequest};

/// Private payment order endpoints
pub struct PaymentEndpoints<'a, E: ?Sized> {
    executor: &'a E,
}

impl<'a, E: RequestExecutor + ?Sized> PaymentEndpoints<'a, E> {
    pub fn new(executor: &'a E) -> Self {
        Self { executor }
    }

    /// Create a payment order
    #[instrument(skip(self))]
    pub async fn new_payment_order(&self, request: &PaymentOrderRequest) -> RestResult<PaymentOrder> {
        let optional = [
            ("external_id", &request.external_id),
            ("callback_url", &request.callback_url),
            ("error_url", &request.error_url),
            ("success_url", &request.success_url),
            ("refund_email", &request.refund_email),
            ("language", &request.language),
        ];

        let mut params = Params::new()
            .with("to_receive", request.to_receive.normalize())
            .with("to_receive_currency", &request.to_receive_currency)
            .with("payment_receiver", &request.payment_receiver);
        for (key, value) in optional {
            if let Some(value) = value {
                params.insert(key, value);
            }
        }

        let order: PaymentOrder = call(self.executor, Endpoint::NewPaymentOrder, &params).await?;
        info!("Payment order created: {}", order.id);
        Ok(order)
    }

    /// Create the wallet a payer sends funds to
    ///
    /// # Arguments
    /// * `id` - Payment order id
    /// * `token` - Token of the payment order
    /// * `wallet` - Currency the payer will use
    #[instrument(skip(self, token))]
    pub async fn create_payment_wallet(&self, id: &str, token: &str, wallet: &str) -> RestResult<PaymentOrder> {
        let params = Params::new()
            .id(id)
            .with("token", token)
            .with("wallet", wallet);
        call(self.executor, Endpoint::CreatePaymentWallet, &params).await
    }

    /// Get one page of payment orders created between two dates
    ///
    /// # Arguments
    /// * `start_date` / `end_date` - Date bounds (`dd/mm/yyyy`)
    #[instrument(skip(self))]
    pub async fn get_payment_orders(
        &self,
        start_date: &str,
        end_date: &str,
        paging: Paging,
    ) -> RestResult<Page<PaymentOrder>> {
        let query = PageQuery::new(Endpoint::PaymentOrders, date_range(start_date, end_date), paging.limit);
        fetch_page(self.executor, query, paging.page).await
    }

    /// Get every payment order created between two dates
    #[instrument(skip(self))]
    pub async fn get_all_payment_orders(&self, start_date: &str, end_date: &str) -> RestResult<Vec<PaymentOrder>> {
        drain_all(
            self.executor,
            Endpoint::PaymentOrders,
            date_range(start_date, end_date),
            DrainOptions::default(),
        )
        .await
    }

    /// Get the current state of a payment order
    #[instrument(skip(self))]
    pub async fn get_payment_status(&self, id: &str) -> RestResult<PaymentOrder> {
        call(self.executor, Endpoint::PaymentStatus, &Params::new().id(id)).await
    }
}

fn date_range(start_date: &str, end_date: &str) -> Params {
    Params::new()
        .with("start_date", start_date)
        .with("end_date", end_date)
}
