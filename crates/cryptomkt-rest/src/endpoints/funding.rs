//! Private funding endpoints
//!
//! These endpoints require authentication.

use rust_decimal::Decimal;
use tracing::{info, instrument};

use super::call_unit;
use crate::endpoint::Endpoint;
use crate::error::{RestError, RestResult};
use crate::executor::RequestExecutor;
use crate::params::Params;
use crate::types::DepositRequest;

/// Private funding endpoints
pub struct FundingEndpoints<'a, E: ?Sized> {
    executor: &'a E,
}

impl<'a, E: RequestExecutor + ?Sized> FundingEndpoints<'a, E> {
    pub fn new(executor: &'a E) -> Self {
        Self { executor }
    }

    /// Notify a fiat deposit
    #[instrument(skip(self))]
    pub async fn request_deposit(&self, request: &DepositRequest) -> RestResult<()> {
        positive(request.amount)?;
        let mut params = Params::new()
            .amount(request.amount)
            .bank_account(request.bank_account.as_str());
        if let Some(date) = &request.date {
            params.insert("date", date);
        }
        if let Some(code) = &request.tracking_code {
            params.insert("tracking_code", code);
        }
        if let Some(voucher) = &request.voucher {
            params.insert("voucher", voucher);
        }

        call_unit(self.executor, Endpoint::RequestDeposit, &params).await?;
        info!("Deposit of {} notified", request.amount);
        Ok(())
    }

    /// Request a fiat withdrawal to a registered bank account
    #[instrument(skip(self))]
    pub async fn request_withdrawal(&self, amount: Decimal, bank_account: &str) -> RestResult<()> {
        positive(amount)?;
        let params = Params::new().amount(amount).bank_account(bank_account);
        call_unit(self.executor, Endpoint::RequestWithdrawal, &params).await?;
        info!("Withdrawal of {} requested", amount);
        Ok(())
    }

    /// Send crypto to an address
    ///
    /// # Arguments
    /// * `memo` - Destination tag, for currencies that use one
    #[instrument(skip(self))]
    pub async fn transfer(
        &self,
        address: &str,
        amount: Decimal,
        currency: &str,
        memo: Option<&str>,
    ) -> RestResult<()> {
        positive(amount)?;
        let mut params = Params::new()
            .address(address)
            .amount(amount)
            .currency(currency);
        if let Some(memo) = memo {
            params = params.memo(memo);
        }

        call_unit(self.executor, Endpoint::Transfer, &params).await?;
        info!("Transfer of {} {} sent", amount, currency);
        Ok(())
    }
}

fn positive(amount: Decimal) -> RestResult<()> {
    if amount <= Decimal::ZERO {
        return Err(RestError::InvalidParameter(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    Ok(())
}
