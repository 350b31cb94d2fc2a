//! Endpoint catalogue
//!
//! Each endpoint knows its path, HTTP method, whether it needs credentials
//! and which parameters must be present before it may be called.

use std::fmt;

/// HTTP method used by an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Parameters go in the query string
    Get,
    /// Parameters go in a form-encoded body
    Post,
}

/// Whether an endpoint needs signed requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// No credentials needed
    Public,
    /// Signed with API credentials
    Private,
}

/// Named REST endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Available markets
    Markets,
    /// Ticker for one or all markets
    Ticker,
    /// Orderbook side for a market
    Book,
    /// Executed trades of a market
    Trades,
    /// Price candles of a market
    Prices,
    /// Account information
    Account,
    /// Wallet balances
    Balance,
    /// Wallet movements of one currency
    Transactions,
    /// Active orders in a market
    ActiveOrders,
    /// Executed orders in a market
    ExecutedOrders,
    /// Status of a single order
    OrderStatus,
    /// Server-side instant exchange quote
    InstantGet,
    /// Place an order
    CreateOrder,
    /// Cancel an order
    CancelOrder,
    /// Execute an instant exchange
    CreateInstant,
    /// Notify a fiat deposit
    RequestDeposit,
    /// Request a fiat withdrawal
    RequestWithdrawal,
    /// Send crypto to an address
    Transfer,
    /// Create a payment order
    NewPaymentOrder,
    /// Create a wallet to pay a payment order
    CreatePaymentWallet,
    /// Payment orders in a date range
    PaymentOrders,
    /// Status of a payment order
    PaymentStatus,
}

impl Endpoint {
    /// Path relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Self::Markets => "market",
            Self::Ticker => "ticker",
            Self::Book => "book",
            Self::Trades => "trades",
            Self::Prices => "prices",
            Self::Account => "account",
            Self::Balance => "balance",
            Self::Transactions => "transactions",
            Self::ActiveOrders => "orders/active",
            Self::ExecutedOrders => "orders/executed",
            Self::OrderStatus => "orders/status",
            Self::InstantGet => "orders/instant/get",
            Self::CreateOrder => "orders/create",
            Self::CancelOrder => "orders/cancel",
            Self::CreateInstant => "orders/instant/create",
            Self::RequestDeposit => "request/deposit",
            Self::RequestWithdrawal => "request/withdrawal",
            Self::Transfer => "transfer",
            Self::NewPaymentOrder => "payment/new_order",
            Self::CreatePaymentWallet => "payment/create_wallet",
            Self::PaymentOrders => "payment/orders",
            Self::PaymentStatus => "payment/status",
        }
    }

    /// HTTP method of the endpoint
    pub fn method(&self) -> Method {
        match self {
            Self::CreateOrder
            | Self::CancelOrder
            | Self::CreateInstant
            | Self::RequestDeposit
            | Self::RequestWithdrawal
            | Self::Transfer
            | Self::NewPaymentOrder
            | Self::CreatePaymentWallet => Method::Post,
            _ => Method::Get,
        }
    }

    /// Whether the endpoint needs credentials
    pub fn access(&self) -> Access {
        match self {
            Self::Markets | Self::Ticker | Self::Book | Self::Trades | Self::Prices => {
                Access::Public
            }
            _ => Access::Private,
        }
    }

    /// Parameters that must be present before the endpoint is called
    pub fn required_params(&self) -> &'static [&'static str] {
        match self {
            Self::Markets | Self::Ticker | Self::Account | Self::Balance => &[],
            Self::Book => &["market", "type"],
            Self::Trades => &["market"],
            Self::Prices => &["market", "timeframe"],
            Self::Transactions => &["currency"],
            Self::ActiveOrders | Self::ExecutedOrders => &["market"],
            Self::OrderStatus | Self::CancelOrder | Self::PaymentStatus => &["id"],
            Self::InstantGet | Self::CreateInstant => &["market", "type", "amount"],
            Self::CreateOrder => &["amount", "market", "price", "type"],
            Self::RequestDeposit | Self::RequestWithdrawal => &["amount", "bank_account"],
            Self::Transfer => &["address", "amount", "currency"],
            Self::NewPaymentOrder => &["to_receive", "to_receive_currency", "payment_receiver"],
            Self::CreatePaymentWallet => &["id", "token", "wallet"],
            Self::PaymentOrders => &["start_date", "end_date"],
        }
    }

    /// Returns true if the endpoint returns paginated lists
    pub fn is_paginated(&self) -> bool {
        matches!(
            self,
            Self::Book
                | Self::Trades
                | Self::Prices
                | Self::Transactions
                | Self::ActiveOrders
                | Self::ExecutedOrders
                | Self::PaymentOrders
        )
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_market_data() {
        for endpoint in [Endpoint::Book, Endpoint::Trades, Endpoint::Prices, Endpoint::Ticker] {
            assert_eq!(endpoint.access(), Access::Public);
            assert_eq!(endpoint.method(), Method::Get);
        }
    }

    #[test]
    fn test_trading_calls_are_signed_posts() {
        assert_eq!(Endpoint::CreateOrder.method(), Method::Post);
        assert_eq!(Endpoint::CreateOrder.access(), Access::Private);
        assert_eq!(Endpoint::ActiveOrders.method(), Method::Get);
        assert_eq!(Endpoint::ActiveOrders.access(), Access::Private);
    }

    #[test]
    fn test_required_params() {
        assert_eq!(Endpoint::Book.required_params(), &["market", "type"]);
        assert_eq!(
            Endpoint::InstantGet.required_params(),
            &["market", "type", "amount"]
        );
        assert!(Endpoint::Balance.required_params().is_empty());
    }

    #[test]
    fn test_paths() {
        assert_eq!(Endpoint::ActiveOrders.to_string(), "orders/active");
        assert_eq!(Endpoint::Markets.path(), "market");
        assert!(Endpoint::Book.is_paginated());
        assert!(!Endpoint::OrderStatus.is_paginated());
    }
}
