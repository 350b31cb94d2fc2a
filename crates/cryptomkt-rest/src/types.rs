//! Types for CryptoMarket REST API responses

use cryptomkt_types::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Market Data Types
// ============================================================================

/// Ticker for one market
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Ticker {
    /// Market pair
    pub market: String,
    /// Highest price of the last 24 hours
    pub high: Decimal,
    /// Lowest price of the last 24 hours
    pub low: Decimal,
    /// Best ask
    pub ask: Decimal,
    /// Best bid
    pub bid: Decimal,
    /// Last traded price
    pub last_price: Decimal,
    /// Traded volume of the last 24 hours
    pub volume: Decimal,
    /// Server timestamp
    pub timestamp: String,
}

impl Ticker {
    /// Get the mid price (average of bid and ask)
    pub fn mid_price(&self) -> Decimal {
        (self.ask + self.bid) / Decimal::TWO
    }

    /// Get the spread
    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }
}

/// Executed trade of a market
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Trade {
    /// Side of the taker
    pub market_taker: Side,
    /// Execution price
    pub price: Decimal,
    /// Executed amount
    pub amount: Decimal,
    /// Trade id
    pub tid: String,
    /// Execution time
    pub timestamp: String,
    /// Market pair
    pub market: String,
}

/// Price candle
///
/// The prices endpoint groups candles by book side; [`Candle::side`] records
/// which group a candle came from.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Candle {
    /// Candle id
    pub candle_id: u64,
    /// Opening price
    pub open_price: Decimal,
    /// Highest price (the API spells it `hight_price`)
    #[serde(rename = "hight_price", alias = "high_price")]
    pub high_price: Decimal,
    /// Lowest price
    pub low_price: Decimal,
    /// Closing price
    pub close_price: Decimal,
    /// Summed volume
    pub volume_sum: Decimal,
    /// Candle start date
    pub candle_date: String,
    /// Number of ticks in the candle
    pub tick_count: u64,
    /// Book side the candle belongs to
    #[serde(default)]
    pub side: Option<Side>,
}

/// Raw prices payload: candles grouped by side
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CandleGroups {
    #[serde(default)]
    pub ask: Vec<Candle>,
    #[serde(default)]
    pub bid: Vec<Candle>,
}

// ============================================================================
// Account Types
// ============================================================================

/// Trading fee rates of the account
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AccountRate {
    /// Maker fee
    pub market_maker: Decimal,
    /// Taker fee
    pub market_taker: Decimal,
}

/// Registered bank account
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BankAccount {
    /// Account id, used as `bank_account` in funding requests
    pub id: u64,
    /// Bank name
    pub bank: String,
    /// Account number
    pub number: String,
    /// Account type
    #[serde(default)]
    pub kind: Option<String>,
    /// Account currency
    pub currency: String,
    /// Account holder
    #[serde(default)]
    pub name: Option<String>,
}

/// Account information
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Account {
    /// Account holder
    pub name: String,
    /// Account email
    pub email: String,
    /// Fee rates
    pub rate: AccountRate,
    /// Registered bank accounts
    #[serde(default)]
    pub bank_accounts: Vec<BankAccount>,
}

/// Balance of one wallet
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Balance {
    /// Wallet currency
    pub wallet: String,
    /// Amount free to trade
    pub available: Decimal,
    /// Total amount, including funds held by orders
    pub balance: Decimal,
}

impl Balance {
    /// Amount held by open orders
    pub fn held(&self) -> Decimal {
        self.balance - self.available
    }
}

/// Wallet movement
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Transaction {
    /// Movement id
    pub id: String,
    /// Movement type code
    #[serde(rename = "type")]
    pub kind: i32,
    /// Amount moved
    pub amount: Decimal,
    /// Fee percentage
    #[serde(default)]
    pub fee_percent: Option<Decimal>,
    /// Fee amount
    #[serde(default)]
    pub fee_amount: Option<Decimal>,
    /// Balance after the movement
    pub balance: Decimal,
    /// Movement date
    pub date: String,
    /// Blockchain hash, for crypto movements
    #[serde(default)]
    pub hash: Option<String>,
    /// Destination address, for crypto movements
    #[serde(default)]
    pub address: Option<String>,
    /// Destination memo / tag
    #[serde(default)]
    pub memo: Option<String>,
}

// ============================================================================
// Trading Types
// ============================================================================

/// Amount breakdown of an order
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OrderAmount {
    /// Amount originally requested
    pub original: Decimal,
    /// Amount still open
    #[serde(default)]
    pub remaining: Option<Decimal>,
    /// Amount already executed
    #[serde(default)]
    pub executed: Option<Decimal>,
}

/// Order of the account
///
/// Orders carry data only. Cancel or refresh them through
/// [`crate::endpoints::TradingEndpoints`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Order {
    /// Order id
    pub id: String,
    /// Order status (`active`, `executed`, `cancelled`...)
    pub status: String,
    /// Order side
    #[serde(rename = "type")]
    pub side: Side,
    /// Limit price
    pub price: Decimal,
    /// Amount breakdown
    pub amount: OrderAmount,
    /// Execution price, once executed
    #[serde(default)]
    pub execution_price: Option<Decimal>,
    /// Average execution price, once executed
    #[serde(default)]
    pub avg_execution_price: Option<Decimal>,
    /// Market pair
    pub market: String,
    /// Creation time
    pub created_at: String,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Execution time
    #[serde(default)]
    pub executed_at: Option<String>,
}

impl Order {
    /// Returns true while the order rests in the book
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

/// Server-side instant exchange quote
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InstantQuote {
    /// Amount the instant exchange would hand out
    pub obtained: Decimal,
    /// Amount the instant exchange would take
    pub required: Decimal,
}

// ============================================================================
// Payment Types
// ============================================================================

/// State of a payment order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentState {
    /// Paid more than once
    MultiplePayments,
    /// Paid amount does not match the expected amount
    AmountMismatch,
    /// Currency conversion failed
    ConversionFailed,
    /// Payment order expired
    Expired,
    /// Waiting for payment
    AwaitingPayment,
    /// Waiting for a block confirmation
    AwaitingBlock,
    /// Waiting for processing
    AwaitingProcessing,
    /// Paid successfully
    Paid,
    /// Status code not known to this client
    Unknown(i32),
}

impl PaymentState {
    /// Map the numeric status code of a payment order
    pub fn from_code(code: i32) -> Self {
        match code {
            -4 => Self::MultiplePayments,
            -3 => Self::AmountMismatch,
            -2 => Self::ConversionFailed,
            -1 => Self::Expired,
            0 => Self::AwaitingPayment,
            1 => Self::AwaitingBlock,
            2 => Self::AwaitingProcessing,
            3 => Self::Paid,
            other => Self::Unknown(other),
        }
    }

    /// Returns true once no further change is expected
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Paid | Self::Expired | Self::ConversionFailed | Self::MultiplePayments
        )
    }
}

/// Payment order
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PaymentOrder {
    /// Payment order id
    pub id: String,
    /// Merchant reference
    #[serde(default)]
    pub external_id: Option<String>,
    /// Numeric status code, see [`PaymentOrder::state`]
    pub status: i32,
    /// Amount the merchant receives
    pub to_receive: Decimal,
    /// Currency the merchant receives
    pub to_receive_currency: String,
    /// Amount the payer must send
    #[serde(default)]
    pub expected_amount: Option<Decimal>,
    /// Currency the payer must send
    #[serde(default)]
    pub expected_currency: Option<String>,
    /// Address the payer sends to
    #[serde(default)]
    pub deposit_address: Option<String>,
    /// Refund email
    #[serde(default)]
    pub refund_email: Option<String>,
    /// QR code url
    #[serde(default)]
    pub qr: Option<String>,
    /// Observations
    #[serde(default)]
    pub obs: Option<String>,
    /// Callback url
    #[serde(default)]
    pub callback_url: Option<String>,
    /// Error redirect url
    #[serde(default)]
    pub error_url: Option<String>,
    /// Success redirect url
    #[serde(default)]
    pub success_url: Option<String>,
    /// Payment page url
    #[serde(default)]
    pub payment_url: Option<String>,
    /// Seconds left before expiry
    #[serde(default)]
    pub remaining: Option<i64>,
    /// Payment page language
    #[serde(default)]
    pub language: Option<String>,
    /// Creation time
    pub created_at: String,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Server time of the response
    #[serde(default)]
    pub server_at: Option<String>,
}

impl PaymentOrder {
    /// Decoded status
    pub fn state(&self) -> PaymentState {
        PaymentState::from_code(self.status)
    }
}

/// Parameters of a new payment order
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOrderRequest {
    /// Amount to receive
    pub to_receive: Decimal,
    /// Currency to receive
    pub to_receive_currency: String,
    /// Email of the receiving account
    pub payment_receiver: String,
    /// Merchant reference
    pub external_id: Option<String>,
    /// Callback url
    pub callback_url: Option<String>,
    /// Error redirect url
    pub error_url: Option<String>,
    /// Success redirect url
    pub success_url: Option<String>,
    /// Refund email
    pub refund_email: Option<String>,
    /// Payment page language (`es`, `en`, `pt`)
    pub language: Option<String>,
}

impl PaymentOrderRequest {
    /// Create a request with only the required fields
    pub fn new(
        to_receive: Decimal,
        to_receive_currency: impl Into<String>,
        payment_receiver: impl Into<String>,
    ) -> Self {
        Self {
            to_receive,
            to_receive_currency: to_receive_currency.into(),
            payment_receiver: payment_receiver.into(),
            external_id: None,
            callback_url: None,
            error_url: None,
            success_url: None,
            refund_email: None,
            language: None,
        }
    }

    /// Set the merchant reference
    pub fn with_external_id(mut self, id: impl Into<String>) -> Self {
        self.external_id = Some(id.into());
        self
    }

    /// Set the callback url
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Set the redirect urls
    pub fn with_redirects(mut self, success: impl Into<String>, error: impl Into<String>) -> Self {
        self.success_url = Some(success.into());
        self.error_url = Some(error.into());
        self
    }

    /// Set the refund email
    pub fn with_refund_email(mut self, email: impl Into<String>) -> Self {
        self.refund_email = Some(email.into());
        self
    }

    /// Set the payment page language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

// ============================================================================
// Funding Types
// ============================================================================

/// Fiat deposit notification
#[derive(Debug, Clone, PartialEq)]
pub struct DepositRequest {
    /// Deposited amount
    pub amount: Decimal,
    /// Bank account id
    pub bank_account: String,
    /// Deposit date (`dd/mm/yyyy`), required in Mexico
    pub date: Option<String>,
    /// Bank tracking code, required in Mexico
    pub tracking_code: Option<String>,
    /// Voucher reference, required in Mexico, Brazil and the European Union
    pub voucher: Option<String>,
}

impl DepositRequest {
    /// Create a deposit notification
    pub fn new(amount: Decimal, bank_account: impl Into<String>) -> Self {
        Self {
            amount,
            bank_account: bank_account.into(),
            date: None,
            tracking_code: None,
            voucher: None,
        }
    }

    /// Set the Mexico-specific fields
    pub fn with_tracking(mut self, date: impl Into<String>, tracking_code: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self.tracking_code = Some(tracking_code.into());
        self
    }

    /// Set the voucher reference
    pub fn with_voucher(mut self, voucher: impl Into<String>) -> Self {
        self.voucher = Some(voucher.into());
        self
    }
}
