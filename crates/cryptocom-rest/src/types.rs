//! Types for Crypto.com Exchange REST API requests and responses

use chrono::{DateTime, Utc};
use cryptocom_types::Params;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RestResult;
use crate::pagination::{PageRequest, TimeRange};

// ============================================================================
// Market Data Types
// ============================================================================

/// Tradable instrument
#[derive(Debug, Clone, Deserialize)]
pub struct Instrument {
    /// Instrument name, e.g. `BTC_USDT`
    pub symbol: String,
    /// Instrument type, e.g. `CCY_PAIR` or `PERPETUAL_SWAP`
    pub inst_type: String,
    /// Display name
    #[serde(default)]
    pub display_name: String,
    /// Base currency
    pub base_ccy: String,
    /// Quote currency
    pub quote_ccy: String,
    /// Decimal places of the quote currency
    #[serde(default)]
    pub quote_decimals: u32,
    /// Decimal places of the quantity
    #[serde(default)]
    pub quantity_decimals: u32,
    /// Minimum price increment
    pub price_tick_size: Decimal,
    /// Minimum quantity increment
    pub qty_tick_size: Decimal,
    /// Maximum leverage
    #[serde(default)]
    pub max_leverage: Option<Decimal>,
    /// Whether the instrument can be traded
    #[serde(default)]
    pub tradable: bool,
    /// Expiry in milliseconds; 0 for instruments that never expire
    #[serde(default)]
    pub expiry_timestamp_ms: i64,
    /// Beta product flag
    #[serde(default)]
    pub beta_product: bool,
    /// Underlying symbol for derivatives
    #[serde(default)]
    pub underlying_symbol: Option<String>,
    /// Contract size for derivatives
    #[serde(default)]
    pub contract_size: Option<Decimal>,
    /// Margin buying allowed
    #[serde(default)]
    pub margin_buy_enabled: bool,
    /// Margin selling allowed
    #[serde(default)]
    pub margin_sell_enabled: bool,
}

/// Result of `public/get-instruments`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct InstrumentsResult {
    pub data: Vec<Instrument>,
}

/// Order book result of `public/get-book`
#[derive(Debug, Clone, Deserialize)]
pub struct BookResult {
    /// Requested depth
    #[serde(default)]
    pub depth: u32,
    /// Instrument name
    pub instrument_name: String,
    /// Book snapshots (the exchange sends one)
    pub data: Vec<BookData>,
}

impl BookResult {
    /// First snapshot
    pub fn snapshot(&self) -> Option<&BookData> {
        self.data.first()
    }
}

/// Order book snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct BookData {
    /// Bid levels [price, quantity, order count]
    pub bids: Vec<Vec<String>>,
    /// Ask levels [price, quantity, order count]
    pub asks: Vec<Vec<String>>,
    /// Snapshot time
    #[serde(rename = "t", with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl BookData {
    /// Get the best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().and_then(|level| level.first()?.parse().ok())
    }

    /// Get the best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().and_then(|level| level.first()?.parse().ok())
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

/// 24h ticker
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    /// Instrument name
    #[serde(rename = "i")]
    pub instrument: String,
    /// Best bid price
    #[serde(rename = "b", default)]
    pub bid_price: Option<Decimal>,
    /// Best ask price
    #[serde(rename = "k", default)]
    pub ask_price: Option<Decimal>,
    /// Latest trade price
    #[serde(rename = "a", default)]
    pub last_price: Option<Decimal>,
    /// Ticker time
    #[serde(rename = "t", with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// 24h traded volume
    #[serde(rename = "v", default)]
    pub volume_24h: Option<Decimal>,
    /// 24h high
    #[serde(rename = "h", default)]
    pub high_24h: Option<Decimal>,
    /// 24h low
    #[serde(rename = "l", default)]
    pub low_24h: Option<Decimal>,
    /// 24h price change
    #[serde(rename = "c", default)]
    pub change_24h: Option<Decimal>,
}

impl Ticker {
    /// Get the mid price (average of bid and ask)
    pub fn mid_price(&self) -> Option<Decimal> {
        Some((self.ask_price? + self.bid_price?) / Decimal::TWO)
    }

    /// Get spread in basis points
    pub fn spread_bps(&self) -> Option<Decimal> {
        let ask = self.ask_price?;
        let bid = self.bid_price?;
        let mid = self.mid_price()?;
        if mid.is_zero() {
            return None;
        }
        Some((ask - bid) / mid * Decimal::from(10000))
    }
}

/// Result of `public/get-tickers`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TickersResult {
    pub data: Vec<Ticker>,
}

// ============================================================================
// Funding Types
// ============================================================================

/// Filters for `private/get-deposit-history` and
/// `private/get-withdrawal-history`
///
/// The exchange accepts at most 24 hours between `start` and `end` and
/// rejects longer ranges with `INVALID_DATE_RANGE`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FundingHistoryRequest {
    /// Currency, e.g. `BTC`; all currencies when unset
    pub currency: Option<String>,
    /// Range start (server default: 24 hours ago)
    pub start: Option<DateTime<Utc>>,
    /// Range end (server default: now)
    pub end: Option<DateTime<Utc>>,
    /// Items per page, `0` for the server default of 20
    pub page_size: i32,
    /// Zero-based page
    pub page: i32,
    /// Status filter
    pub status: Option<String>,
}

/// Deposit history filters
pub type DepositHistoryRequest = FundingHistoryRequest;

/// Withdrawal history filters
pub type WithdrawalHistoryRequest = FundingHistoryRequest;

impl FundingHistoryRequest {
    /// Unfiltered first page
    pub fn new() -> Self {
        Self::default()
    }

    /// Only this currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Only records inside `range`
    pub fn with_time_range(mut self, range: TimeRange) -> Self {
        self.start = Some(range.start);
        self.end = Some(range.end);
        self
    }

    /// Select a page
    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page.page;
        self.page_size = page.page_size;
        self
    }

    /// Only records with this status
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Current page selection
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }

    /// Validate bounds and build request parameters
    pub fn to_params(&self) -> RestResult<Params> {
        let page = self.page_request();
        page.validate()?;

        let mut params = Params::new();
        params.insert_opt("currency", non_empty(&self.currency));
        params.insert_opt("start_ts", self.start.map(|t| t.timestamp_millis()));
        params.insert_opt("end_ts", self.end.map(|t| t.timestamp_millis()));
        params.insert_opt("status", non_empty(&self.status));
        page.apply(&mut params);
        Ok(params)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Deposit record
#[derive(Debug, Clone, Deserialize)]
pub struct Deposit {
    /// Deposit id
    pub id: String,
    /// Currency
    pub currency: String,
    /// Amount
    pub amount: Decimal,
    /// Fee
    #[serde(default)]
    pub fee: Decimal,
    /// Source address
    #[serde(default)]
    pub address: String,
    /// Status code as reported by the exchange
    pub status: String,
    /// Creation time
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub create_time: DateTime<Utc>,
    /// Last update time
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub update_time: DateTime<Utc>,
}

/// Result of `private/get-deposit-history`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DepositHistoryResult {
    #[serde(default)]
    pub deposit_list: Vec<Deposit>,
}

/// Withdrawal record
#[derive(Debug, Clone, Deserialize)]
pub struct Withdrawal {
    /// Withdrawal id
    pub id: String,
    /// Client-supplied withdrawal id
    #[serde(default)]
    pub client_wid: Option<String>,
    /// Currency
    pub currency: String,
    /// Amount
    pub amount: Decimal,
    /// Fee
    #[serde(default)]
    pub fee: Decimal,
    /// Destination address
    #[serde(default)]
    pub address: String,
    /// Status code as reported by the exchange
    pub status: String,
    /// On-chain transaction id
    #[serde(default)]
    pub txid: Option<String>,
    /// Network the withdrawal was sent on
    #[serde(default)]
    pub network_id: Option<String>,
    /// Creation time
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub create_time: DateTime<Utc>,
    /// Last update time
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub update_time: DateTime<Utc>,
}

/// Result of `private/get-withdrawal-history`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WithdrawalHistoryResult {
    #[serde(default)]
    pub withdrawal_list: Vec<Withdrawal>,
}

/// Deposit address
#[derive(Debug, Clone, Deserialize)]
pub struct DepositAddress {
    /// Address id
    pub id: String,
    /// Currency
    pub currency: String,
    /// Network
    #[serde(default)]
    pub network: String,
    /// Address
    pub address: String,
    /// Status code as reported by the exchange
    pub status: String,
    /// Creation time
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub create_time: DateTime<Utc>,
}

/// Result of `private/get-deposit-address`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DepositAddressResult {
    #[serde(default)]
    pub deposit_address_list: Vec<DepositAddress>,
}

/// Parameters for `private/create-withdrawal`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithdrawalRequest {
    /// Currency
    pub currency: String,
    /// Amount, sent with exactly these digits
    pub amount: Decimal,
    /// Destination address
    pub address: String,
    /// Client-supplied id, echoed back on the withdrawal
    pub client_wid: Option<String>,
    /// Secondary address identifier (memo, destination tag)
    pub address_tag: Option<String>,
    /// Network to withdraw on
    pub network_id: Option<String>,
}

impl WithdrawalRequest {
    /// Withdraw `amount` of `currency` to `address`
    pub fn new(currency: impl Into<String>, amount: Decimal, address: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            amount,
            address: address.into(),
            client_wid: None,
            address_tag: None,
            network_id: None,
        }
    }

    /// Set the client withdrawal id
    pub fn with_client_wid(mut self, client_wid: impl Into<String>) -> Self {
        self.client_wid = Some(client_wid.into());
        self
    }

    /// Set the address tag
    pub fn with_address_tag(mut self, address_tag: impl Into<String>) -> Self {
        self.address_tag = Some(address_tag.into());
        self
    }

    /// Set the network
    pub fn with_network_id(mut self, network_id: impl Into<String>) -> Self {
        self.network_id = Some(network_id.into());
        self
    }

    /// Build request parameters, leaving out empty fields
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        if !self.currency.is_empty() {
            params.insert("currency", self.currency.as_str());
        }
        if !self.amount.is_zero() {
            params.insert("amount", self.amount);
        }
        if !self.address.is_empty() {
            params.insert("address", self.address.as_str());
        }
        params.insert_opt("client_wid", non_empty(&self.client_wid));
        params.insert_opt("address_tag", non_empty(&self.address_tag));
        params.insert_opt("network_id", non_empty(&self.network_id));
        params
    }
}

/// Result of `private/create-withdrawal`
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawalResult {
    /// Withdrawal id
    pub id: i64,
    /// Amount
    pub amount: Decimal,
    /// Fee
    #[serde(default)]
    pub fee: Decimal,
    /// Currency
    pub symbol: String,
    /// Destination address
    pub address: String,
    /// Client-supplied id
    #[serde(default)]
    pub client_wid: Option<String>,
    /// Network
    #[serde(default)]
    pub network_id: Option<String>,
    /// Creation time
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub create_time: DateTime<Utc>,
}

// ============================================================================
// Account Types
// ============================================================================

/// Parameters for `private/user-balance-history`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceHistoryRequest {
    /// Bucket size, e.g. `H1` or `D1`
    pub timeframe: Option<String>,
    /// Last bucket to return
    pub end_time: Option<DateTime<Utc>>,
    /// Number of buckets, `0` for the server default
    pub limit: i32,
}

impl BalanceHistoryRequest {
    /// Server defaults for every field
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bucket size
    pub fn with_timeframe(mut self, timeframe: impl Into<String>) -> Self {
        self.timeframe = Some(timeframe.into());
        self
    }

    /// Set the last bucket
    pub fn with_end_time(mut self, end_time: DateTime<Utc>) -> Self {
        self.end_time = Some(end_time);
        self
    }

    /// Set the number of buckets
    pub fn with_limit(mut self, limit: i32) -> Self {
        self.limit = limit;
        self
    }

    /// Build request parameters, leaving out unset fields
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert_opt("timeframe", non_empty(&self.timeframe));
        params.insert_opt("end_time", self.end_time.map(|t| t.timestamp_millis()));
        if self.limit != 0 {
            params.insert("limit", self.limit);
        }
        params
    }
}

/// Balance history of the account
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceHistory {
    /// Instrument the balances are quoted in
    #[serde(default)]
    pub instrument_name: String,
    /// Buckets, oldest first
    #[serde(default)]
    pub data: Vec<BalancePoint>,
}

/// Total balance at one point in time
#[derive(Debug, Clone, Deserialize)]
pub struct BalancePoint {
    /// Bucket time
    #[serde(rename = "t", with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Total cash balance
    #[serde(rename = "c")]
    pub balance: Decimal,
}
