//! REST API client for the Crypto.com Exchange
//!
//! This crate provides a REST client for the Crypto.com Exchange, covering
//! market data, funding and account endpoints on top of the signed-request
//! protocol.
//!
//! # Features
//!
//! - **Market Data**: Instruments, order book, tickers
//! - **Funding**: Deposit and withdrawal history, deposit addresses, withdrawals
//! - **Account**: Balance history
//! - **Core protocol**: Envelope building, response classification, pagination
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Every private request is signed
//! with HMAC-SHA256 over the method, id, API key, canonical parameters and
//! nonce (see `cryptocom-auth`).
//!
//! # Example
//!
//! ```no_run
//! use cryptocom_rest::{CryptoComClient, DepositHistoryRequest, PageRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = CryptoComClient::new()?;
//!     let book = client.get_book("BTC_USDT", 10).await?;
//!     println!("BTC/USDT: {:?}", book.snapshot().and_then(|b| b.best_bid()));
//!
//!     // Private endpoints (auth required)
//!     let auth_client = CryptoComClient::with_credentials("api-key", "secret-key")?;
//!     let request = DepositHistoryRequest::new()
//!         .with_currency("BTC")
//!         .with_page(PageRequest::new(0, 200));
//!     let deposits = auth_client.get_all_deposit_history(&request).await?;
//!     println!("Deposits: {}", deposits.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every call returns a [`RestError`]. Exchange rejections carry a typed
//! [`ExchangeErrorKind`] so callers can branch without string matching:
//!
//! ```
//! use cryptocom_rest::{ExchangeError, ExchangeErrorKind, RestError};
//!
//! let err = RestError::from(ExchangeError::new(400, 10009));
//! assert!(err.is_exchange_kind(ExchangeErrorKind::InvalidDateRange));
//! ```
//!
//! The client does not retry, back off or throttle.

pub mod classify;
pub mod client;
pub mod config;
pub mod context;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod pagination;
pub mod transport;
pub mod types;

// Re-export main types
pub use classify::{classify, decode_response};
pub use client::{ClientBuilder, CryptoComClient};
pub use config::{ClientConfig, Environment};
pub use context::{CallContext, CancelHandle};
pub use envelope::EnvelopeBuilder;
pub use error::{RestError, RestResult};
pub use pagination::{paginate, PageRequest, TimeRange, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;

// Re-export endpoint-specific types
pub use types::{
    // Market data
    BookData, BookResult, Instrument, Ticker,
    // Funding
    Deposit, DepositAddress, DepositHistoryRequest, FundingHistoryRequest, Withdrawal,
    WithdrawalHistoryRequest, WithdrawalRequest, WithdrawalResult,
    // Account
    BalanceHistory, BalanceHistoryRequest, BalancePoint,
};

// Re-export protocol types callers need
pub use cryptocom_auth::{Credentials, SignatureGenerator};
pub use cryptocom_types::{
    ApiVersion, Decimal, ExchangeError, ExchangeErrorKind, ParamValue, Params,
};
