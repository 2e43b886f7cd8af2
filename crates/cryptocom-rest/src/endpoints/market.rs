//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use cryptocom_types::{ApiVersion, Params};
use tracing::{debug, instrument};

use crate::client::CryptoComClient;
use crate::context::CallContext;
use crate::error::RestResult;
use crate::types::{BookResult, Instrument, InstrumentsResult, Ticker, TickersResult};

const METHOD_GET_INSTRUMENTS: &str = "public/get-instruments";
const METHOD_GET_BOOK: &str = "public/get-book";
const METHOD_GET_TICKERS: &str = "public/get-tickers";

/// Public market data endpoints
#[derive(Debug, Clone)]
pub struct MarketEndpoints<'a> {
    client: &'a CryptoComClient,
    ctx: CallContext,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a CryptoComClient) -> Self {
        Self {
            client,
            ctx: CallContext::new(),
        }
    }

    /// Apply a deadline or cancellation to every call made through this group
    pub fn with_context(mut self, ctx: CallContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// Get all supported instruments
    #[instrument(skip(self))]
    pub async fn get_instruments(&self) -> RestResult<Vec<Instrument>> {
        debug!("Fetching instruments");
        let result: InstrumentsResult = self
            .client
            .call_public(METHOD_GET_INSTRUMENTS, Params::new(), None, &self.ctx)
            .await?;
        Ok(result.data)
    }

    /// Get the order book for an instrument
    ///
    /// # Arguments
    /// * `instrument` - Instrument name (e.g., "BTC_USDT")
    /// * `depth` - Levels per side; `0` leaves it to the server
    #[instrument(skip(self))]
    pub async fn get_book(&self, instrument: &str, depth: u32) -> RestResult<BookResult> {
        let mut params = Params::new().with("instrument_name", instrument);
        if depth > 0 {
            params.insert("depth", depth);
        }

        debug!("Fetching order book for {}", instrument);
        self.client
            .call_public(METHOD_GET_BOOK, params, Some(ApiVersion::V2), &self.ctx)
            .await
    }

    /// Get tickers
    ///
    /// # Arguments
    /// * `instrument` - Instrument name; empty for every instrument
    #[instrument(skip(self))]
    pub async fn get_tickers(&self, instrument: &str) -> RestResult<Vec<Ticker>> {
        let mut params = Params::new();
        if !instrument.is_empty() {
            params.insert("instrument_name", instrument);
        }

        debug!("Fetching tickers");
        let result: TickersResult = self
            .client
            .call_public(METHOD_GET_TICKERS, params, None, &self.ctx)
            .await?;
        Ok(result.data)
    }
}
