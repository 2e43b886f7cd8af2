//! Funding endpoints for deposits and withdrawals
//!
//! These endpoints require authentication.
//!
//! The history endpoints page through results: request page 0, 1, 2, ...
//! until an empty list comes back, or use
//! [`paginate`](crate::pagination::paginate) to do the walk. Their time range
//! is limited to 24 hours by the exchange.

use cryptocom_types::Params;
use tracing::{debug, instrument};

use crate::client::CryptoComClient;
use crate::context::CallContext;
use crate::error::RestResult;
use crate::pagination::{paginate, PageRequest};
use crate::types::{
    Deposit, DepositAddress, DepositAddressResult, DepositHistoryResult, FundingHistoryRequest,
    Withdrawal, WithdrawalHistoryResult, WithdrawalRequest, WithdrawalResult,
};

const METHOD_GET_DEPOSIT_HISTORY: &str = "private/get-deposit-history";
const METHOD_GET_WITHDRAWAL_HISTORY: &str = "private/get-withdrawal-history";
const METHOD_GET_DEPOSIT_ADDRESS: &str = "private/get-deposit-address";
const METHOD_CREATE_WITHDRAWAL: &str = "private/create-withdrawal";

/// Funding endpoints for deposits and withdrawals
#[derive(Debug, Clone)]
pub struct FundingEndpoints<'a> {
    client: &'a CryptoComClient,
    ctx: CallContext,
}

impl<'a> FundingEndpoints<'a> {
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

    async fn post<T: serde::de::DeserializeOwned>(&self, method: &str, params: Params) -> RestResult<T> {
        self.client.call_private(method, params, None, &self.ctx).await
    }

    /// Get one page of deposit history
    ///
    /// A page size outside `0..=200` is rejected before anything is sent.
    #[instrument(skip(self))]
    pub async fn get_deposit_history(
        &self,
        request: &FundingHistoryRequest,
    ) -> RestResult<Vec<Deposit>> {
        let params = request.to_params()?;
        debug!("Getting deposit history page {}", request.page);
        let result: DepositHistoryResult = self.post(METHOD_GET_DEPOSIT_HISTORY, params).await?;
        Ok(result.deposit_list)
    }

    /// Get one page of withdrawal history
    ///
    /// A page size outside `0..=200` is rejected before anything is sent.
    #[instrument(skip(self))]
    pub async fn get_withdrawal_history(
        &self,
        request: &FundingHistoryRequest,
    ) -> RestResult<Vec<Withdrawal>> {
        let params = request.to_params()?;
        debug!("Getting withdrawal history page {}", request.page);
        let result: WithdrawalHistoryResult =
            self.post(METHOD_GET_WITHDRAWAL_HISTORY, params).await?;
        Ok(result.withdrawal_list)
    }

    /// Get every page of deposit history, starting at `request`'s page
    ///
    /// The group's context bounds the whole walk: a deadline covers every
    /// page and cancellation stops at the page in flight.
    #[instrument(skip(self))]
    pub async fn get_all_deposit_history(
        &self,
        request: &FundingHistoryRequest,
    ) -> RestResult<Vec<Deposit>> {
        paginate(request.page_request(), |page: PageRequest| {
            let request = request.clone().with_page(page);
            async move { self.get_deposit_history(&request).await }
        })
        .await
    }

    /// Get every page of withdrawal history, starting at `request`'s page
    #[instrument(skip(self))]
    pub async fn get_all_withdrawal_history(
        &self,
        request: &FundingHistoryRequest,
    ) -> RestResult<Vec<Withdrawal>> {
        paginate(request.page_request(), |page: PageRequest| {
            let request = request.clone().with_page(page);
            async move { self.get_withdrawal_history(&request).await }
        })
        .await
    }

    /// Get deposit addresses
    ///
    /// # Arguments
    /// * `currency` - Currency to get addresses for (e.g., "BTC")
    #[instrument(skip(self))]
    pub async fn get_deposit_address(&self, currency: &str) -> RestResult<Vec<DepositAddress>> {
        let mut params = Params::new();
        if !currency.is_empty() {
            params.insert("currency", currency);
        }

        debug!("Getting deposit addresses for {}", currency);
        let result: DepositAddressResult = self.post(METHOD_GET_DEPOSIT_ADDRESS, params).await?;
        Ok(result.deposit_address_list)
    }

    /// Withdraw funds
    ///
    /// The amount is sent with exactly the digits of the given decimal.
    #[instrument(skip(self))]
    pub async fn create_withdrawal(&self, request: &WithdrawalRequest) -> RestResult<WithdrawalResult> {
        debug!("Withdrawing {} {}", request.amount, request.currency);
        self.post(METHOD_CREATE_WITHDRAWAL, request.to_params()).await
    }
}
