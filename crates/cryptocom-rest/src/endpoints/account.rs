//! Private account endpoints
//!
//! These endpoints require authentication.

use cryptocom_types::ApiVersion;
use tracing::{debug, instrument};

use crate::client::CryptoComClient;
use crate::context::CallContext;
use crate::error::RestResult;
use crate::types::{BalanceHistory, BalanceHistoryRequest};

const METHOD_USER_BALANCE_HISTORY: &str = "private/user-balance-history";

/// Private account endpoints
#[derive(Debug, Clone)]
pub struct AccountEndpoints<'a> {
    client: &'a CryptoComClient,
    ctx: CallContext,
}

impl<'a> AccountEndpoints<'a> {
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

    /// Get the total balance of the account over time
    #[instrument(skip(self))]
    pub async fn user_balance_history(
        &self,
        request: &BalanceHistoryRequest,
    ) -> RestResult<BalanceHistory> {
        debug!("Getting balance history");
        self.client
            .call_private(
                METHOD_USER_BALANCE_HISTORY,
                request.to_params(),
                Some(ApiVersion::V1),
                &self.ctx,
            )
            .await
    }
}
