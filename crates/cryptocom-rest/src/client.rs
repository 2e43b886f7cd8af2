//! Main REST client implementation

use cryptocom_auth::{
    AtomicIdGenerator, Clock, CredentialStore, Credentials, HmacSha256Signer, IdGenerator,
    SignatureGenerator, SystemClock,
};
use cryptocom_types::{ApiVersion, Params};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::classify::decode_response;
use crate::config::{ClientConfig, Environment};
use crate::context::CallContext;
use crate::endpoints::{AccountEndpoints, FundingEndpoints, MarketEndpoints};
use crate::envelope::EnvelopeBuilder;
use crate::error::{RestError, RestResult};
use crate::transport::{HttpRequest, ReqwestTransport, Transport, TransportError};
use crate::types::{
    BalanceHistory, BalanceHistoryRequest, BookResult, Deposit, DepositAddress,
    FundingHistoryRequest, Instrument, Ticker, Withdrawal, WithdrawalRequest, WithdrawalResult,
};

/// Crypto.com Exchange REST API client
///
/// Provides access to both public and private endpoints. Cloning is cheap and
/// clones share the transport, id sequence and credentials.
///
/// # Example
///
/// ```no_run
/// use cryptocom_rest::{CryptoComClient, DepositHistoryRequest};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = CryptoComClient::new()?;
///     let tickers = client.get_tickers("BTC_USDT").await?;
///
///     // With authentication for private endpoints
///     let auth_client = CryptoComClient::with_credentials("api-key", "secret-key")?;
///     let deposits = auth_client
///         .get_deposit_history(&DepositHistoryRequest::new().with_currency("BTC"))
///         .await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CryptoComClient {
    base_url: String,
    timeout: Duration,
    transport: Arc<dyn Transport>,
    envelopes: EnvelopeBuilder,
    credentials: Option<Arc<CredentialStore>>,
}

impl CryptoComClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::builder().build()
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> RestResult<Self> {
        Self::builder()
            .credentials(Credentials::new(api_key, secret_key)?)
            .build()
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        Self::builder().config(config).build()
    }

    /// Start building a client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the API key pair
    ///
    /// Requests that already started keep signing with the pair they
    /// started with. Clones of this client see the new pair too.
    pub fn update_credentials(
        &self,
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> RestResult<()> {
        let credentials = Credentials::new(api_key, secret_key)?;
        let store = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        store.rotate(credentials);
        Ok(())
    }

    fn endpoint_url(&self, version: Option<ApiVersion>, method: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url,
            version.unwrap_or_default().path(),
            method
        )
    }

    // ========================================================================
    // Request Dispatch
    // ========================================================================

    /// Call a private method
    ///
    /// The envelope is signed with one snapshot of the credentials, sent as a
    /// JSON POST body and the response is classified before `result` is
    /// decoded as `T`. `version`, when set, picks the URL prefix and is also
    /// sent in the body; otherwise the `exchange/v1/` prefix is used.
    #[instrument(skip(self, params, ctx))]
    pub async fn call_private<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Params,
        version: Option<ApiVersion>,
        ctx: &CallContext,
    ) -> RestResult<T> {
        let store = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        let credentials = store.snapshot();

        let envelope = self
            .envelopes
            .build_private(method, params, &credentials, version)?;
        let body = envelope
            .to_json()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let request = HttpRequest::post_json(self.endpoint_url(version, method), body)
            .with_timeout(Some(self.timeout));

        debug!(id = envelope.id(), "Making authenticated request to {}", method);
        self.dispatch(request, ctx).await
    }

    /// Call a public method
    ///
    /// Parameters are sent as URL query pairs on a GET request.
    #[instrument(skip(self, params, ctx))]
    pub async fn call_public<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Params,
        version: Option<ApiVersion>,
        ctx: &CallContext,
    ) -> RestResult<T> {
        let public = self.envelopes.build_public(method, params, version);
        let request = HttpRequest::get(self.endpoint_url(version, method))
            .with_query(&public.query_pairs())?
            .with_timeout(Some(self.timeout));

        debug!(id = public.id(), "Making public request to {}", method);
        self.dispatch(request, ctx).await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        ctx: &CallContext,
    ) -> RestResult<T> {
        let response = ctx.run(self.transport.execute(request)).await?;
        decode_response(response.status, &response.body)
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Get all supported instruments
    pub async fn get_instruments(&self) -> RestResult<Vec<Instrument>> {
        self.market().get_instruments().await
    }

    /// Get the order book for an instrument
    ///
    /// # Arguments
    /// * `instrument` - Instrument name (e.g., "BTC_USDT")
    /// * `depth` - Number of levels per side; `0` for the server default
    pub async fn get_book(&self, instrument: &str, depth: u32) -> RestResult<BookResult> {
        self.market().get_book(instrument, depth).await
    }

    /// Get tickers; an empty `instrument` returns every instrument
    pub async fn get_tickers(&self, instrument: &str) -> RestResult<Vec<Ticker>> {
        self.market().get_tickers(instrument).await
    }

    // ========================================================================
    // Private Funding Endpoints
    // ========================================================================

    /// Get funding endpoints (requires credentials)
    pub fn funding(&self) -> RestResult<FundingEndpoints<'_>> {
        if !self.has_credentials() {
            return Err(RestError::AuthRequired);
        }
        Ok(FundingEndpoints::new(self))
    }

    /// Get one page of deposit history
    pub async fn get_deposit_history(
        &self,
        request: &FundingHistoryRequest,
    ) -> RestResult<Vec<Deposit>> {
        self.funding()?.get_deposit_history(request).await
    }

    /// Get every page of deposit history, starting at `request`'s page
    pub async fn get_all_deposit_history(
        &self,
        request: &FundingHistoryRequest,
    ) -> RestResult<Vec<Deposit>> {
        self.funding()?.get_all_deposit_history(request).await
    }

    /// Get one page of withdrawal history
    pub async fn get_withdrawal_history(
        &self,
        request: &FundingHistoryRequest,
    ) -> RestResult<Vec<Withdrawal>> {
        self.funding()?.get_withdrawal_history(request).await
    }

    /// Get every page of withdrawal history, starting at `request`'s page
    pub async fn get_all_withdrawal_history(
        &self,
        request: &FundingHistoryRequest,
    ) -> RestResult<Vec<Withdrawal>> {
        self.funding()?.get_all_withdrawal_history(request).await
    }

    /// Get deposit addresses for a currency
    pub async fn get_deposit_address(&self, currency: &str) -> RestResult<Vec<DepositAddress>> {
        self.funding()?.get_deposit_address(currency).await
    }

    /// Withdraw funds
    pub async fn create_withdrawal(
        &self,
        request: &WithdrawalRequest,
    ) -> RestResult<WithdrawalResult> {
        self.funding()?.create_withdrawal(request).await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        if !self.has_credentials() {
            return Err(RestError::AuthRequired);
        }
        Ok(AccountEndpoints::new(self))
    }

    /// Get the account balance history
    pub async fn user_balance_history(
        &self,
        request: &BalanceHistoryRequest,
    ) -> RestResult<BalanceHistory> {
        self.account()?.user_balance_history(request).await
    }
}

impl std::fmt::Debug for CryptoComClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoComClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Builder for [`CryptoComClient`]
///
/// Every collaborator has a production default; tests swap in fixed clocks,
/// id sources, signers and a mock transport.
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    credentials: Option<Credentials>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
    signer: Option<Arc<dyn SignatureGenerator>>,
    transport: Option<Arc<dyn Transport>>,
    http_client: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Replace the whole configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the environment
    pub fn environment(mut self, environment: Environment) -> Self {
        self.config = self.config.with_environment(environment);
        self
    }

    /// Send requests to an explicit base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(base_url);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.with_user_agent(user_agent);
        self
    }

    /// Set the API key pair
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Nonce source
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Request id source
    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Request signer
    pub fn signer(mut self, signer: Arc<dyn SignatureGenerator>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Transport to send requests through
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Preconfigured HTTP client for the default transport
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the client
    pub fn build(self) -> RestResult<CryptoComClient> {
        let transport: Arc<dyn Transport> = match (self.transport, self.http_client) {
            (Some(transport), _) => transport,
            (None, Some(client)) => Arc::new(ReqwestTransport::from_client(client)),
            (None, None) => Arc::new(ReqwestTransport::new(
                self.config.timeout,
                self.config.resolved_user_agent(),
            )?),
        };

        let envelopes = EnvelopeBuilder::new(
            self.clock.unwrap_or_else(|| Arc::new(SystemClock::new())),
            self.ids.unwrap_or_else(|| Arc::new(AtomicIdGenerator::new())),
            self.signer.unwrap_or_else(|| Arc::new(HmacSha256Signer)),
        );

        let base_url = self.config.resolved_base_url().to_string();
        info!(base_url = %base_url, "Created Crypto.com REST client");

        Ok(CryptoComClient {
            base_url,
            timeout: self.config.timeout,
            transport,
            envelopes,
            credentials: self
                .credentials
                .map(|credentials| Arc::new(CredentialStore::new(credentials))),
        })
    }
}
