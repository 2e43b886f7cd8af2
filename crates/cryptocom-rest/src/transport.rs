//! HTTP transport abstraction
//!
//! The client never talks to `reqwest` directly. Every call goes through a
//! [`Transport`], so tests can replay canned responses and inspect exactly
//! what would have been sent.
//!
//! # Example
//!
//! With the `test-utils` feature enabled:
//!
//! ```
//! use cryptocom_rest::transport::{HttpRequest, MockTransport, Transport};
//!
//! # async fn example() -> Result<(), cryptocom_rest::transport::TransportError> {
//! let transport = MockTransport::new();
//! transport.push_json(200, r#"{"id":1,"method":"public/get-tickers","code":0,"result":{"data":[]}}"#);
//!
//! let response = transport.execute(HttpRequest::get("https://api.crypto.com/exchange/v1/public/get-tickers")).await?;
//! assert_eq!(response.status, 200);
//! assert_eq!(transport.request_count(), 1);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
#[cfg(any(test, feature = "test-utils"))]
use parking_lot::Mutex;
#[cfg(any(test, feature = "test-utils"))]
use std::collections::VecDeque;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Transport layer errors
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP client failure (connect, TLS, I/O)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request could not be constructed
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The call deadline passed before a response arrived
    #[error("request timed out")]
    Timeout,

    /// The caller cancelled the call
    #[error("request cancelled")]
    Cancelled,
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Public endpoints
    Get,
    /// Private endpoints
    Post,
}

/// A fully formed HTTP request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Method
    pub method: HttpMethod,
    /// Absolute URL including any query string
    pub url: String,
    /// Header name/value pairs
    pub headers: Vec<(String, String)>,
    /// Request body
    pub body: Option<Vec<u8>>,
    /// Per-request timeout enforced by the HTTP client
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// GET request without body
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    /// POST request with a JSON body
    pub fn post_json(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
            timeout: None,
        }
    }

    /// Append URL-encoded query pairs to the URL
    pub fn with_query(mut self, pairs: &[(String, String)]) -> Result<Self, TransportError> {
        if pairs.is_empty() {
            return Ok(self);
        }
        let query = serde_urlencoded::to_string(pairs)
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        let separator = if self.url.contains('?') { '&' } else { '?' };
        self.url = format!("{}{}{}", self.url, separator, query);
        Ok(self)
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Decoded query pairs of the URL, in order
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url
            .split_once('?')
            .and_then(|(_, query)| serde_urlencoded::from_str(query).ok())
            .unwrap_or_default()
    }

    /// Value of a header, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Body parsed as JSON
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_slice(body).ok())
    }
}

/// Raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Response body
    pub body: Vec<u8>,
}

/// Trait for HTTP transport abstraction
///
/// Implementations are shared across concurrent calls, so `execute` takes
/// `&self`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and wait for its response
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Real transport using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with its own connection pool
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Use a preconfigured HTTP client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        debug!(status, len = body.len(), "Received response");
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Http(err)
    }
}

/// Mock transport for testing
///
/// Replays queued responses in order and records every request it was
/// asked to send.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug)]
enum MockResponse {
    Ready(Result<HttpResponse, TransportError>),
    /// Never completes; used to exercise deadlines and cancellation
    Hang,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Create a mock with no queued responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and JSON body
    pub fn push_json(&self, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .push_back(MockResponse::Ready(Ok(HttpResponse {
                status,
                body: body.into().into_bytes(),
            })));
    }

    /// Queue a transport failure
    pub fn push_error(&self, error: TransportError) {
        self.responses.lock().push_back(MockResponse::Ready(Err(error)));
    }

    /// Queue a request that never completes
    pub fn push_hang(&self) {
        self.responses.lock().push_back(MockResponse::Hang);
    }

    /// Number of requests sent so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Copy of every request sent so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Most recent request
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request);
        let next = self.responses.lock().pop_front();
        match next {
            Some(MockResponse::Ready(result)) => result,
            Some(MockResponse::Hang) => std::future::pending().await,
            None => Err(TransportError::InvalidRequest(
                "mock transport has no queued response".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_url_encoded() {
        let request = HttpRequest::get("https://api.crypto.com/v2/public/get-book")
            .with_query(&[
                ("instrument_name".to_string(), "BTC_USDT".to_string()),
                ("note".to_string(), "a b&c".to_string()),
            ])
            .unwrap();

        assert_eq!(
            request.url,
            "https://api.crypto.com/v2/public/get-book?instrument_name=BTC_USDT&note=a+b%26c"
        );
        assert_eq!(
            request.query_pairs(),
            vec![
                ("instrument_name".to_string(), "BTC_USDT".to_string()),
                ("note".to_string(), "a b&c".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_query_leaves_url_alone() {
        let request = HttpRequest::get("https://x.test/a").with_query(&[]).unwrap();
        assert_eq!(request.url, "https://x.test/a");
        assert!(request.query_pairs().is_empty());
    }

    #[test]
    fn test_post_json_sets_content_type() {
        let request = HttpRequest::post_json("https://x.test/a", b"{}".to_vec());
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.json_body(), Some(serde_json::json!({})));
    }

    #[tokio::test]
    async fn test_mock_replays_in_order() {
        let transport = MockTransport::new();
        transport.push_json(200, "first");
        transport.push_error(TransportError::Timeout);

        let first = transport.execute(HttpRequest::get("https://x.test/1")).await.unwrap();
        assert_eq!(first.body, b"first");

        let second = transport.execute(HttpRequest::get("https://x.test/2")).await;
        assert!(matches!(second, Err(TransportError::Timeout)));

        // Exhausted queue
        assert!(transport.execute(HttpRequest::get("https://x.test/3")).await.is_err());

        let urls: Vec<_> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(urls, vec!["https://x.test/1", "https://x.test/2", "https://x.test/3"]);
    }
}
