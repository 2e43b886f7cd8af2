//! Request and response envelopes exchanged with the REST API

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value::Params;

/// Endpoint-group path prefix
///
/// The exchange serves two API generations side by side; the prefix is
/// inserted between the base URL and the method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ApiVersion {
    /// `exchange/v1/`
    #[default]
    #[serde(rename = "exchange/v1/")]
    V1,
    /// `v2/`
    #[serde(rename = "v2/")]
    V2,
}

impl ApiVersion {
    /// Path prefix for this version
    pub fn path(&self) -> &'static str {
        match self {
            Self::V1 => "exchange/v1/",
            Self::V2 => "v2/",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Signed request body for private endpoints
///
/// Every field that entered the signature is private and only readable, so
/// an envelope cannot be altered between signing and transmission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEnvelope {
    id: u64,
    method: String,
    nonce: i64,
    params: Params,
    #[serde(rename = "sig")]
    signature: String,
    api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<ApiVersion>,
}

impl RequestEnvelope {
    /// Assemble an envelope from already-signed parts
    pub fn new(
        id: u64,
        method: impl Into<String>,
        nonce: i64,
        params: Params,
        signature: impl Into<String>,
        api_key: impl Into<String>,
        version: Option<ApiVersion>,
    ) -> Self {
        Self {
            id,
            method: method.into(),
            nonce,
            params,
            signature: signature.into(),
            api_key: api_key.into(),
            version,
        }
    }

    /// Request identifier
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Dotted method name, e.g. `private/get-deposit-history`
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Client timestamp in milliseconds used as the nonce
    pub fn nonce(&self) -> i64 {
        self.nonce
    }

    /// Signed parameters
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Lowercase hex signature
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// API key the request was signed for
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Endpoint-group version
    pub fn version(&self) -> Option<ApiVersion> {
        self.version
    }

    /// Serialize to the JSON request body
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// Unsigned request for public endpoints
///
/// Public endpoints take their parameters as URL query pairs and carry no
/// body, key or signature.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicRequest {
    id: u64,
    method: String,
    nonce: i64,
    params: Params,
    version: Option<ApiVersion>,
}

impl PublicRequest {
    /// Assemble a public request
    pub fn new(
        id: u64,
        method: impl Into<String>,
        nonce: i64,
        params: Params,
        version: Option<ApiVersion>,
    ) -> Self {
        Self {
            id,
            method: method.into(),
            nonce,
            params,
            version,
        }
    }

    /// Request identifier
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Dotted method name, e.g. `public/get-book`
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Client timestamp in milliseconds
    pub fn nonce(&self) -> i64 {
        self.nonce
    }

    /// Query parameters
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Endpoint-group version
    pub fn version(&self) -> Option<ApiVersion> {
        self.version
    }

    /// Parameters as URL query pairs
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.params.to_query_pairs()
    }
}

/// JSON field that the exchange sends either as a number or a numeric string
///
/// The raw text is kept so a malformed value can be reported as-is instead of
/// being silently coerced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WireNumber(String);

impl WireNumber {
    /// Wrap raw text
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw text as received
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse as a signed integer
    pub fn as_i64(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for WireNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for WireNumber {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for WireNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WireNumberVisitor;

        impl<'de> Visitor<'de> for WireNumberVisitor {
            type Value = WireNumber;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or a string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(WireNumber(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(WireNumber(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(WireNumber(v.to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(WireNumber(v.to_string()))
            }
        }

        deserializer.deserialize_any(WireNumberVisitor)
    }
}

/// Response envelope with an undecoded `result`
///
/// The classifier inspects `code` before the endpoint-specific payload is
/// decoded, so a rejected call never fails on an unexpected result shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseEnvelope {
    /// Echoed request id
    #[serde(default)]
    pub id: Option<WireNumber>,
    /// Echoed method name
    #[serde(default)]
    pub method: Option<String>,
    /// Response code, `0` or absent on success
    #[serde(default)]
    pub code: Option<WireNumber>,
    /// Optional human-readable message sent alongside errors
    #[serde(default)]
    pub message: Option<String>,
    /// Endpoint-specific payload
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_envelope_wire_format() {
        let envelope = RequestEnvelope::new(
            1,
            "private/get-deposit-history",
            1_668_066_540_018,
            Params::new().with("currency", "BTC").with("page", 0),
            "abc123",
            "k",
            None,
        );

        let body: serde_json::Value = serde_json::from_slice(&envelope.to_json().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "id": 1,
                "method": "private/get-deposit-history",
                "nonce": 1_668_066_540_018_i64,
                "params": {"currency": "BTC", "page": 0},
                "sig": "abc123",
                "api_key": "k",
            })
        );
    }

    #[test]
    fn test_request_envelope_version_serialized_when_set() {
        let envelope = RequestEnvelope::new(
            7,
            "private/user-balance-history",
            1,
            Params::new(),
            "sig",
            "key",
            Some(ApiVersion::V1),
        );

        let body: serde_json::Value = serde_json::from_slice(&envelope.to_json().unwrap()).unwrap();
        assert_eq!(body["version"], "exchange/v1/");
        assert_eq!(body["params"], json!({}));
    }

    #[test]
    fn test_wire_number_accepts_number_and_string() {
        let response: ResponseEnvelope =
            serde_json::from_str(r#"{"id": "42", "method": "m", "code": 10003}"#).unwrap();

        assert_eq!(response.id.unwrap().as_i64(), Some(42));
        assert_eq!(response.code.unwrap().as_i64(), Some(10003));
    }

    #[test]
    fn test_wire_number_keeps_malformed_text() {
        let response: ResponseEnvelope =
            serde_json::from_str(r#"{"code": "not-a-number"}"#).unwrap();

        let code = response.code.unwrap();
        assert_eq!(code.as_i64(), None);
        assert_eq!(code.as_str(), "not-a-number");
    }

    #[test]
    fn test_missing_code_and_result() {
        let response: ResponseEnvelope = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(response.code.is_none());
        assert!(response.result.is_none());
    }

    #[test]
    fn test_public_request_query_pairs() {
        let request = PublicRequest::new(
            3,
            "public/get-book",
            0,
            Params::new().with("instrument_name", "BTC_USDT").with("depth", 10),
            Some(ApiVersion::V2),
        );

        assert_eq!(request.query_pairs().len(), 2);
        assert_eq!(request.version().unwrap().path(), "v2/");
    }
}
