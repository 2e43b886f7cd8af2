//! Request envelope assembly
//!
//! The builder owns the three shared capabilities a request needs (clock, id
//! source and signer) and turns a method name plus parameters into a
//! ready-to-send envelope.

use cryptocom_auth::{
    canonicalize, AtomicIdGenerator, Clock, Credentials, HmacSha256Signer, IdGenerator,
    SignatureGenerator, SignatureRequest, SystemClock,
};
use cryptocom_types::{ApiVersion, Params, PublicRequest, RequestEnvelope};
use std::sync::Arc;
use tracing::trace;

use crate::error::RestResult;

/// Builds signed and public request envelopes
#[derive(Clone)]
pub struct EnvelopeBuilder {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    signer: Arc<dyn SignatureGenerator>,
}

impl EnvelopeBuilder {
    /// Builder with explicit capabilities
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        signer: Arc<dyn SignatureGenerator>,
    ) -> Self {
        Self { clock, ids, signer }
    }

    /// Signed envelope for a private method
    ///
    /// `credentials` is read once; the key in the envelope is always the key
    /// the signature was computed with.
    pub fn build_private(
        &self,
        method: &str,
        params: Params,
        credentials: &Credentials,
        version: Option<ApiVersion>,
    ) -> RestResult<RequestEnvelope> {
        let id = self.ids.next_id();
        let nonce = self.clock.now_ms();
        let canonical = canonicalize(&params);

        let signature = self.signer.sign(&SignatureRequest {
            secret_key: credentials.secret_key(),
            method,
            id,
            api_key: credentials.api_key(),
            canonical_params: &canonical,
            nonce,
        })?;

        trace!(id, method, nonce, "Signed request");

        Ok(RequestEnvelope::new(
            id,
            method,
            nonce,
            params,
            signature,
            credentials.api_key(),
            version,
        ))
    }

    /// Unsigned request for a public method
    pub fn build_public(
        &self,
        method: &str,
        params: Params,
        version: Option<ApiVersion>,
    ) -> PublicRequest {
        PublicRequest::new(self.ids.next_id(), method, self.clock.now_ms(), params, version)
    }
}

impl Default for EnvelopeBuilder {
    fn default() -> Self {
        Self::new(
            Arc::new(SystemClock::new()),
            Arc::new(AtomicIdGenerator::new()),
            Arc::new(HmacSha256Signer),
        )
    }
}

impl std::fmt::Debug for EnvelopeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvelopeBuilder").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptocom_auth::{FixedClock, FixedIdGenerator};
    use serde_json::json;

    fn fixed_builder() -> EnvelopeBuilder {
        EnvelopeBuilder::new(
            Arc::new(FixedClock::new(1_668_066_540_018)),
            Arc::new(FixedIdGenerator(1)),
            Arc::new(HmacSha256Signer),
        )
    }

    #[test]
    fn test_golden_envelope() {
        let creds = Credentials::new("k", "secret").unwrap();
        let params = Params::new().with("currency", "BTC").with("page", 0);

        let envelope = fixed_builder()
            .build_private("private/get-deposit-history", params, &creds, None)
            .unwrap();

        assert_eq!(envelope.id(), 1);
        assert_eq!(envelope.nonce(), 1_668_066_540_018);
        assert_eq!(envelope.api_key(), "k");
        assert_eq!(
            envelope.signature(),
            "50982284143ce2e1b42f5b374d92a7c51ad5cc3f7fded984d2e86c3d69d6b769"
        );

        let body: serde_json::Value = serde_json::from_slice(&envelope.to_json().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "id": 1,
                "method": "private/get-deposit-history",
                "nonce": 1_668_066_540_018i64,
                "params": {"currency": "BTC", "page": 0},
                "sig": "50982284143ce2e1b42f5b374d92a7c51ad5cc3f7fded984d2e86c3d69d6b769",
                "api_key": "k",
            })
        );
    }

    #[test]
    fn test_version_is_serialized_when_set() {
        let creds = Credentials::new("k", "secret").unwrap();
        let envelope = fixed_builder()
            .build_private("private/user-balance-history", Params::new(), &creds, Some(ApiVersion::V1))
            .unwrap();

        let body: serde_json::Value = serde_json::from_slice(&envelope.to_json().unwrap()).unwrap();
        assert_eq!(body["version"], "exchange/v1/");
        assert_eq!(body["params"], json!({}));
    }

    #[test]
    fn test_each_build_uses_fresh_id_and_nonce() {
        let clock = Arc::new(FixedClock::new(1_000));
        let builder = EnvelopeBuilder::new(
            clock.clone(),
            Arc::new(AtomicIdGenerator::new()),
            Arc::new(HmacSha256Signer),
        );
        let creds = Credentials::new("k", "secret").unwrap();

        let first = builder
            .build_private("private/get-deposit-address", Params::new(), &creds, None)
            .unwrap();
        clock.advance(1);
        let second = builder
            .build_private("private/get-deposit-address", Params::new(), &creds, None)
            .unwrap();

        assert_eq!((first.id(), first.nonce()), (1, 1_000));
        assert_eq!((second.id(), second.nonce()), (2, 1_001));
        assert_ne!(first.signature(), second.signature());
    }

    #[test]
    fn test_public_request_has_no_signature() {
        let request = fixed_builder().build_public(
            "public/get-book",
            Params::new().with("instrument_name", "BTC_USDT").with("depth", 10),
            Some(ApiVersion::V2),
        );

        assert_eq!(request.id(), 1);
        assert_eq!(request.method(), "public/get-book");
        assert_eq!(
            request.query_pairs(),
            vec![
                ("depth".to_string(), "10".to_string()),
                ("instrument_name".to_string(), "BTC_USDT".to_string()),
            ]
        );
    }
}
