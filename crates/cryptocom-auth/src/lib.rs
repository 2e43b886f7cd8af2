//! Request signing for the Crypto.com Exchange API
//!
//! Private endpoints are authenticated with an HMAC-SHA256 signature over the
//! method, request id, API key, the canonical parameter string and the nonce.
//! This crate provides each piece of that protocol as a small, swappable
//! capability:
//!
//! - [`canonicalize`] - deterministic flattening of [`Params`](cryptocom_types::Params)
//! - [`SignatureGenerator`] / [`HmacSha256Signer`] - the keyed hash
//! - [`Clock`] / [`SystemClock`] - nonce source in milliseconds
//! - [`IdGenerator`] / [`AtomicIdGenerator`] - request ids
//! - [`Credentials`] / [`CredentialStore`] - key pair with safe rotation
//!
//! # Example
//!
//! ```
//! use cryptocom_auth::{canonicalize, Credentials, HmacSha256Signer, SignatureGenerator, SignatureRequest};
//! use cryptocom_types::Params;
//!
//! let creds = Credentials::new("k", "secret").unwrap();
//! let params = Params::new().with("currency", "BTC").with("page", 0);
//! let canonical = canonicalize(&params);
//! assert_eq!(canonical, "currencyBTCpage0");
//!
//! let sig = HmacSha256Signer
//!     .sign(&SignatureRequest {
//!         secret_key: creds.secret_key(),
//!         method: "private/get-deposit-history",
//!         id: 1,
//!         api_key: creds.api_key(),
//!         canonical_params: &canonical,
//!         nonce: 1_668_066_540_018,
//!     })
//!     .unwrap();
//! assert_eq!(sig.len(), 64);
//! ```

mod canonical;
mod clock;
mod credentials;
mod error;
mod id;
mod signer;

pub use canonical::canonicalize;
pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::{CredentialStore, Credentials};
pub use error::{AuthError, AuthResult};
pub use id::{AtomicIdGenerator, FixedIdGenerator, IdGenerator, RandomIdGenerator};
pub use signer::{FixedSignatureGenerator, HmacSha256Signer, SignatureGenerator, SignatureRequest};
