//! Shared wire types for the Crypto.com Exchange REST API
//!
//! This crate holds the data model every other crate in the workspace speaks:
//! request parameters, the request/response envelopes and the numeric
//! response-code taxonomy. It has no I/O and no async runtime.
//!
//! # Key Types
//!
//! - [`ParamValue`], [`Params`] - Ordered, JSON-like request parameters
//! - [`RequestEnvelope`], [`ResponseEnvelope`] - Envelope wire format
//! - [`WireNumber`] - Number-or-string fields such as `id` and `code`
//! - [`ApiVersion`] - Endpoint-group path prefix
//! - [`ExchangeError`], [`ExchangeErrorKind`] - Typed exchange rejections

pub mod error;
pub mod error_codes;
pub mod messages;
pub mod value;

pub use error::*;
pub use error_codes::*;
pub use messages::*;
pub use value::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
