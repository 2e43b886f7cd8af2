//! Error types for REST API operations

use cryptocom_auth::AuthError;
use cryptocom_types::{ExchangeError, ExchangeErrorKind};

use crate::transport::TransportError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// A request parameter is outside its documented bounds
    ///
    /// Raised before anything is sent.
    #[error("Invalid parameter {parameter}: {reason}")]
    InvalidParameter {
        /// Parameter name
        parameter: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// The request never produced an HTTP response
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The body was not a valid response envelope
    #[error("Decoding error (HTTP {status}): {message}")]
    Decoding {
        /// HTTP status of the response
        status: u16,
        /// What could not be decoded
        message: String,
    },

    /// The exchange rejected the request
    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    /// Credentials could not be used
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,
}

impl RestError {
    pub(crate) fn invalid_parameter(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    /// The exchange error, if the exchange rejected the request
    pub fn exchange_error(&self) -> Option<&ExchangeError> {
        match self {
            Self::Exchange(err) => Some(err),
            _ => None,
        }
    }

    /// Check if the exchange rejected the request with `kind`
    pub fn is_exchange_kind(&self, kind: ExchangeErrorKind) -> bool {
        self.exchange_error().is_some_and(|err| err.is(kind))
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        self.exchange_error().is_some_and(ExchangeError::is_rate_limit)
    }

    /// Check if the call was cancelled by the caller
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Cancelled))
    }

    /// Check if the call ran past its deadline
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Timeout))
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
