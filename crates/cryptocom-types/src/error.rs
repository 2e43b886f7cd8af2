//! Error types for building parameters from untyped JSON

use thiserror::Error;

/// Errors raised when converting arbitrary JSON into [`crate::ParamValue`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// Numeric literal that is neither an `i64` nor representable as a decimal
    #[error("unsupported number literal: {0}")]
    UnsupportedNumber(String),

    /// Top-level value was not a JSON object
    #[error("params must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParamsError::UnsupportedNumber("1e400".to_string());
        assert!(err.to_string().contains("1e400"));
    }
}
