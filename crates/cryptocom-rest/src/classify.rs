//! Response classification
//!
//! | HTTP status | `code`               | Outcome                  |
//! |-------------|----------------------|--------------------------|
//! | < 400       | absent or `0`        | success                  |
//! | any         | integer, non-zero    | [`RestError::Exchange`]  |
//! | >= 400      | integer, any         | [`RestError::Exchange`]  |
//! | >= 400      | absent               | [`RestError::Decoding`]  |
//! | any         | not an integer       | [`RestError::Decoding`]  |

use cryptocom_types::{ExchangeError, ResponseEnvelope, WireNumber, SUCCESS_CODE};
use serde::de::DeserializeOwned;

use crate::error::{RestError, RestResult};

/// Classify a response by its HTTP status and body `code`
pub fn classify(http_status: u16, code: Option<&WireNumber>) -> RestResult<()> {
    let code = match code {
        Some(raw) => Some(raw.as_i64().ok_or_else(|| RestError::Decoding {
            status: http_status,
            message: format!("response code {:?} is not an integer", raw.as_str()),
        })?),
        None => None,
    };

    match code {
        Some(code) if http_status >= 400 || code != SUCCESS_CODE => {
            Err(ExchangeError::new(http_status, code).into())
        }
        Some(_) => Ok(()),
        None if http_status >= 400 => Err(RestError::Decoding {
            status: http_status,
            message: "error status without a response code".to_string(),
        }),
        None => Ok(()),
    }
}

/// Parse a response body into an envelope
pub fn decode_envelope(http_status: u16, body: &[u8]) -> RestResult<ResponseEnvelope> {
    serde_json::from_slice(body).map_err(|e| RestError::Decoding {
        status: http_status,
        message: format!("invalid response envelope: {}", e),
    })
}

/// Classify a response and decode its `result` as `T`
///
/// An absent `result` decodes as JSON `null`, so `T = ()` or `Option<_>`
/// accept responses that carry no payload.
pub fn decode_response<T: DeserializeOwned>(http_status: u16, body: &[u8]) -> RestResult<T> {
    let envelope = decode_envelope(http_status, body)?;
    classify(http_status, envelope.code.as_ref())?;

    let result = envelope.result.unwrap_or(serde_json::Value::Null);
    serde_json::from_value(result).map_err(|e| RestError::Decoding {
        status: http_status,
        message: format!("unexpected result payload: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptocom_types::ExchangeErrorKind;

    fn code(raw: &str) -> WireNumber {
        WireNumber::new(raw)
    }

    #[test]
    fn test_success() {
        assert!(classify(200, Some(&code("0"))).is_ok());
        assert!(classify(200, None).is_ok());
        assert!(classify(399, Some(&code("0"))).is_ok());
    }

    #[test]
    fn test_error_status_with_code() {
        let err = classify(401, Some(&code("10002"))).unwrap_err();
        match err {
            RestError::Exchange(e) => {
                assert_eq!(e.http_status, 401);
                assert_eq!(e.code, 10002);
                assert_eq!(e.kind, Some(ExchangeErrorKind::Unauthorized));
            }
            other => panic!("expected exchange error, got {:?}", other),
        }
    }

    #[test]
    fn test_nonzero_code_on_ok_status() {
        let err = classify(200, Some(&code("10009"))).unwrap_err();
        assert!(err.is_exchange_kind(ExchangeErrorKind::InvalidDateRange));
    }

    #[test]
    fn test_error_status_with_zero_code() {
        let err = classify(500, Some(&code("0"))).unwrap_err();
        let exchange = err.exchange_error().unwrap();
        assert_eq!(exchange.code, 0);
        assert_eq!(exchange.kind, None);
    }

    #[test]
    fn test_unknown_code_keeps_raw_value() {
        let err = classify(400, Some(&code("77777"))).unwrap_err();
        let exchange = err.exchange_error().unwrap();
        assert_eq!(exchange.code, 77777);
        assert_eq!(exchange.kind, None);
    }

    #[test]
    fn test_malformed_code_is_decoding_error() {
        let err = classify(200, Some(&code("oops"))).unwrap_err();
        assert!(matches!(err, RestError::Decoding { status: 200, .. }));

        let err = classify(400, Some(&code("oops"))).unwrap_err();
        assert!(matches!(err, RestError::Decoding { status: 400, .. }));
    }

    #[test]
    fn test_error_status_without_code_is_decoding_error() {
        let err = classify(502, None).unwrap_err();
        assert!(matches!(err, RestError::Decoding { status: 502, .. }));
    }

    #[test]
    fn test_decode_response_numeric_and_string_codes() {
        let ok: serde_json::Value = decode_response(
            200,
            br#"{"id":1,"method":"public/get-tickers","code":0,"result":{"data":[]}}"#,
        )
        .unwrap();
        assert_eq!(ok["data"], serde_json::json!([]));

        let err = decode_response::<serde_json::Value>(
            400,
            br#"{"id":"1","method":"private/get-deposit-history","code":"10009","message":"INVALID_DATE_RANGE"}"#,
        )
        .unwrap_err();
        assert!(err.is_exchange_kind(ExchangeErrorKind::InvalidDateRange));
    }

    #[test]
    fn test_decode_response_without_result() {
        decode_response::<()>(200, br#"{"id":1,"code":0}"#).unwrap();
    }

    #[test]
    fn test_non_json_body() {
        let err = decode_response::<serde_json::Value>(503, b"<html>Service Unavailable</html>")
            .unwrap_err();
        assert!(matches!(err, RestError::Decoding { status: 503, .. }));
    }

    #[test]
    fn test_wrong_result_shape() {
        let err = decode_response::<Vec<u64>>(200, br#"{"code":0,"result":{"not":"a list"}}"#)
            .unwrap_err();
        assert!(matches!(err, RestError::Decoding { .. }));
    }
}
