//! Crypto.com Exchange response code mapping
//!
//! The exchange reports failures as a numeric `code` in the response body.
//! Known codes map to an [`ExchangeErrorKind`]; unknown codes are kept
//! verbatim on the [`ExchangeError`] with `kind == None`.

use thiserror::Error;

/// Response code that denotes success
pub const SUCCESS_CODE: i64 = 0;

/// Broad grouping of exchange error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Exchange-side failures (system error, unknown method)
    System,
    /// Key, signature, nonce, IP or account-tier problems
    Authentication,
    /// Malformed or out-of-range request
    Request,
    /// Request throttled
    RateLimit,
    /// Account state (balances, duplicates)
    Account,
    /// Order validation
    Order,
    /// Margin trading
    Margin,
    /// Deposits and withdrawals
    Funding,
}

/// All response codes the client recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeErrorKind {
    // === 1xxxx: general ===
    /// 10001 SYS_ERROR
    SystemError,
    /// 10002 UNAUTHORIZED
    Unauthorized,
    /// 10003 IP_ILLEGAL
    IllegalIp,
    /// 10004 BAD_REQUEST
    BadRequest,
    /// 10005 USER_TIER_INVALID
    UserTierInvalid,
    /// 10006 TOO_MANY_REQUESTS
    TooManyRequests,
    /// 10007 INVALID_NONCE
    InvalidNonce,
    /// 10008 METHOD_NOT_FOUND
    MethodNotFound,
    /// 10009 INVALID_DATE_RANGE
    InvalidDateRange,

    // === 2xxxx: account ===
    /// 20001 DUPLICATE_RECORD
    DuplicateRecord,
    /// 20002 NEGATIVE_BALANCE
    InsufficientBalance,

    // === 3xxxx: orders ===
    /// 30003 SYMBOL_NOT_FOUND
    SymbolNotFound,
    /// 30004 SIDE_NOT_SUPPORTED
    SideNotSupported,
    /// 30005 ORDERTYPE_NOT_SUPPORTED
    OrderTypeNotSupported,
    /// 30006 MIN_PRICE_VIOLATED
    MinPriceViolated,
    /// 30007 MAX_PRICE_VIOLATED
    MaxPriceViolated,
    /// 30008 MIN_QUANTITY_VIOLATED
    MinQuantityViolated,
    /// 30009 MAX_QUANTITY_VIOLATED
    MaxQuantityViolated,
    /// 30010 MISSING_ARGUMENT
    MissingArgument,
    /// 30013 INVALID_PRICE_PRECISION
    InvalidPricePrecision,
    /// 30014 INVALID_QUANTITY_PRECISION
    InvalidQuantityPrecision,
    /// 30016 MIN_NOTIONAL_VIOLATED
    MinNotionalViolated,
    /// 30017 MAX_NOTIONAL_VIOLATED
    MaxNotionalViolated,
    /// 30023 MIN_AMOUNT_VIOLATED
    MinAmountViolated,
    /// 30024 MAX_AMOUNT_VIOLATED
    MaxAmountViolated,
    /// 30025 AMOUNT_PRECISION_OVERFLOW
    AmountPrecisionOverflow,

    // === 4xxxx: margin ===
    /// 40001 MG_INVALID_ACCOUNT_STATUS
    MarginInvalidAccountStatus,
    /// 40002 MG_TRANSFER_ACTIVE_LOAN
    MarginTransferActiveLoan,
    /// 40003 MG_INVALID_LOAN_CURRENCY
    MarginInvalidLoanCurrency,
    /// 40004 MG_INVALID_REPAY_AMOUNT
    MarginInvalidRepayAmount,
    /// 40005 MG_NO_ACTIVE_LOAN
    MarginNoActiveLoan,
    /// 40006 MG_BLOCKED_BORROW
    MarginBlockedBorrow,
    /// 40007 MG_BLOCKED_NEW_ORDER
    MarginBlockedNewOrder,

    // === 5xxxx: deposits / withdrawals ===
    /// 50001 DW_CREDIT_LINE_NOT_MAINTAINED
    CreditLineNotMaintained,
}

impl ExchangeErrorKind {
    /// Map a numeric response code to a known kind
    ///
    /// The `exchange/v1` generation reports authentication failures in the
    /// 401xx/429xx range; those alias onto the same kinds as their `v2`
    /// counterparts.
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            10001 => Self::SystemError,
            10002 | 40101 => Self::Unauthorized,
            10003 | 40103 => Self::IllegalIp,
            10004 => Self::BadRequest,
            10005 | 40104 => Self::UserTierInvalid,
            10006 | 42901 => Self::TooManyRequests,
            10007 | 40102 => Self::InvalidNonce,
            10008 => Self::MethodNotFound,
            10009 => Self::InvalidDateRange,

            20001 => Self::DuplicateRecord,
            20002 => Self::InsufficientBalance,

            30003 => Self::SymbolNotFound,
            30004 => Self::SideNotSupported,
            30005 => Self::OrderTypeNotSupported,
            30006 => Self::MinPriceViolated,
            30007 => Self::MaxPriceViolated,
            30008 => Self::MinQuantityViolated,
            30009 => Self::MaxQuantityViolated,
            30010 => Self::MissingArgument,
            30013 => Self::InvalidPricePrecision,
            30014 => Self::InvalidQuantityPrecision,
            30016 => Self::MinNotionalViolated,
            30017 => Self::MaxNotionalViolated,
            30023 => Self::MinAmountViolated,
            30024 => Self::MaxAmountViolated,
            30025 => Self::AmountPrecisionOverflow,

            40001 => Self::MarginInvalidAccountStatus,
            40002 => Self::MarginTransferActiveLoan,
            40003 => Self::MarginInvalidLoanCurrency,
            40004 => Self::MarginInvalidRepayAmount,
            40005 => Self::MarginNoActiveLoan,
            40006 => Self::MarginBlockedBorrow,
            40007 => Self::MarginBlockedNewOrder,

            50001 => Self::CreditLineNotMaintained,

            _ => return None,
        })
    }

    /// Primary numeric code for this kind
    pub fn code(&self) -> i64 {
        match self {
            Self::SystemError => 10001,
            Self::Unauthorized => 10002,
            Self::IllegalIp => 10003,
            Self::BadRequest => 10004,
            Self::UserTierInvalid => 10005,
            Self::TooManyRequests => 10006,
            Self::InvalidNonce => 10007,
            Self::MethodNotFound => 10008,
            Self::InvalidDateRange => 10009,
            Self::DuplicateRecord => 20001,
            Self::InsufficientBalance => 20002,
            Self::SymbolNotFound => 30003,
            Self::SideNotSupported => 30004,
            Self::OrderTypeNotSupported => 30005,
            Self::MinPriceViolated => 30006,
            Self::MaxPriceViolated => 30007,
            Self::MinQuantityViolated => 30008,
            Self::MaxQuantityViolated => 30009,
            Self::MissingArgument => 30010,
            Self::InvalidPricePrecision => 30013,
            Self::InvalidQuantityPrecision => 30014,
            Self::MinNotionalViolated => 30016,
            Self::MaxNotionalViolated => 30017,
            Self::MinAmountViolated => 30023,
            Self::MaxAmountViolated => 30024,
            Self::AmountPrecisionOverflow => 30025,
            Self::MarginInvalidAccountStatus => 40001,
            Self::MarginTransferActiveLoan => 40002,
            Self::MarginInvalidLoanCurrency => 40003,
            Self::MarginInvalidRepayAmount => 40004,
            Self::MarginNoActiveLoan => 40005,
            Self::MarginBlockedBorrow => 40006,
            Self::MarginBlockedNewOrder => 40007,
            Self::CreditLineNotMaintained => 50001,
        }
    }

    /// Exchange's symbolic name, e.g. `INVALID_DATE_RANGE`
    pub fn name(&self) -> &'static str {
        match self {
            Self::SystemError => "SYS_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::IllegalIp => "IP_ILLEGAL",
            Self::BadRequest => "BAD_REQUEST",
            Self::UserTierInvalid => "USER_TIER_INVALID",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::InvalidNonce => "INVALID_NONCE",
            Self::MethodNotFound => "METHOD_NOT_FOUND",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::DuplicateRecord => "DUPLICATE_RECORD",
            Self::InsufficientBalance => "NEGATIVE_BALANCE",
            Self::SymbolNotFound => "SYMBOL_NOT_FOUND",
            Self::SideNotSupported => "SIDE_NOT_SUPPORTED",
            Self::OrderTypeNotSupported => "ORDERTYPE_NOT_SUPPORTED",
            Self::MinPriceViolated => "MIN_PRICE_VIOLATED",
            Self::MaxPriceViolated => "MAX_PRICE_VIOLATED",
            Self::MinQuantityViolated => "MIN_QUANTITY_VIOLATED",
            Self::MaxQuantityViolated => "MAX_QUANTITY_VIOLATED",
            Self::MissingArgument => "MISSING_ARGUMENT",
            Self::InvalidPricePrecision => "INVALID_PRICE_PRECISION",
            Self::InvalidQuantityPrecision => "INVALID_QUANTITY_PRECISION",
            Self::MinNotionalViolated => "MIN_NOTIONAL_VIOLATED",
            Self::MaxNotionalViolated => "MAX_NOTIONAL_VIOLATED",
            Self::MinAmountViolated => "MIN_AMOUNT_VIOLATED",
            Self::MaxAmountViolated => "MAX_AMOUNT_VIOLATED",
            Self::AmountPrecisionOverflow => "AMOUNT_PRECISION_OVERFLOW",
            Self::MarginInvalidAccountStatus => "MG_INVALID_ACCOUNT_STATUS",
            Self::MarginTransferActiveLoan => "MG_TRANSFER_ACTIVE_LOAN",
            Self::MarginInvalidLoanCurrency => "MG_INVALID_LOAN_CURRENCY",
            Self::MarginInvalidRepayAmount => "MG_INVALID_REPAY_AMOUNT",
            Self::MarginNoActiveLoan => "MG_NO_ACTIVE_LOAN",
            Self::MarginBlockedBorrow => "MG_BLOCKED_BORROW",
            Self::MarginBlockedNewOrder => "MG_BLOCKED_NEW_ORDER",
            Self::CreditLineNotMaintained => "DW_CREDIT_LINE_NOT_MAINTAINED",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::SystemError => "Malformed request or internal exchange error",
            Self::Unauthorized => "Not authenticated, or key/signature incorrect",
            Self::IllegalIp => "IP address not whitelisted",
            Self::BadRequest => "Missing required fields",
            Self::UserTierInvalid => "Disallowed based on user tier",
            Self::TooManyRequests => "Requests have exceeded rate limits",
            Self::InvalidNonce => "Nonce value differs by more than 30 seconds from server",
            Self::MethodNotFound => "Invalid method specified",
            Self::InvalidDateRange => "Invalid date range",
            Self::DuplicateRecord => "Duplicated record",
            Self::InsufficientBalance => "Insufficient balance",
            Self::SymbolNotFound => "Invalid instrument name specified",
            Self::SideNotSupported => "Invalid side specified",
            Self::OrderTypeNotSupported => "Invalid order type specified",
            Self::MinPriceViolated => "Price is lower than the minimum",
            Self::MaxPriceViolated => "Price is higher than the maximum",
            Self::MinQuantityViolated => "Quantity is lower than the minimum",
            Self::MaxQuantityViolated => "Quantity is higher than the maximum",
            Self::MissingArgument => "Required argument is blank or missing",
            Self::InvalidPricePrecision => "Too many decimal places for price",
            Self::InvalidQuantityPrecision => "Too many decimal places for quantity",
            Self::MinNotionalViolated => "Order value is lower than the minimum notional",
            Self::MaxNotionalViolated => "Order value is higher than the maximum notional",
            Self::MinAmountViolated => "Amount is lower than the minimum",
            Self::MaxAmountViolated => "Amount is higher than the maximum",
            Self::AmountPrecisionOverflow => "Amount precision exceeds the allowed decimals",
            Self::MarginInvalidAccountStatus => "Operation has failed due to margin account status",
            Self::MarginTransferActiveLoan => "Collateral transfer is blocked by an active loan",
            Self::MarginInvalidLoanCurrency => "Currency is not the same as the loan currency",
            Self::MarginInvalidRepayAmount => "Only repayment of the full outstanding loan is allowed",
            Self::MarginNoActiveLoan => "No active loan",
            Self::MarginBlockedBorrow => "Borrowing is temporarily suspended",
            Self::MarginBlockedNewOrder => "New orders are temporarily suspended",
            Self::CreditLineNotMaintained => "Credit line is not maintained",
        }
    }

    /// Grouping of this kind
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SystemError | Self::MethodNotFound => ErrorCategory::System,
            Self::Unauthorized | Self::IllegalIp | Self::UserTierInvalid | Self::InvalidNonce => {
                ErrorCategory::Authentication
            }
            Self::BadRequest | Self::InvalidDateRange | Self::MissingArgument => {
                ErrorCategory::Request
            }
            Self::TooManyRequests => ErrorCategory::RateLimit,
            Self::DuplicateRecord | Self::InsufficientBalance => ErrorCategory::Account,
            Self::SymbolNotFound
            | Self::SideNotSupported
            | Self::OrderTypeNotSupported
            | Self::MinPriceViolated
            | Self::MaxPriceViolated
            | Self::MinQuantityViolated
            | Self::MaxQuantityViolated
            | Self::InvalidPricePrecision
            | Self::InvalidQuantityPrecision
            | Self::MinNotionalViolated
            | Self::MaxNotionalViolated
            | Self::MinAmountViolated
            | Self::MaxAmountViolated
            | Self::AmountPrecisionOverflow => ErrorCategory::Order,
            Self::MarginInvalidAccountStatus
            | Self::MarginTransferActiveLoan
            | Self::MarginInvalidLoanCurrency
            | Self::MarginInvalidRepayAmount
            | Self::MarginNoActiveLoan
            | Self::MarginBlockedBorrow
            | Self::MarginBlockedNewOrder => ErrorCategory::Margin,
            Self::CreditLineNotMaintained => ErrorCategory::Funding,
        }
    }

    /// Check if this is an authentication-related error
    pub fn is_auth_error(&self) -> bool {
        self.category() == ErrorCategory::Authentication
    }

    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        self.category() == ErrorCategory::RateLimit
    }
}

/// A request the exchange rejected
///
/// Always carries the HTTP status and the raw numeric code; `kind` is set
/// only when the code is one the client recognizes.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error(
    "exchange rejected request with code {code} (HTTP {http_status}): {}",
    .kind.map(|k| k.description()).unwrap_or("unrecognized response code")
)]
pub struct ExchangeError {
    /// HTTP status code of the response
    pub http_status: u16,
    /// Raw response code from the body
    pub code: i64,
    /// Mapped kind, `None` for unrecognized codes
    pub kind: Option<ExchangeErrorKind>,
}

impl ExchangeError {
    /// Build from a status and code, looking the code up in the table
    pub fn new(http_status: u16, code: i64) -> Self {
        Self {
            http_status,
            code,
            kind: ExchangeErrorKind::from_code(code),
        }
    }

    /// Check whether this error is the given kind
    pub fn is(&self, kind: ExchangeErrorKind) -> bool {
        self.kind == Some(kind)
    }

    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        self.kind.is_some_and(|k| k.is_rate_limit())
    }

    /// Check if this error requires fixing credentials or whitelisting
    pub fn is_auth_error(&self) -> bool {
        self.kind.is_some_and(|k| k.is_auth_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_code_maps_to_kind() {
        let error = ExchangeError::new(401, 10003);
        assert_eq!(error.kind, Some(ExchangeErrorKind::IllegalIp));
        assert_eq!(error.http_status, 401);
        assert_eq!(error.code, 10003);
        assert!(error.is(ExchangeErrorKind::IllegalIp));
        assert!(!error.is(ExchangeErrorKind::InsufficientBalance));
        assert!(error.is_auth_error());
    }

    #[test]
    fn test_unknown_code_is_preserved() {
        let error = ExchangeError::new(500, 99999);
        assert_eq!(error.kind, None);
        assert_eq!(error.code, 99999);
        assert!(error.to_string().contains("99999"));
        assert!(error.to_string().contains("unrecognized"));
    }

    #[test]
    fn test_v1_codes_alias_v2_kinds() {
        assert_eq!(ExchangeErrorKind::from_code(40101), Some(ExchangeErrorKind::Unauthorized));
        assert_eq!(ExchangeErrorKind::from_code(42901), Some(ExchangeErrorKind::TooManyRequests));
        assert_eq!(ExchangeErrorKind::from_code(40102), Some(ExchangeErrorKind::InvalidNonce));
    }

    #[test]
    fn test_code_round_trips_through_table() {
        let kinds = [
            ExchangeErrorKind::SystemError,
            ExchangeErrorKind::InvalidDateRange,
            ExchangeErrorKind::InsufficientBalance,
            ExchangeErrorKind::AmountPrecisionOverflow,
            ExchangeErrorKind::MarginBlockedNewOrder,
            ExchangeErrorKind::CreditLineNotMaintained,
        ];
        for kind in kinds {
            assert_eq!(ExchangeErrorKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn test_success_code_is_not_an_error_kind() {
        assert_eq!(ExchangeErrorKind::from_code(SUCCESS_CODE), None);
    }

    #[test]
    fn test_categories() {
        assert!(ExchangeErrorKind::TooManyRequests.is_rate_limit());
        assert!(ExchangeErrorKind::InvalidNonce.is_auth_error());
        assert_eq!(
            ExchangeErrorKind::InvalidDateRange.category(),
            ErrorCategory::Request
        );
        assert_eq!(ExchangeErrorKind::InvalidDateRange.name(), "INVALID_DATE_RANGE");
    }
}
