//! Common test utilities and fixtures for integration tests
//!
//! Response bodies follow the shapes the exchange documents for each method.

#![allow(dead_code)]

use cryptocom_auth::{FixedClock, FixedIdGenerator};
use cryptocom_rest::{CryptoComClient, Credentials, MockTransport};
use std::sync::Arc;

/// Nonce used by every fixed-clock client
pub const NONCE: i64 = 1_668_066_540_018;

/// Successful empty deposit page
pub const EMPTY_DEPOSIT_PAGE: &str = r#"{
    "id": 1,
    "method": "private/get-deposit-history",
    "code": 0,
    "result": {"deposit_list": []}
}"#;

/// Date range rejection, code sent as a string as the v2 API does
pub const INVALID_DATE_RANGE: &str = r#"{
    "id": 1,
    "method": "private/get-deposit-history",
    "code": "10009",
    "message": "INVALID_DATE_RANGE"
}"#;

/// Ticker response for one instrument
pub const TICKERS_RESPONSE: &str = r#"{
    "id": -1,
    "method": "public/get-tickers",
    "code": 0,
    "result": {
        "data": [{
            "i": "BTC_USDT", "h": "27500.00", "l": "26500.00", "a": "27001.00",
            "v": "1234.5678", "vv": "33300000.00", "c": "0.0123",
            "b": "27000.50", "k": "27001.50", "oi": "0", "t": 1690000000000
        }]
    }
}"#;

/// Book response with one level per side
pub const BOOK_RESPONSE: &str = r#"{
    "id": -1,
    "method": "public/get-book",
    "code": 0,
    "result": {
        "depth": 10,
        "instrument_name": "BTC_USDT",
        "data": [{
            "bids": [["27000.50", "0.5", "2"]],
            "asks": [["27001.50", "1.25", "1"]],
            "t": 1690000000000
        }]
    }
}"#;

/// Deposit page with `count` deposits numbered from `first_id`
pub fn deposit_page(first_id: u32, count: u32) -> String {
    let deposits: Vec<String> = (first_id..first_id + count)
        .map(|id| {
            format!(
                r#"{{"currency":"BTC","fee":0.0005,"create_time":1668000000000,"id":"{}",
                    "update_time":1668000060000,"amount":"0.0100","address":"bc1q","status":"1"}}"#,
                id
            )
        })
        .collect();

    format!(
        r#"{{"id":1,"method":"private/get-deposit-history","code":0,"result":{{"deposit_list":[{}]}}}}"#,
        deposits.join(",")
    )
}

/// Client with a fixed clock and id, credentials `k`/`secret`, and a mock
/// transport
pub fn fixed_client() -> (CryptoComClient, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    let client = CryptoComClient::builder()
        .credentials(Credentials::new("k", "secret").expect("valid credentials"))
        .clock(Arc::new(FixedClock::new(NONCE)))
        .id_generator(Arc::new(FixedIdGenerator(1)))
        .transport(transport.clone())
        .build()
        .expect("client builds");
    (client, transport)
}

/// Public-only client with a mock transport
pub fn public_client() -> (CryptoComClient, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    let client = CryptoComClient::builder()
        .transport(transport.clone())
        .build()
        .expect("client builds");
    (client, transport)
}
