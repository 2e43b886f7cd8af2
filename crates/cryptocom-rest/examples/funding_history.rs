//! Example: market data and funding history
//!
//! Fetches a ticker and an order book, then walks every page of deposit
//! history one day at a time.
//!
//! Run with: cargo run --example funding_history
//!
//! NOTE: Set CRYPTOCOM_API_KEY and CRYPTOCOM_API_SECRET for the private part.

use chrono::{Duration, Utc};
use cryptocom_rest::{
    CryptoComClient, DepositHistoryRequest, ExchangeErrorKind, PageRequest, TimeRange,
    MAX_PAGE_SIZE,
};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("=== Crypto.com Exchange REST Example ===\n");

    // ========================================================================
    // PUBLIC ENDPOINTS - No authentication required
    // ========================================================================

    let client = CryptoComClient::new()?;

    println!("Fetching BTC_USDT ticker...");
    match client.get_tickers("BTC_USDT").await {
        Ok(tickers) => {
            for ticker in tickers {
                if let Some(last) = ticker.last_price {
                    println!("  Last Price: {}", last);
                }
                if let Some(spread_bps) = ticker.spread_bps() {
                    println!("  Spread:     {:.1} bps", spread_bps);
                }
            }
        }
        Err(e) => println!("  Error: {}", e),
    }
    println!();

    println!("Fetching BTC_USDT order book (depth=10)...");
    match client.get_book("BTC_USDT", 10).await {
        Ok(book) => {
            if let Some(snapshot) = book.snapshot() {
                println!("  Best Bid: {:?}", snapshot.best_bid());
                println!("  Best Ask: {:?}", snapshot.best_ask());
            }
        }
        Err(e) => println!("  Error: {}", e),
    }
    println!();

    // ========================================================================
    // PRIVATE ENDPOINTS - Authentication required
    // ========================================================================

    let (Ok(api_key), Ok(secret)) = (
        env::var("CRYPTOCOM_API_KEY"),
        env::var("CRYPTOCOM_API_SECRET"),
    ) else {
        println!("Skipping private endpoints (no credentials set)");
        return Ok(());
    };

    let client = CryptoComClient::with_credentials(api_key, secret)?;

    // The exchange rejects ranges over 24 hours, so walk three days in windows
    let end = Utc::now();
    let range = TimeRange::new(end - Duration::days(3), end);

    println!("Fetching deposit history for the last 3 days...");
    let mut total = 0;
    for window in range.daily_windows() {
        let request = DepositHistoryRequest::new()
            .with_time_range(window)
            .with_page(PageRequest::new(0, MAX_PAGE_SIZE));

        match client.get_all_deposit_history(&request).await {
            Ok(deposits) => {
                for deposit in &deposits {
                    println!(
                        "  {} {} {} (status {})",
                        deposit.create_time, deposit.amount, deposit.currency, deposit.status
                    );
                }
                total += deposits.len();
            }
            Err(e) if e.is_exchange_kind(ExchangeErrorKind::InvalidDateRange) => {
                println!("  Window rejected: {}", e);
            }
            Err(e) => {
                println!("  Error: {}", e);
                break;
            }
        }
    }
    println!("  {} deposits", total);

    Ok(())
}
