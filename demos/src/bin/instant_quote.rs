//! Demo 1: Instant Exchange Quote
//!
//! Showcases: Orderbook walking with decimal precision, pacing, Ctrl-C
//! cancellation
//!
//! Run: cargo run --bin instant_quote -- ETHCLP sell 1.5

use colored::*;
use cryptomkt_rest::{CryptoMktClient, FixedInterval, RestError, WalkOptions};
use cryptomkt_types::Side;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let market = args.next().unwrap_or_else(|| "ETHCLP".to_string());
    let side = Side::from_str(&args.next().unwrap_or_else(|| "sell".to_string()))?;
    let amount = Decimal::from_str(&args.next().unwrap_or_else(|| "1".to_string()))?;

    println!("{}", "═".repeat(65).cyan());
    println!("{}", "  INSTANT EXCHANGE QUOTE".cyan().bold());
    println!("{}", "  CryptoMarket REST Demo - Orderbook Walk".cyan());
    println!("{}", "═".repeat(65).cyan());
    println!();

    let client = CryptoMktClient::new()?;

    let token = CancellationToken::new();
    let on_signal = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let walker = client
        .liquidity_walker()
        .with_options(WalkOptions::default().with_deadline(Duration::from_secs(60)))
        .with_pacer(FixedInterval::reference())
        .with_cancellation(token);

    println!(
        "  {} {} {} on {}",
        "Estimating".yellow(),
        side.to_string().bold(),
        amount,
        market.bold()
    );
    println!();

    match walker.estimate(&market, side, amount).await {
        Ok(estimate) => {
            println!("  {:<12} {}", "Required:".white().bold(), estimate.required);
            println!("  {:<12} {}", "Obtained:".white().bold(), estimate.obtained);
            if let Some(price) = estimate.average_price(side) {
                println!("  {:<12} {:.2}", "Avg price:".white().bold(), price);
            }
            if estimate.is_partial_fill() {
                println!();
                println!(
                    "  {} book exhausted, {} of {} could not be matched",
                    "⚠".yellow(),
                    estimate.shortfall(),
                    amount
                );
            } else {
                println!();
                println!("  {} fully matched", "✓".green());
            }
        }
        Err(RestError::Cancelled) => println!("  {} cancelled", "✗".red()),
        Err(e) => println!("  {} {}", "✗".red(), e),
    }

    // Compare with the server's own quote when credentials are around
    if let Ok(config) = cryptomkt_rest::ClientConfig::new().with_env_credentials() {
        let auth_client = CryptoMktClient::with_config(config)?;
        match auth_client.get_instant(&market, side, amount).await {
            Ok(quote) => {
                println!();
                println!(
                    "  {} required {} / obtained {}",
                    "Server quote:".cyan(),
                    quote.required,
                    quote.obtained
                );
            }
            Err(e) => println!("  {} server quote failed: {}", "✗".red(), e),
        }
    }

    Ok(())
}
