//! Demo 2: Order History
//!
//! Showcases: Page navigation and exhaustive draining of paginated endpoints
//!
//! Requires CRYPTOMKT_API_KEY and CRYPTOMKT_API_SECRET.
//!
//! Run: cargo run --bin order_history -- ETHCLP

use colored::*;
use cryptomkt_rest::{ClientConfig, CryptoMktClient, Paging, RestError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let market = std::env::args().nth(1).unwrap_or_else(|| "ETHCLP".to_string());

    println!("{}", "═".repeat(65).cyan());
    println!("{}", "  ORDER HISTORY".cyan().bold());
    println!("{}", "  CryptoMarket REST Demo - Pagination".cyan());
    println!("{}", "═".repeat(65).cyan());
    println!();

    let client = CryptoMktClient::with_config(ClientConfig::new().with_env_credentials()?)?;

    // Walk the executed orders page by page
    let mut page = client
        .trading()
        .get_executed_orders(&market, Paging::first(10))
        .await?;
    loop {
        println!(
            "  {} {} ({} orders)",
            "Page".yellow(),
            page.page_index(),
            page.len()
        );
        for order in &page {
            println!(
                "    {:<10} {:<5} {:>14} @ {:<12} {}",
                order.id,
                order.side,
                order.amount.original,
                order.price,
                order.status.dimmed()
            );
        }

        match client.next_page(&page).await {
            Ok(next) => page = next,
            Err(RestError::NoMorePages) => break,
            Err(e) => return Err(e.into()),
        }
    }
    println!();

    // Or collect everything at once, 100 per page
    let active = client.get_all_active_orders(&market).await?;
    println!(
        "  {} {} active orders on {}",
        "✓".green(),
        active.len(),
        market.bold()
    );

    let balances = client.get_balance().await?;
    for balance in balances {
        println!(
            "    {:<6} available {:>16}  held {:>16}",
            balance.wallet,
            balance.available,
            balance.held()
        );
    }

    Ok(())
}
