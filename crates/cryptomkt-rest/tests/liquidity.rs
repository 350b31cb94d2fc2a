//! Integration tests for the liquidity walker

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use cryptomkt_rest::{
    CryptoMktClient, Endpoint, FixedInterval, LiquidityWalker, RestError, WalkOptions,
};
use cryptomkt_types::Side;
use rust_decimal_macros::dec;
use serde_json::json;
use tokio_util::sync::CancellationToken;

fn single_page(levels: &[(&str, &str)]) -> MockExecutor {
    MockExecutor::new().with_pages(Endpoint::Book, vec![book_page(levels)])
}

// =============================================================================
// Arithmetic
// =============================================================================

#[tokio::test]
async fn test_full_fill_inside_first_level() {
    let executor = single_page(&[("10", "5")]);
    let estimate = LiquidityWalker::new(&executor)
        .estimate("ETHCLP", Side::Sell, dec!(3))
        .await
        .unwrap();

    assert_eq!(estimate.required, dec!(3));
    assert_eq!(estimate.obtained, dec!(30));
    assert!(!estimate.is_partial_fill());
    assert_eq!(executor.call_count(), 1);
}

#[tokio::test]
async fn test_exhausted_book_is_partial_fill() {
    let executor = single_page(&[("10", "2"), ("9", "1")]);
    let estimate = LiquidityWalker::new(&executor)
        .estimate("ETHCLP", Side::Sell, dec!(5))
        .await
        .unwrap();

    assert_eq!(estimate.required, dec!(3));
    assert_eq!(estimate.obtained, dec!(29));
    assert_eq!(estimate.requested, dec!(5));
    assert!(estimate.is_partial_fill());
    assert_eq!(estimate.shortfall(), dec!(2));
}

#[tokio::test]
async fn test_buy_swaps_totals() {
    let executor = single_page(&[("10", "2"), ("12", "5")]);
    let estimate = LiquidityWalker::new(&executor)
        .estimate("ETHCLP", Side::Buy, dec!(3))
        .await
        .unwrap();

    // pays 2*10 + 1*12 quote for 3 base
    assert_eq!(estimate.required, dec!(32));
    assert_eq!(estimate.obtained, dec!(3));
    assert!(!estimate.is_partial_fill());
}

#[tokio::test]
async fn test_walk_spans_pages() {
    let executor = MockExecutor::new().with_pages(
        Endpoint::Book,
        vec![
            book_page(&[("100", "1")]),
            book_page(&[("99", "1")]),
            book_page(&[("98", "10")]),
            book_page(&[("97", "10")]),
        ],
    );

    let estimate = LiquidityWalker::new(&executor)
        .estimate("ETHCLP", Side::Sell, dec!(2.5))
        .await
        .unwrap();

    assert_eq!(estimate.required, dec!(2.5));
    assert_eq!(estimate.obtained, dec!(248));
    // stops once the amount is matched
    assert_eq!(executor.call_count(), 3);
}

#[tokio::test]
async fn test_empty_book_yields_zero_estimate() {
    let executor = MockExecutor::new().with_pages(Endpoint::Book, vec![json!([])]);
    let estimate = LiquidityWalker::new(&executor)
        .estimate("ETHCLP", Side::Buy, dec!(1))
        .await
        .unwrap();

    assert_eq!(estimate.obtained, dec!(0));
    assert_eq!(estimate.required, dec!(0));
    assert!(estimate.is_partial_fill());
}

// =============================================================================
// Requests
// =============================================================================

#[tokio::test]
async fn test_side_inversion() {
    let executor = single_page(&[("10", "100")]);
    let walker = LiquidityWalker::new(&executor);

    walker.estimate("ETHCLP", Side::Sell, dec!(1)).await.unwrap();
    walker.estimate("ETHCLP", Side::Buy, dec!(1)).await.unwrap();

    let calls = executor.calls();
    assert_eq!(calls[0].params.get("type"), Some("buy"));
    assert_eq!(calls[1].params.get("type"), Some("sell"));
    assert!(calls.iter().all(|c| c.endpoint == Endpoint::Book));
    assert!(calls.iter().all(|c| c.params.get("limit") == Some("100")));
    assert!(calls.iter().all(|c| c.page() == Some(0)));
}

#[tokio::test]
async fn test_missing_market_sends_nothing() {
    let executor = single_page(&[("10", "100")]);
    let result = LiquidityWalker::new(&executor)
        .estimate("", Side::Sell, dec!(1))
        .await;

    match result {
        Err(RestError::MissingArgument(name)) => assert_eq!(name, "market"),
        other => panic!("expected MissingArgument, got {:?}", other),
    }
    assert_eq!(executor.call_count(), 0);
}

#[tokio::test]
async fn test_non_positive_amount_rejected() {
    let executor = single_page(&[("10", "100")]);
    let walker = LiquidityWalker::new(&executor);

    for amount in [dec!(0), dec!(-1)] {
        let result = walker.estimate("ETHCLP", Side::Sell, amount).await;
        assert!(matches!(result, Err(RestError::InvalidParameter(_))));
    }
    assert_eq!(executor.call_count(), 0);
}

#[tokio::test]
async fn test_error_on_second_page_aborts() {
    let executor = MockExecutor::new()
        .with_pages(
            Endpoint::Book,
            vec![book_page(&[("10", "1")]), book_page(&[("9", "1")])],
        )
        .fail_on_page(Endpoint::Book, 1, "service_unavailable");

    let result = LiquidityWalker::new(&executor)
        .estimate("ETHCLP", Side::Sell, dec!(5))
        .await;

    match result {
        Err(RestError::Server(message)) => assert_eq!(message, "service_unavailable"),
        other => panic!("expected server error, got {:?}", other),
    }
    assert_eq!(executor.call_count(), 2);
}

// =============================================================================
// Pacing, Cancellation and Bounds
// =============================================================================

#[tokio::test]
async fn test_pacing_only_between_fetches() {
    let executor = Arc::new(MockExecutor::new().with_pages(
        Endpoint::Book,
        vec![
            book_page(&[("10", "1")]),
            book_page(&[("9", "1")]),
            book_page(&[("8", "1")]),
        ],
    ));
    let pacer = Arc::new(RecordingPacer::new(Arc::clone(&executor)));

    let estimate = LiquidityWalker::new(executor.as_ref())
        .with_pacer(Arc::clone(&pacer))
        .estimate("ETHCLP", Side::Sell, dec!(10))
        .await
        .unwrap();

    assert!(estimate.is_partial_fill());
    assert_eq!(executor.call_count(), 3);
    // one pause after each fetch that is followed by another fetch
    assert_eq!(pacer.pauses(), vec![1, 2]);
}

#[tokio::test]
async fn test_no_pause_for_single_page_walk() {
    let executor = Arc::new(single_page(&[("10", "5")]));
    let pacer = Arc::new(RecordingPacer::new(Arc::clone(&executor)));

    LiquidityWalker::new(executor.as_ref())
        .with_pacer(Arc::clone(&pacer))
        .estimate("ETHCLP", Side::Sell, dec!(1))
        .await
        .unwrap();

    assert!(pacer.pauses().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_fixed_interval_reference_pacing() {
    let executor = MockExecutor::new().with_pages(
        Endpoint::Book,
        vec![book_page(&[("10", "1")]), book_page(&[("9", "1")])],
    );

    let start = tokio::time::Instant::now();
    LiquidityWalker::new(&executor)
        .with_pacer(FixedInterval::reference())
        .estimate("ETHCLP", Side::Sell, dec!(2))
        .await
        .unwrap();

    assert_eq!(executor.call_count(), 2);
    assert!(start.elapsed() >= Duration::from_secs(2));
    assert!(start.elapsed() < Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_stops_walk() {
    let executor = MockExecutor::new()
        .with_pages(Endpoint::Book, vec![book_page(&[("10", "1")])])
        .endless(Endpoint::Book);
    let token = CancellationToken::new();

    let walker = LiquidityWalker::new(&executor)
        .with_pacer(FixedInterval::new(Duration::from_secs(1)))
        .with_cancellation(token.clone());

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(2500)).await;
        canceller.cancel();
    });

    let result = walker.estimate("ETHCLP", Side::Sell, dec!(1000)).await;
    assert!(matches!(result, Err(RestError::Cancelled)));
    assert_eq!(executor.call_count(), 3);
}

#[tokio::test]
async fn test_already_cancelled_token() {
    let executor = single_page(&[("10", "5")]);
    let token = CancellationToken::new();
    token.cancel();

    let result = LiquidityWalker::new(&executor)
        .with_cancellation(token)
        .estimate("ETHCLP", Side::Sell, dec!(1))
        .await;

    assert!(matches!(result, Err(RestError::Cancelled)));
    assert_eq!(executor.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_times_out() {
    let executor = MockExecutor::new()
        .with_pages(Endpoint::Book, vec![book_page(&[("10", "1")])])
        .endless(Endpoint::Book)
        .with_latency(Duration::from_millis(400));

    let result = LiquidityWalker::new(&executor)
        .with_options(WalkOptions::default().with_deadline(Duration::from_secs(1)))
        .estimate("ETHCLP", Side::Sell, dec!(1000))
        .await;

    assert!(matches!(result, Err(RestError::Timeout)));
    assert_eq!(executor.call_count(), 3);
}

#[tokio::test]
async fn test_page_budget_bounds_walk() {
    let executor = MockExecutor::new()
        .with_pages(Endpoint::Book, vec![json!([])])
        .endless(Endpoint::Book);

    let result = LiquidityWalker::new(&executor)
        .with_options(WalkOptions::default().with_max_pages(4))
        .estimate("ETHCLP", Side::Buy, dec!(1))
        .await;

    assert!(matches!(
        result,
        Err(RestError::PageBudgetExhausted { pages: 4 })
    ));
    assert_eq!(executor.call_count(), 4);
}

#[tokio::test]
async fn test_custom_page_size() {
    let executor = single_page(&[("10", "5")]);
    LiquidityWalker::new(&executor)
        .with_options(WalkOptions::default().with_page_size(25))
        .estimate("ETHCLP", Side::Sell, dec!(1))
        .await
        .unwrap();

    assert_eq!(executor.calls()[0].params.get("limit"), Some("25"));
}

// =============================================================================
// Client
// =============================================================================

#[tokio::test]
async fn test_client_estimate_instant() {
    let client = CryptoMktClient::with_executor(single_page(&[("3000", "0.5"), ("2900", "1")]));

    let estimate = client
        .estimate_instant("ETHCLP", Side::Sell, dec!(1))
        .await
        .unwrap();

    assert_eq!(estimate.required, dec!(1));
    assert_eq!(estimate.obtained, dec!(2950));
    assert_eq!(estimate.average_price(Side::Sell), Some(dec!(2950)));
}

#[tokio::test]
async fn test_trading_group_estimate_matches_walker() {
    let client = CryptoMktClient::with_executor(single_page(&[("10", "2"), ("9", "1")]));

    let from_group = client
        .trading()
        .estimate_instant("ETHCLP", Side::Sell, dec!(5))
        .await
        .unwrap();
    let from_walker = client
        .liquidity_walker()
        .estimate("ETHCLP", Side::Sell, dec!(5))
        .await
        .unwrap();

    assert_eq!(from_group, from_walker);
}

#[tokio::test]
async fn test_trading_group_uses_client_walk_options() {
    let executor = MockExecutor::new()
        .with_pages(Endpoint::Book, vec![json!([])])
        .endless(Endpoint::Book);
    let client = CryptoMktClient::with_executor(executor).with_walk_options(
        WalkOptions::default().with_page_size(25).with_max_pages(3),
    );

    let result = client
        .trading()
        .estimate_instant("ETHCLP", Side::Buy, dec!(1))
        .await;

    assert!(matches!(
        result,
        Err(RestError::PageBudgetExhausted { pages: 3 })
    ));
    let calls = client.executor().calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|c| c.params.get("limit") == Some("25")));
}
