//! Common test utilities and fixtures for integration tests
//!
//! Contains a scripted executor and sample payloads shaped like live
//! CryptoMarket API v1 responses.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cryptomkt_rest::{Endpoint, Pacer, Params, RequestExecutor, RestError, RestResult};
use cryptomkt_types::{Envelope, Pagination};
use parking_lot::Mutex;
use serde_json::{json, Value};

/// One request seen by [`MockExecutor`]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub endpoint: Endpoint,
    pub params: Params,
}

impl RecordedCall {
    pub fn page(&self) -> Option<u32> {
        self.params.get("page").and_then(|p| p.parse().ok())
    }
}

/// Executor answering from scripted data
///
/// Paginated endpoints are served from a list of page payloads, indexed by
/// the `page` parameter, with pagination metadata derived from the list.
/// Anything else pops the next queued response.
#[derive(Default)]
pub struct MockExecutor {
    pages: HashMap<Endpoint, Vec<Value>>,
    endless: HashSet<Endpoint>,
    failures: HashMap<(Endpoint, u32), String>,
    responses: Mutex<VecDeque<RestResult<Envelope>>>,
    latency: Option<Duration>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `pages` for `endpoint`, one payload per page index
    pub fn with_pages(mut self, endpoint: Endpoint, pages: Vec<Value>) -> Self {
        self.pages.insert(endpoint, pages);
        self
    }

    /// Always advertise a next page for `endpoint`, cycling through its pages
    pub fn endless(mut self, endpoint: Endpoint) -> Self {
        self.endless.insert(endpoint);
        self
    }

    /// Answer page `page` of `endpoint` with an error envelope
    pub fn fail_on_page(mut self, endpoint: Endpoint, page: u32, message: &str) -> Self {
        self.failures.insert((endpoint, page), message.to_string());
        self
    }

    /// Sleep before answering each request
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Queue a response for a non-paginated call
    pub fn push_response(&self, response: RestResult<Envelope>) {
        self.responses.lock().push_back(response);
    }

    /// Queue a successful payload
    pub fn push_data(&self, data: Value) {
        self.push_response(Ok(Envelope::success(data, None)));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn serve_page(&self, endpoint: Endpoint, pages: &[Value], params: &Params) -> Envelope {
        let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
        let limit: u32 = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(20);

        if let Some(message) = self.failures.get(&(endpoint, page)) {
            return Envelope::error(message.clone());
        }

        let count = pages.len().max(1) as u32;
        let (data, next) = if self.endless.contains(&endpoint) {
            let data = pages.get((page % count) as usize).cloned().unwrap_or_else(|| json!([]));
            (data, Some(page + 1))
        } else {
            let data = pages.get(page as usize).cloned().unwrap_or_else(|| json!([]));
            let next = if page + 1 < count { Some(page + 1) } else { None };
            (data, next)
        };

        let pagination = Pagination {
            page,
            limit,
            previous: page.checked_sub(1),
            next,
        };
        Envelope::success(data, Some(pagination))
    }
}

#[async_trait]
impl RequestExecutor for MockExecutor {
    async fn execute(&self, endpoint: Endpoint, params: &Params) -> RestResult<Envelope> {
        self.calls.lock().push(RecordedCall {
            endpoint,
            params: params.clone(),
        });

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(pages) = self.pages.get(&endpoint) {
            return Ok(self.serve_page(endpoint, pages, params));
        }

        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(RestError::Transport(format!("no scripted response for {}", endpoint))))
    }
}

/// Pacer that records how many requests had been made at each pause
pub struct RecordingPacer {
    executor: Arc<MockExecutor>,
    seen: Mutex<Vec<usize>>,
}

impl RecordingPacer {
    pub fn new(executor: Arc<MockExecutor>) -> Self {
        Self {
            executor,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Request count observed at every pause, in order
    pub fn pauses(&self) -> Vec<usize> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self) {
        let count = self.executor.call_count();
        self.seen.lock().push(count);
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Book page payload from `(price, amount)` pairs
pub fn book_page(levels: &[(&str, &str)]) -> Value {
    Value::Array(
        levels
            .iter()
            .map(|(price, amount)| {
                json!({
                    "price": price,
                    "amount": amount,
                    "timestamp": "2017-08-01T15:21:46.447817"
                })
            })
            .collect(),
    )
}

/// Order payload
pub fn order(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "status": status,
        "type": "buy",
        "price": "3000",
        "amount": {"original": "1.0", "remaining": "1.0", "executed": "0"},
        "execution_price": null,
        "avg_execution_price": 0,
        "market": "ETHCLP",
        "created_at": "2017-08-01T15:21:46.447817",
        "updated_at": "2017-08-01T15:21:46.447817",
        "executed_at": null
    })
}

/// Page payload of orders with the given ids
pub fn order_page(ids: &[&str], status: &str) -> Value {
    Value::Array(ids.iter().map(|id| order(id, status)).collect())
}

/// Payment order payload
pub fn payment_order(id: &str, status: i32) -> Value {
    json!({
        "id": id,
        "external_id": "ABC123",
        "status": status,
        "to_receive": "3000",
        "to_receive_currency": "CLP",
        "expected_amount": "0.0013",
        "expected_currency": "ETH",
        "deposit_address": "0x6a0d4c8f1d6a0d4c8f1d",
        "refund_email": "refund@example.com",
        "qr": "https://example.com/qr.png",
        "obs": null,
        "callback_url": null,
        "error_url": null,
        "success_url": null,
        "payment_url": "https://example.com/pay",
        "remaining": 1200,
        "language": "es",
        "created_at": "2018-05-08T16:16:43.236432",
        "updated_at": "2018-05-08T16:16:43.236432",
        "server_at": "2018-05-08T16:17:01.236432"
    })
}
