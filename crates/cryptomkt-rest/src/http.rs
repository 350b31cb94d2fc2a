//! HTTP request executor
//!
//! Sends requests with `reqwest`: GET parameters in the query string, POST
//! parameters form-encoded. Private endpoints are signed with the
//! `X-MKT-APIKEY`, `X-MKT-SIGNATURE` and `X-MKT-TIMESTAMP` headers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cryptomkt_auth::{Credentials, RequestSigner};
use cryptomkt_types::Envelope;
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::client::ClientConfig;
use crate::endpoint::{Access, Endpoint, Method};
use crate::error::{RestError, RestResult};
use crate::executor::RequestExecutor;
use crate::params::Params;
use crate::rate_limiter::{RateLimiter, SharedRateLimiter};

const HEADER_API_KEY: &str = "X-MKT-APIKEY";
const HEADER_SIGNATURE: &str = "X-MKT-SIGNATURE";
const HEADER_TIMESTAMP: &str = "X-MKT-TIMESTAMP";

/// Executor backed by a pooled HTTP client
#[derive(Clone)]
pub struct HttpExecutor {
    http_client: Client,
    base_url: String,
    credentials: Option<Credentials>,
    limiter: SharedRateLimiter,
}

impl HttpExecutor {
    /// Build an executor from a client configuration
    pub fn new(config: &ClientConfig) -> RestResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or(crate::DEFAULT_USER_AGENT))
            .build()?;

        let mut base_url = config.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        info!(base_url = %base_url, authenticated = config.credentials.is_some(), "Created HTTP executor");

        Ok(Self {
            http_client,
            base_url,
            credentials: config.credentials.clone(),
            limiter: Arc::new(RateLimiter::new(config.rate_limits.clone())),
        })
    }

    /// Check if the executor can sign private requests
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Rate limiter shared by every request of this executor
    pub fn rate_limiter(&self) -> &SharedRateLimiter {
        &self.limiter
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    #[instrument(skip(self, params), fields(endpoint = %endpoint))]
    async fn execute(&self, endpoint: Endpoint, params: &Params) -> RestResult<Envelope> {
        let private = endpoint.access() == Access::Private;
        if private && self.credentials.is_none() {
            return Err(RestError::AuthRequired);
        }

        self.limiter.acquire(RateLimiter::category_for(endpoint)).await;

        let pairs = params.pairs();
        let url = self.url(endpoint);
        let mut request = match endpoint.method() {
            Method::Get => self.http_client.get(&url).query(&pairs),
            Method::Post => {
                let post_data = serde_urlencoded::to_string(&pairs)
                    .map_err(|e| RestError::InvalidParameter(e.to_string()))?;
                self.http_client
                    .post(&url)
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(post_data)
            }
        };

        if let Some(credentials) = self.credentials.as_ref().filter(|_| private) {
            let signer = RequestSigner::new(credentials, endpoint.path());
            let signature = match endpoint.method() {
                Method::Get => signer.sign(&[]),
                Method::Post => signer.sign(&pairs),
            };
            request = request
                .header(HEADER_API_KEY, signer.api_key())
                .header(HEADER_SIGNATURE, signature)
                .header(HEADER_TIMESTAMP, signer.timestamp());
        }

        debug!("Sending {:?} request to {}", endpoint.method(), url);
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        // error envelopes come back with 4xx statuses and are decoded like any other
        serde_json::from_str::<Envelope>(&body).map_err(|e| {
            RestError::Transport(format!("undecodable response (HTTP {}): {}", status, e))
        })
    }
}

impl std::fmt::Debug for HttpExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpExecutor")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = ClientConfig::new().with_base_url("http://localhost:8080/v1");
        let executor = HttpExecutor::new(&config).unwrap();
        assert_eq!(executor.base_url(), "http://localhost:8080/v1/");
        assert_eq!(executor.url(Endpoint::ActiveOrders), "http://localhost:8080/v1/orders/active");
    }

    #[tokio::test]
    async fn test_private_endpoint_without_credentials() {
        let executor = HttpExecutor::new(&ClientConfig::default()).unwrap();
        let result = executor.execute(Endpoint::Balance, &Params::new()).await;
        assert!(matches!(result, Err(RestError::AuthRequired)));
    }

    #[tokio::test]
    async fn test_stalled_request_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = ClientConfig::new()
            .with_base_url(format!("http://{}/v1/", addr))
            .with_timeout(1);
        let executor = HttpExecutor::new(&config).unwrap();
        let result = executor.execute(Endpoint::Markets, &Params::new()).await;
        assert!(matches!(result, Err(RestError::Transport(_))), "{:?}", result);
    }

    #[test]
    fn test_debug_hides_credentials() {
        let creds = Credentials::new("key-123456789", "secret").unwrap();
        let config = ClientConfig::new().with_credentials(creds);
        let executor = HttpExecutor::new(&config).unwrap();

        let shown = format!("{:?}", executor);
        assert!(shown.contains("has_credentials: true"));
        assert!(!shown.contains("secret"));
    }
}
