//! Request executor abstraction
//!
//! Everything above the transport talks to the API through
//! [`RequestExecutor`]: name an endpoint, pass parameters, get back the raw
//! response envelope. The HTTP implementation lives in [`crate::http`];
//! tests inject scripted executors instead.

use async_trait::async_trait;
use cryptomkt_types::Envelope;
use std::sync::Arc;

use crate::endpoint::Endpoint;
use crate::error::RestResult;
use crate::params::Params;

/// Performs one request against a named endpoint
///
/// Implementations own transport concerns (signing, connection pooling,
/// rate limiting) and must be safe to share between tasks. An `Err` means
/// no status could be determined; a server-reported error comes back as an
/// `Ok` envelope with an error status.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute one request and return the decoded envelope
    async fn execute(&self, endpoint: Endpoint, params: &Params) -> RestResult<Envelope>;
}

#[async_trait]
impl<E: RequestExecutor + ?Sized> RequestExecutor for Arc<E> {
    async fn execute(&self, endpoint: Endpoint, params: &Params) -> RestResult<Envelope> {
        (**self).execute(endpoint, params).await
    }
}
