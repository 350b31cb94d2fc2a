//! Response envelope shared by every CryptoMarket endpoint

use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Message used when the server reports an error without explaining it
pub const UNKNOWN_SERVER_ERROR: &str = "unknown server error";

/// Status field of a response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// Request succeeded, `data` holds the payload
    Success,
    /// Request failed, `message` explains why
    Error,
}

/// Raw decoded response: status, optional message, opaque payload and
/// optional pagination cursor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Response status
    pub status: EnvelopeStatus,
    /// Server message (always present on errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Opaque payload, decoded by the caller
    #[serde(default)]
    pub data: serde_json::Value,
    /// Pagination cursor for list-shaped payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Successful payload split out of an [`Envelope`]
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    /// Decoded `data` field
    pub data: serde_json::Value,
    /// Pagination, if the endpoint is paginated
    pub pagination: Option<Pagination>,
}

impl Envelope {
    /// Build a successful envelope
    pub fn success(data: serde_json::Value, pagination: Option<Pagination>) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: None,
            data,
            pagination,
        }
    }

    /// Build an error envelope
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            message: Some(message.into()),
            data: serde_json::Value::Null,
            pagination: None,
        }
    }

    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.status == EnvelopeStatus::Success
    }

    /// Get the payload, or the server message if the status is an error
    ///
    /// The payload of an error envelope is discarded. The returned message
    /// is never empty.
    pub fn into_result(self) -> Result<Payload, String> {
        match self.status {
            EnvelopeStatus::Success => Ok(Payload {
                data: self.data,
                pagination: self.pagination,
            }),
            EnvelopeStatus::Error => Err(self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string())),
        }
    }
}
