//! Error types for REST API operations

use cryptomkt_auth::AuthError;

/// Errors that can occur during REST API operations
///
/// Nothing in this crate retries on its own; every variant reaches the
/// caller exactly as it happened.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// A required argument was not supplied; nothing was sent
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// A supplied argument is malformed; nothing was sent
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The endpoint answered with an error status
    #[error("Server error: {0}")]
    Server(String),

    /// Network or decoding failure before a status was known
    #[error("Transport error: {0}")]
    Transport(String),

    /// The current page is the last one
    #[error("Next page does not exist")]
    NoMorePages,

    /// The current page is the first one
    #[error("Previous page does not exist")]
    NoPreviousPage,

    /// A traversal fetched more pages than it was allowed to
    #[error("Gave up after fetching {pages} pages")]
    PageBudgetExhausted {
        /// Number of pages fetched before giving up
        pages: u32,
    },

    /// The caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,

    /// A liquidity walk ran past its deadline
    ///
    /// A single stalled HTTP request is a [`RestError::Transport`].
    #[error("Operation timed out")]
    Timeout,

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Credential loading failed
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(format!("malformed payload: {}", err))
    }
}

impl RestError {
    /// Create a server error from the message of an error envelope
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    /// Check if this error only marks the end of a page sequence
    pub fn is_end_of_sequence(&self) -> bool {
        matches!(self, Self::NoMorePages | Self::NoPreviousPage)
    }

    /// Check if the error was raised locally, before any request was sent
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::MissingArgument(_)
                | Self::InvalidParameter(_)
                | Self::AuthRequired
                | Self::Auth(_)
        )
    }

    /// Check if this error aborted a request that reached the network
    pub fn is_hard_failure(&self) -> bool {
        matches!(self, Self::Server(_) | Self::Transport(_) | Self::Timeout)
    }

    /// Check if repeating the same call may succeed
    ///
    /// Server errors are never retryable: the server saw the request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout)
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
