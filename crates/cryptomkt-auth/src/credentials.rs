//! Authentication credentials for the CryptoMarket API
//!
//! Implements HMAC-SHA384 request signing for private endpoints.
//!
//! # Security
//!
//! The API secret is held in a `secrecy::SecretString`, which zeroizes on
//! drop and keeps the secret out of `Debug` output.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha384;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::trace;

use crate::error::{AuthError, AuthResult};

type HmacSha384 = Hmac<Sha384>;

/// Path prefix included in every signed message
pub const API_VERSION_PREFIX: &str = "/v1/";

/// Environment variable holding the API key
const ENV_API_KEY: &str = "CRYPTOMKT_API_KEY";
/// Environment variable holding the API secret
const ENV_API_SECRET: &str = "CRYPTOMKT_API_SECRET";

/// API credentials for authenticated requests
pub struct Credentials {
    api_key: String,
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    ///
    /// Both values must be non-empty.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.trim().is_empty() {
            return Err(AuthError::InvalidCredentials("empty API key".to_string()));
        }
        if api_secret.trim().is_empty() {
            return Err(AuthError::InvalidCredentials("empty API secret".to_string()));
        }

        Ok(Self {
            api_key,
            api_secret: SecretString::from(api_secret),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `CRYPTOMKT_API_KEY` and `CRYPTOMKT_API_SECRET`.
    pub fn from_env() -> AuthResult<Self> {
        let api_key =
            std::env::var(ENV_API_KEY).map_err(|_| AuthError::EnvVarNotSet(ENV_API_KEY.into()))?;
        let api_secret = std::env::var(ENV_API_SECRET)
            .map_err(|_| AuthError::EnvVarNotSet(ENV_API_SECRET.into()))?;

        Self::new(api_key, api_secret)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Current unix timestamp in seconds, as sent in `X-MKT-TIMESTAMP`
    pub fn timestamp() -> String {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
            .to_string()
    }

    /// Sign a request
    ///
    /// The signed message is `timestamp + "/v1/" + endpoint` followed by the
    /// values of the POST body, concatenated in key order. GET requests sign
    /// with an empty body.
    ///
    /// Returns the lowercase hex HMAC-SHA384 digest.
    pub fn sign(&self, endpoint: &str, timestamp: &str, body: &[(&str, &str)]) -> String {
        let mut sorted: Vec<&(&str, &str)> = body.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let mut message = String::with_capacity(64);
        message.push_str(timestamp);
        message.push_str(API_VERSION_PREFIX);
        message.push_str(endpoint.trim_start_matches('/'));
        for (_, value) in sorted {
            message.push_str(value);
        }
        trace!(endpoint, "signing request");

        let mut mac = HmacSha384::new_from_slice(self.api_secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown: String = self.api_key.chars().take(6).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", shown))
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Signs one request with a fixed timestamp
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    endpoint: String,
    timestamp: String,
}

impl<'a> RequestSigner<'a> {
    /// Create a signer for `endpoint`, stamped with the current time
    pub fn new(credentials: &'a Credentials, endpoint: impl Into<String>) -> Self {
        Self::with_timestamp(credentials, endpoint, Credentials::timestamp())
    }

    /// Create a signer with an explicit timestamp
    pub fn with_timestamp(
        credentials: &'a Credentials,
        endpoint: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            endpoint: endpoint.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Timestamp for this request
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign the request with the given POST body
    pub fn sign(&self, body: &[(&str, &str)]) -> String {
        self.credentials.sign(&self.endpoint, &self.timestamp, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("key-123456789", "very-secret").unwrap()
    }

    #[test]
    fn test_rejects_empty_values() {
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(AuthError::InvalidCredentials(_))
        ));
        assert!(matches!(
            Credentials::new("key", " "),
            Err(AuthError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", creds());
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("key-123456789"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_timestamp_is_numeric() {
        let ts = Credentials::timestamp();
        assert!(!ts.is_empty());
        assert!(ts.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_signature_is_hex_sha384() {
        let sig = creds().sign("balance", "1500000000", &[]);
        assert_eq!(sig.len(), 96);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_body_order_does_not_matter() {
        let c = creds();
        let a = c.sign("orders/create", "1", &[("market", "ETHCLP"), ("amount", "0.3")]);
        let b = c.sign("orders/create", "1", &[("amount", "0.3"), ("market", "ETHCLP")]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_depends_on_inputs() {
        let c = creds();
        let base = c.sign("orders/cancel", "1", &[("id", "O1")]);
        assert_ne!(base, c.sign("orders/cancel", "2", &[("id", "O1")]));
        assert_ne!(base, c.sign("orders/status", "1", &[("id", "O1")]));
        assert_ne!(base, c.sign("orders/cancel", "1", &[("id", "O2")]));
        // leading slash is normalised away
        assert_eq!(base, c.sign("/orders/cancel", "1", &[("id", "O1")]));
    }

    #[test]
    fn test_signer_uses_fixed_timestamp() {
        let c = creds();
        let signer = RequestSigner::with_timestamp(&c, "transfer", "42");
        assert_eq!(signer.timestamp(), "42");
        assert_eq!(signer.api_key(), "key-123456789");
        assert_eq!(signer.sign(&[("memo", "x")]), c.sign("transfer", "42", &[("memo", "x")]));
    }
}
