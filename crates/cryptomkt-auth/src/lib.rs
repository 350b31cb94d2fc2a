//! API credentials and request signing for the CryptoMarket REST API
//!
//! Private endpoints expect three headers on every request: the API key,
//! a unix timestamp and an HMAC-SHA384 signature over the timestamp, the
//! request path and the sorted POST body values.
//!
//! # Example
//!
//! ```no_run
//! use cryptomkt_auth::{Credentials, RequestSigner};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::from_env()?;
//!     let signer = RequestSigner::new(&creds, "orders/create");
//!     let signature = signer.sign(&[("market", "ETHCLP"), ("amount", "0.3")]);
//!     println!("{} {}", signer.timestamp(), signature);
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;

pub use credentials::{Credentials, RequestSigner, API_VERSION_PREFIX};
pub use error::{AuthError, AuthResult};
