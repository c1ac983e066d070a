//! Error types for the Fapshi client.
//!
//! Operations on [`FapshiClient`](crate::FapshiClient) never return these:
//! every gateway call is total and reports failures through the response
//! envelope. [`FapshiError`] covers what can fail *before* a client exists
//! (configuration, credentials, HTTP client construction) and what a
//! [`Transport`](crate::transport::Transport) reports when an exchange cannot
//! complete.
//!
//! # Error Categories
//!
//! - **Configuration errors** ([`FapshiError::MissingCredentials`],
//!   [`FapshiError::InvalidBaseUrl`], [`FapshiError::InvalidConfig`]): fix the
//!   configuration and rebuild the client
//! - **Transport errors** ([`FapshiError::HttpError`],
//!   [`FapshiError::TransportError`]): the request never produced a response
//!
//! # Examples
//!
//! ```
//! use fapshi_client::error::{FapshiError, Result};
//!
//! fn require_https(url: &str) -> Result<&str> {
//!     if !url.starts_with("https://") {
//!         return Err(FapshiError::InvalidBaseUrl("base URL must use HTTPS".to_owned()));
//!     }
//!     Ok(url)
//! }
//!
//! assert!(require_https("http://live.fapshi.com").is_err());
//! ```

use thiserror::Error;

/// Result type alias for fallible client construction and transport calls.
pub type Result<T> = std::result::Result<T, FapshiError>;

/// Errors raised while configuring the client or performing an HTTP exchange.
///
/// The `Display` text of a transport-level variant is what ends up in the
/// `message` field of a degraded (status 500) response.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum FapshiError {
    /// The API user or API key is empty or whitespace.
    ///
    /// # Recovery
    ///
    /// Set both `FAPSHI_API_USER` and `FAPSHI_API_KEY` (or the matching TOML
    /// keys) to the values shown in the Fapshi dashboard.
    #[error("Fapshi API credentials are not configured")]
    MissingCredentials,

    /// The configured base URL cannot be used.
    ///
    /// Raised when the URL does not parse, uses a scheme other than
    /// `http`/`https`, has no host, or carries a query or fragment.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A configuration value is out of range or the configuration source is
    /// malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// HTTP request failed.
    ///
    /// Wraps [`reqwest::Error`]. Common causes include:
    /// - Network timeouts
    /// - Connection refused
    /// - DNS resolution failures
    /// - TLS errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// A transport failed for a reason not covered by [`HttpError`](Self::HttpError).
    ///
    /// Custom [`Transport`](crate::transport::Transport) implementations use
    /// this to report their own failures.
    #[error("Transport error: {0}")]
    TransportError(String),
}
