//! Transport abstraction.
//!
//! The client never speaks HTTP itself: every operation hands a fully built
//! URL (and, for `POST`, a JSON body) to a [`Transport`]. The default
//! [`HttpTransport`] uses a pooled reqwest client with the gateway credentials
//! attached once, at construction.
//!
//! A transport reports *any* completed exchange as `Ok`, whatever the status
//! code; gateway errors are data, not failures. `Err` is reserved for
//! exchanges that could not complete (connect failure, timeout, TLS, broken
//! body stream). The executor turns those into status-500 responses.
//!
//! # Examples
//!
//! A test double that answers every request with the same body:
//!
//! ```rust
//! use fapshi_client::{
//!     error::Result,
//!     transport::{Transport, TransportResponse},
//! };
//!
//! #[derive(Debug)]
//! struct Canned(&'static str);
//!
//! impl Transport for Canned {
//!     async fn get<'a>(&'a self, _url: &'a str) -> Result<TransportResponse> {
//!         Ok(TransportResponse { status: 200, body: self.0.to_owned() })
//!     }
//!
//!     async fn post<'a>(&'a self, _url: &'a str, _body: Vec<u8>) -> Result<TransportResponse> {
//!         Ok(TransportResponse { status: 200, body: self.0.to_owned() })
//!     }
//!
//!     fn protocol_name(&self) -> &'static str {
//!         "canned"
//!     }
//! }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use crate::error::Result;

pub mod config;
pub mod http;

pub use config::{HttpConfig, HttpVersion};
pub use http::HttpTransport;

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Full response body as text.
    pub body: String,
}

/// Performs HTTP exchanges on behalf of the client.
///
/// Implementations attach whatever authentication the gateway needs; the
/// client passes only URLs and bodies.
pub trait Transport: Send + Sync {
    /// Executes a `GET` request.
    ///
    /// # Errors
    ///
    /// Returns error only if the exchange could not complete.
    fn get<'a>(
        &'a self,
        url: &'a str,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Executes a `POST` request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns error only if the exchange could not complete.
    fn post<'a>(
        &'a self,
        url: &'a str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;

    /// Returns the protocol name for logging.
    fn protocol_name(&self) -> &'static str;
}
