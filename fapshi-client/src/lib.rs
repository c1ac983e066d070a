//! Fapshi Client: typed access to the Fapshi payment gateway
//!
//! An async Rust client for the [Fapshi](https://fapshi.com) HTTP API used by
//! merchants in Cameroon to collect and disburse XAF through mobile money and
//! hosted payment pages.
//!
//! # What it does
//!
//! - **Validates input locally**: amounts, phone numbers, transaction and user
//!   identifiers are checked before anything reaches the network
//! - **One call per operation**: no retries, no hidden state
//! - **Total operations**: every method returns a typed response carrying a
//!   status code and message, whether the call succeeded, the gateway refused
//!   it, or the network failed
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │   FapshiClient       │  one async method per endpoint
//! └──────────┬───────────┘
//!            │ validate → build payload
//! ┌──────────▼───────────┐
//! │   executor           │  deserialize, default, stamp status
//! └──────────┬───────────┘
//!            │ URL + JSON body
//! ┌──────────▼───────────┐
//! │   Transport          │  reqwest, apiuser/apikey headers
//! └──────────┬───────────┘
//!            │ HTTPS
//! ┌──────────▼───────────┐
//! │   live / sandbox     │
//! └──────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fapshi_client::{Envelope, FapshiClient, FapshiConfig, PaymentLinkOptions};
//!
//! # async fn example() -> fapshi_client::Result<()> {
//! let client = FapshiClient::new(FapshiConfig::from_env()?)?;
//!
//! let link = client
//!     .create_payment_link(5000, PaymentLinkOptions::new().external_id("order-42"))
//!     .await;
//! if !link.is_success() {
//!     eprintln!("{}: {:?}", link.status_code, link.message);
//!     return Ok(());
//! }
//!
//! let trans_id = link.trans_id.unwrap_or_default();
//! let status = client.get_payment_status(&trans_id).await;
//! println!("{trans_id} is {:?}", status.status);
//! # Ok(())
//! # }
//! ```
//!
//! # Outcome tiers
//!
//! | Outcome | `status_code` | `message` |
//! |---|---|---|
//! | Rejected input | 400 | fixed validation message |
//! | Network failure | 500 | transport error text |
//! | Gateway answered | gateway status | gateway `message`, if any |
//!
//! A body that is not the expected JSON still yields a response: the payload
//! fields take their defaults and `status_code` is the real HTTP status.
//!
//! # Module Organization
//!
//! - [`client`]: [`FapshiClient`] and the [`FapshiApi`] trait
//! - [`config`]: credentials, base URL, TOML and environment loading
//! - [`validation`]: input rules
//! - [`request`]: payload builders and search filters
//! - [`models`]: response shapes
//! - [`executor`]: call-and-normalize pipeline
//! - [`transport`]: HTTP boundary
//! - [`error`]: construction and transport errors

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest and httpmock"
)]

pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod models;
pub mod request;
pub mod transport;
pub mod validation;

pub use client::{FapshiApi, FapshiClient};
pub use config::FapshiConfig;
pub use error::{FapshiError, Result};
pub use models::{
    BalanceResponse, DirectPayResponse, Envelope, ExpirePayResponse, InitiatePayResponse,
    PaymentStatusResponse, PayoutResponse, TransactionStatus, UnknownStatus, UserTransaction,
    UserTransactionsResponse,
};
pub use request::{Medium, PaymentLinkOptions, SearchFilters, SortOrder};
pub use validation::ValidationError;
