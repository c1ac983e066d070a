//! Request payloads and query-string construction.
//!
//! Payload structs serialize only the fields a caller actually supplied.
//! Blank strings count as absent, so an empty `email` never reaches the
//! gateway.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use url::form_urlencoded;

use crate::models::TransactionStatus;

/// Optional fields for [`create_payment_link`](crate::FapshiClient::create_payment_link).
///
/// # Examples
///
/// ```
/// use fapshi_client::PaymentLinkOptions;
///
/// let options = PaymentLinkOptions::new()
///     .email("buyer@example.com")
///     .external_id("order-42")
///     .card_only(false);
/// assert_eq!(options.email.as_deref(), Some("buyer@example.com"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentLinkOptions {
    /// Payer email; the gateway skips asking for it when set.
    pub email: Option<String>,
    /// Where the payer lands after paying.
    pub redirect_url: Option<String>,
    /// Caller's user reference, searchable later.
    pub user_id: Option<String>,
    /// Caller's own transaction reference.
    pub external_id: Option<String>,
    /// Restrict the hosted page to card payments.
    pub card_only: Option<bool>,
    /// Reason shown to the payer.
    pub message: Option<String>,
}

impl PaymentLinkOptions {
    /// Creates an empty set of options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the payer email.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the post-payment redirect URL.
    #[must_use]
    pub fn redirect_url(mut self, redirect_url: impl Into<String>) -> Self {
        self.redirect_url = Some(redirect_url.into());
        self
    }

    /// Sets the caller's user reference.
    #[must_use]
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Sets the caller's transaction reference.
    #[must_use]
    pub fn external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Restricts (or explicitly allows more than) card payments.
    #[must_use]
    pub const fn card_only(mut self, card_only: bool) -> Self {
        self.card_only = Some(card_only);
        self
    }

    /// Sets the reason shown to the payer.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Body of `POST /initiate-pay`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InitiatePayRequest<'a> {
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
}

impl<'a> InitiatePayRequest<'a> {
    pub(crate) fn new(amount: i64, options: &'a PaymentLinkOptions) -> Self {
        Self {
            amount,
            email: non_blank(options.email.as_deref()),
            redirect_url: non_blank(options.redirect_url.as_deref()),
            user_id: non_blank(options.user_id.as_deref()),
            external_id: non_blank(options.external_id.as_deref()),
            card_only: options.card_only,
            message: non_blank(options.message.as_deref()),
        }
    }
}

/// Body of `POST /direct-pay` and `POST /payout`.
#[derive(Debug, Serialize)]
pub(crate) struct PhoneAmountRequest<'a> {
    pub amount: i64,
    pub phone: &'a str,
}

/// Body of `POST /expire-pay`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExpirePayRequest<'a> {
    pub trans_id: &'a str,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Builds an `application/x-www-form-urlencoded` query string.
///
/// Keys are emitted in sorted order so the same filters always yield the same
/// URL. Spaces encode as `+`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use fapshi_client::request::encode_query;
///
/// let filters = HashMap::from([
///     ("status".to_owned(), "SUCCESSFUL".to_owned()),
///     ("medium".to_owned(), "mobile money".to_owned()),
/// ]);
/// assert_eq!(encode_query(&filters), "medium=mobile+money&status=SUCCESSFUL");
/// ```
#[must_use]
pub fn encode_query<S>(filters: &HashMap<String, String, S>) -> String {
    let sorted: BTreeMap<&str, &str> =
        filters.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in sorted {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Payment medium accepted by the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medium {
    /// MTN Mobile Money.
    MobileMoney,
    /// Orange Money.
    OrangeMoney,
}

impl Medium {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MobileMoney => "mobile money",
            Self::OrangeMoney => "orange money",
        }
    }
}

/// Sort order for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    Desc,
}

/// Typed builder for [`search_transactions`](crate::FapshiClient::search_transactions).
///
/// Covers the search keys the gateway documents; anything else can be added
/// with [`SearchFilters::with`].
///
/// # Examples
///
/// ```
/// use fapshi_client::{SearchFilters, TransactionStatus};
///
/// let filters = SearchFilters::new()
///     .status(TransactionStatus::Successful)
///     .limit(50)
///     .into_map();
/// assert_eq!(filters["status"], "SUCCESSFUL");
/// assert_eq!(filters["limit"], "50");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    entries: HashMap<String, String>,
}

impl SearchFilters {
    /// Creates an empty filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by transaction status.
    #[must_use]
    pub fn status(self, status: TransactionStatus) -> Self {
        self.with("status", status.as_str())
    }

    /// Filters by payment medium.
    #[must_use]
    pub fn medium(self, medium: Medium) -> Self {
        self.with("medium", medium.as_str())
    }

    /// Only transactions created on or after `date`.
    #[must_use]
    pub fn start(self, date: NaiveDate) -> Self {
        self.with("start", date.format("%Y-%m-%d").to_string())
    }

    /// Only transactions created on or before `date`.
    #[must_use]
    pub fn end(self, date: NaiveDate) -> Self {
        self.with("end", date.format("%Y-%m-%d").to_string())
    }

    /// Only transactions of exactly `amount` XAF.
    #[must_use]
    pub fn amount(self, amount: i64) -> Self {
        self.with("amt", amount.to_string())
    }

    /// Caps the number of results.
    #[must_use]
    pub fn limit(self, limit: u32) -> Self {
        self.with("limit", limit.to_string())
    }

    /// Orders results by creation date.
    #[must_use]
    pub fn sort(self, order: SortOrder) -> Self {
        let value = match order {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        };
        self.with("sort", value)
    }

    /// Adds an arbitrary key, replacing any previous value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Returns `true` when no filter has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the builder, yielding the raw key/value map.
    #[must_use]
    pub fn into_map(self) -> HashMap<String, String> {
        self.entries
    }
}

impl From<SearchFilters> for HashMap<String, String> {
    fn from(filters: SearchFilters) -> Self {
        filters.into_map()
    }
}
