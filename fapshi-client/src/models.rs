//! Response shapes returned by the gateway.
//!
//! Every shape carries the envelope fields `status_code` and `message` as
//! ordinary struct members. `status_code` is never read from the body; the
//! executor stamps it from the transport through [`Envelope`]. All other
//! fields default when absent so partial gateway payloads still deserialize.
//!
//! Timestamps and statuses decode leniently: a value the client cannot
//! interpret becomes `None` instead of failing the whole body.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Uniform envelope access for response shapes.
///
/// Implemented by every type the executor can produce, so a status code can
/// be recorded after deserialization and degraded responses can be
/// synthesized without a body.
pub trait Envelope: Default {
    /// Status code recorded on this response.
    fn status_code(&self) -> u16;

    /// Records the transport status code.
    fn set_status_code(&mut self, status_code: u16);

    /// Human-readable message, if any.
    fn message(&self) -> Option<&str>;

    /// Builds an otherwise-empty response carrying only a status and message.
    #[must_use]
    fn degraded(status_code: u16, message: Option<String>) -> Self;

    /// Returns `true` for a 2xx status code.
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code())
    }
}

macro_rules! impl_envelope {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Envelope for $ty {
                fn status_code(&self) -> u16 {
                    self.status_code
                }

                fn set_status_code(&mut self, status_code: u16) {
                    self.status_code = status_code;
                }

                fn message(&self) -> Option<&str> {
                    self.message.as_deref()
                }

                fn degraded(status_code: u16, message: Option<String>) -> Self {
                    Self { status_code, message, ..Self::default() }
                }
            }
        )+
    };
}

/// Lifecycle label of a payment or payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Link created, payer has not started.
    Created,
    /// Payer started, confirmation outstanding.
    Pending,
    /// Funds moved.
    Successful,
    /// Payment was attempted and failed.
    Failed,
    /// Link expired or was cancelled before payment.
    Expired,
}

impl TransactionStatus {
    /// Wire representation, as used in search filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Pending => "PENDING",
            Self::Successful => "SUCCESSFUL",
            Self::Failed => "FAILED",
            Self::Expired => "EXPIRED",
        }
    }

    /// Returns `true` once the transaction can no longer change.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Successful | Self::Failed | Self::Expired)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = UnknownStatus;

    /// Parses a status label, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CREATED" => Ok(Self::Created),
            "PENDING" => Ok(Self::Pending),
            "SUCCESSFUL" => Ok(Self::Successful),
            "FAILED" => Ok(Self::Failed),
            "EXPIRED" => Ok(Self::Expired),
            _ => Err(UnknownStatus(s.to_owned())),
        }
    }
}

/// A status label outside [`TransactionStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction status: {0}")]
pub struct UnknownStatus(pub String);

/// Reads a timestamp in any of the shapes the gateway has been seen to emit:
/// RFC 3339, ISO 8601 without offset (taken as UTC), or a bare date
/// (midnight UTC). Anything else, including non-strings, yields `None`.
fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(raw) => parse_timestamp(&raw),
        _ => None,
    })
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(at.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}

/// Unknown or non-string statuses become `None`.
fn lenient_status<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<TransactionStatus>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(raw) => raw.parse().ok(),
        _ => None,
    })
}

/// Result of `POST /initiate-pay`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InitiatePayResponse {
    /// Transport status code.
    #[serde(skip_deserializing)]
    pub status_code: u16,
    /// Gateway or client message.
    pub message: Option<String>,
    /// Hosted payment page the payer should be sent to.
    pub link: Option<String>,
    /// Identifier of the created transaction.
    pub trans_id: Option<String>,
    /// When the gateway created the transaction.
    #[serde(deserialize_with = "lenient_timestamp")]
    pub date_initiated: Option<DateTime<Utc>>,
}

/// Result of `POST /direct-pay`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DirectPayResponse {
    /// Transport status code.
    #[serde(skip_deserializing)]
    pub status_code: u16,
    /// Gateway or client message.
    pub message: Option<String>,
    /// Identifier of the charge.
    pub trans_id: Option<String>,
    /// When the gateway created the transaction.
    #[serde(deserialize_with = "lenient_timestamp")]
    pub date_initiated: Option<DateTime<Utc>>,
}

/// Result of `GET /payment-status/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentStatusResponse {
    /// Transport status code.
    #[serde(skip_deserializing)]
    pub status_code: u16,
    /// Gateway or client message.
    pub message: Option<String>,
    /// Transaction identifier.
    pub trans_id: Option<String>,
    /// Current lifecycle status.
    #[serde(deserialize_with = "lenient_status")]
    pub status: Option<TransactionStatus>,
    /// Payment medium, e.g. `mobile money` or `orange money`.
    pub medium: Option<String>,
    /// Name of the merchant service that received the payment.
    pub service_name: Option<String>,
    /// Amount charged, in XAF.
    pub amount: i64,
    /// Amount credited to the merchant after fees.
    pub revenue: Option<i64>,
    /// Payer's name as reported by the carrier.
    pub payer_name: Option<String>,
    /// Payer email, if collected.
    pub email: Option<String>,
    /// Redirect URL registered on the link.
    pub redirect_url: Option<String>,
    /// Caller's own reference.
    pub external_id: Option<String>,
    /// Caller's user reference.
    pub user_id: Option<String>,
    /// Webhook URL notified for this transaction.
    pub webhook: Option<String>,
    /// Carrier-side transaction reference.
    pub financial_trans_id: Option<String>,
    /// When the transaction was created.
    #[serde(rename = "dateInitiated", alias = "createdAt")]
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the payment was confirmed.
    #[serde(deserialize_with = "lenient_timestamp")]
    pub date_confirmed: Option<DateTime<Utc>>,
}

/// Result of `POST /expire-pay`.
///
/// The gateway answers with the expired transaction's details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExpirePayResponse {
    /// Transport status code.
    #[serde(skip_deserializing)]
    pub status_code: u16,
    /// Gateway or client message.
    pub message: Option<String>,
    /// Transaction identifier.
    pub trans_id: Option<String>,
    /// Status after expiry, normally [`TransactionStatus::Expired`].
    #[serde(deserialize_with = "lenient_status")]
    pub status: Option<TransactionStatus>,
    /// Payment medium.
    pub medium: Option<String>,
    /// Name of the merchant service.
    pub service_name: Option<String>,
    /// Amount of the link, in XAF.
    pub amount: i64,
    /// Amount credited to the merchant after fees.
    pub revenue: Option<i64>,
    /// Payer's name.
    pub payer_name: Option<String>,
    /// Payer email.
    pub email: Option<String>,
    /// Redirect URL registered on the link.
    pub redirect_url: Option<String>,
    /// Caller's own reference.
    pub external_id: Option<String>,
    /// Caller's user reference.
    pub user_id: Option<String>,
    /// Webhook URL.
    pub webhook: Option<String>,
    /// Carrier-side transaction reference.
    pub financial_trans_id: Option<String>,
    /// When the transaction was created.
    #[serde(rename = "dateInitiated", alias = "createdAt")]
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the payment was confirmed.
    #[serde(deserialize_with = "lenient_timestamp")]
    pub date_confirmed: Option<DateTime<Utc>>,
}

/// Result of `GET /balance`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BalanceResponse {
    /// Transport status code.
    #[serde(skip_deserializing)]
    pub status_code: u16,
    /// Gateway or client message.
    pub message: Option<String>,
    /// Service the balance belongs to.
    pub service: Option<String>,
    /// Available balance.
    pub balance: i64,
    /// Currency code, `XAF`.
    pub currency: Option<String>,
}

/// Result of `POST /payout`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PayoutResponse {
    /// Transport status code.
    #[serde(skip_deserializing)]
    pub status_code: u16,
    /// Gateway or client message.
    pub message: Option<String>,
    /// Identifier of the payout.
    pub trans_id: Option<String>,
    /// When the gateway created the payout.
    #[serde(deserialize_with = "lenient_timestamp")]
    pub date_initiated: Option<DateTime<Utc>>,
}

/// One entry of a transaction listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserTransaction {
    /// Transaction identifier.
    pub trans_id: String,
    /// Amount, in XAF.
    pub amount: i64,
    /// Lifecycle status.
    #[serde(deserialize_with = "lenient_status")]
    pub status: Option<TransactionStatus>,
    /// When the transaction was created.
    #[serde(rename = "dateInitiated", alias = "createdAt")]
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Payment medium.
    pub medium: Option<String>,
    /// Payer's name.
    pub payer_name: Option<String>,
    /// Caller's own reference.
    pub external_id: Option<String>,
    /// Caller's user reference.
    pub user_id: Option<String>,
}

/// Result of `GET /transaction/{userId}` and `GET /search`.
///
/// Deserializes from either a bare JSON array of transactions or an object
/// with a `transactions` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTransactionsResponse {
    /// Transport status code.
    pub status_code: u16,
    /// Gateway or client message.
    pub message: Option<String>,
    /// Matching transactions.
    pub transactions: Vec<UserTransaction>,
}

impl<'de> Deserialize<'de> for UserTransactionsResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            List(Vec<UserTransaction>),
            Object {
                #[serde(default)]
                message: Option<String>,
                #[serde(default)]
                transactions: Vec<UserTransaction>,
            },
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::List(transactions) => Self { transactions, ..Self::default() },
            Wire::Object { message, transactions } => {
                Self { message, transactions, ..Self::default() }
            }
        })
    }
}

impl_envelope!(
    InitiatePayResponse,
    DirectPayResponse,
    PaymentStatusResponse,
    ExpirePayResponse,
    BalanceResponse,
    PayoutResponse,
    UserTransactionsResponse,
);
