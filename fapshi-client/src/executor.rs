//! Execute-and-normalize pipeline shared by every operation.
//!
//! [`execute`] performs one transport call and always produces an
//! [`Execution`]: either deserialized data stamped with the transport status,
//! or an error message with status 500. Nothing escapes as `Err`.

#[allow(
    redundant_imports,
    reason = "Future needed for generic bounds despite being in Edition 2024 prelude"
)]
use std::future::Future;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    error::Result,
    models::{Envelope, UserTransactionsResponse},
    transport::TransportResponse,
};

/// Status reported when the exchange itself failed.
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

/// Outcome of a single gateway call.
///
/// [`execute`] fills in exactly one of `data` and `error`. The fields are
/// public, so a hand-built value may hold both or neither;
/// [`Execution::into_response`] prefers `data` when it is present.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution<T> {
    /// Deserialized (or defaulted) response, present when the exchange completed.
    pub data: Option<T>,
    /// Failure description, present when the exchange did not complete.
    pub error: Option<String>,
    /// Transport status, or [`TRANSPORT_FAILURE_STATUS`].
    pub status: u16,
}

impl<T: Envelope> Execution<T> {
    /// Returns the data, or a degraded response carrying the status and error.
    #[must_use]
    pub fn into_response(self) -> T {
        match self.data {
            Some(data) => data,
            None => T::degraded(self.status, self.error),
        }
    }
}

/// Runs `call` and normalizes its outcome into `T`.
///
/// - Transport failure: no data, the error's text, status 500.
/// - Completed exchange: the body deserialized into `T`, or `T::default()`
///   when the body is not valid JSON for `T`, with the transport status
///   stamped on it.
pub async fn execute<T, F, Fut>(call: F) -> Execution<T>
where
    T: DeserializeOwned + Envelope,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<TransportResponse>>,
{
    let response = match call().await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "gateway call failed");
            return Execution {
                data: None,
                error: Some(e.to_string()),
                status: TRANSPORT_FAILURE_STATUS,
            };
        }
    };

    let mut data = serde_json::from_str::<T>(&response.body).unwrap_or_else(|e| {
        debug!(status = response.status, error = %e, "unexpected response body, using defaults");
        T::default()
    });
    data.set_status_code(response.status);

    debug!(status = response.status, "gateway call completed");
    Execution { data: Some(data), error: None, status: response.status }
}

/// List-of-transactions variant of [`execute`].
///
/// Always yields a [`UserTransactionsResponse`]; when no data was produced the
/// result carries the status and error of the failed call.
pub async fn execute_transactions<F, Fut>(call: F) -> UserTransactionsResponse
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<TransportResponse>>,
{
    execute::<UserTransactionsResponse, _, _>(call).await.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::FapshiError,
        models::{BalanceResponse, InitiatePayResponse},
    };

    fn ok(status: u16, body: &str) -> Result<TransportResponse> {
        Ok(TransportResponse { status, body: body.to_owned() })
    }

    #[tokio::test]
    async fn test_execute_success() {
        let execution = execute::<InitiatePayResponse, _, _>(|| async {
            ok(200, r#"{"link":"https://pay/x","transId":"AB12CD34"}"#)
        })
        .await;

        assert_eq!(execution.status, 200);
        assert!(execution.error.is_none());
        let data = execution.data.unwrap();
        assert_eq!(data.status_code, 200);
        assert_eq!(data.trans_id.as_deref(), Some("AB12CD34"));
        assert_eq!(data.link.as_deref(), Some("https://pay/x"));
    }

    #[tokio::test]
    async fn test_execute_keeps_body_with_date_only_timestamp() {
        let execution = execute::<InitiatePayResponse, _, _>(|| async {
            ok(200, r#"{"message":"ok","link":"https://pay/x","transId":"AB12CD34","dateInitiated":"2024-01-15"}"#)
        })
        .await;

        let data = execution.data.unwrap();
        assert_eq!(data.status_code, 200);
        assert_eq!(data.trans_id.as_deref(), Some("AB12CD34"));
        assert_eq!(data.message.as_deref(), Some("ok"));
        assert!(data.date_initiated.is_some());
    }

    #[tokio::test]
    async fn test_execute_malformed_body_defaults() {
        let execution =
            execute::<BalanceResponse, _, _>(|| async { ok(200, "<html>oops</html>") }).await;

        assert_eq!(execution.status, 200);
        let data = execution.data.unwrap();
        assert_eq!(data, BalanceResponse { status_code: 200, ..BalanceResponse::default() });
    }

    #[tokio::test]
    async fn test_execute_empty_body_defaults() {
        let execution = execute::<BalanceResponse, _, _>(|| async { ok(204, "") }).await;
        let data = execution.data.unwrap();
        assert_eq!(data.status_code, 204);
        assert_eq!(data.balance, 0);
    }

    #[tokio::test]
    async fn test_execute_gateway_error_verbatim() {
        let execution = execute::<BalanceResponse, _, _>(|| async {
            ok(401, r#"{"message":"invalid api credentials"}"#)
        })
        .await;

        let data = execution.data.unwrap();
        assert_eq!(data.status_code, 401);
        assert_eq!(data.message.as_deref(), Some("invalid api credentials"));
    }

    #[tokio::test]
    async fn test_execute_transport_failure() {
        let execution = execute::<BalanceResponse, _, _>(|| async {
            Err(FapshiError::TransportError("connection refused".into()))
        })
        .await;

        assert!(execution.data.is_none());
        assert_eq!(execution.status, 500);
        assert_eq!(execution.error.as_deref(), Some("Transport error: connection refused"));

        let response = execution.into_response();
        assert_eq!(response.status_code, 500);
        assert_eq!(response.message.as_deref(), Some("Transport error: connection refused"));
        assert_eq!(response.balance, 0);
        assert!(response.currency.is_none());
    }

    #[tokio::test]
    async fn test_execute_transactions_failure_is_degraded() {
        let response = execute_transactions(|| async {
            Err(FapshiError::TransportError("timed out".into()))
        })
        .await;

        assert_eq!(response.status_code, 500);
        assert_eq!(response.message.as_deref(), Some("Transport error: timed out"));
        assert!(response.transactions.is_empty());
    }

    #[tokio::test]
    async fn test_execute_transactions_success() {
        let response = execute_transactions(|| async {
            ok(200, r#"[{"transId":"AAAA1111","amount":500,"status":"SUCCESSFUL"}]"#)
        })
        .await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.transactions.len(), 1);
        assert_eq!(response.transactions[0].trans_id, "AAAA1111");
    }

    #[test]
    fn test_into_response_prefers_data() {
        let execution = Execution {
            data: Some(BalanceResponse { status_code: 200, balance: 42, ..Default::default() }),
            error: None,
            status: 200,
        };
        assert_eq!(execution.into_response().balance, 42);
    }

    #[test]
    fn test_into_response_with_data_and_error_keeps_data() {
        let execution = Execution {
            data: Some(BalanceResponse { status_code: 200, balance: 42, ..Default::default() }),
            error: Some("ignored".to_owned()),
            status: 200,
        };
        let response = execution.into_response();
        assert_eq!(response.balance, 42);
        assert!(response.message.is_none());
    }

    #[test]
    fn test_into_response_without_data_is_degraded() {
        let execution = Execution::<BalanceResponse> { data: None, error: None, status: 503 };
        let response = execution.into_response();
        assert_eq!(response.status_code, 503);
        assert_eq!(response.balance, 0);
        assert!(response.message.is_none());
    }
}
