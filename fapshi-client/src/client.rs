//! Gateway operations.
//!
//! [`FapshiClient`] exposes one async method per Fapshi endpoint. Each method
//! validates its input, builds the JSON payload, performs exactly one
//! transport call and normalizes the outcome into a typed response. None of
//! them return `Err`: validation failures come back with status 400,
//! transport failures with status 500, and gateway errors with the gateway's
//! own status and message.

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;
use std::collections::HashMap;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::{
    config::FapshiConfig,
    error::Result,
    executor::{TRANSPORT_FAILURE_STATUS, execute, execute_transactions},
    models::{
        BalanceResponse, DirectPayResponse, Envelope, ExpirePayResponse, InitiatePayResponse,
        PaymentStatusResponse, PayoutResponse, UserTransactionsResponse,
    },
    request::{
        ExpirePayRequest, InitiatePayRequest, PaymentLinkOptions, PhoneAmountRequest,
        encode_query,
    },
    transport::{HttpTransport, Transport},
    validation::{
        ValidationError, validate_amount, validate_filters, validate_phone,
        validate_transaction_id, validate_user_id,
    },
};

/// Status reported when caller input is rejected before any call is made.
pub const VALIDATION_FAILURE_STATUS: u16 = 400;

/// The Fapshi operation surface.
///
/// Implemented by [`FapshiClient`]; code that only needs the operations can
/// depend on this trait and receive a substitute in tests.
pub trait FapshiApi: Send + Sync {
    /// Creates a hosted payment link for `amount` XAF.
    fn create_payment_link(
        &self,
        amount: i64,
        options: PaymentLinkOptions,
    ) -> impl Future<Output = InitiatePayResponse> + Send;

    /// Charges a mobile-money wallet directly.
    fn charge_phone_wallet(
        &self,
        amount: i64,
        phone: &str,
    ) -> impl Future<Output = DirectPayResponse> + Send;

    /// Looks up the status of a transaction.
    fn get_payment_status(
        &self,
        trans_id: &str,
    ) -> impl Future<Output = PaymentStatusResponse> + Send;

    /// Expires an unpaid payment link.
    fn cancel_payment_link(
        &self,
        trans_id: &str,
    ) -> impl Future<Output = ExpirePayResponse> + Send;

    /// Reads the merchant account balance.
    fn get_account_balance(&self) -> impl Future<Output = BalanceResponse> + Send;

    /// Sends `amount` XAF to a mobile-money wallet.
    fn disburse_to_phone(
        &self,
        amount: i64,
        phone: &str,
    ) -> impl Future<Output = PayoutResponse> + Send;

    /// Lists transactions tagged with `user_id`.
    fn get_user_transactions(
        &self,
        user_id: &str,
    ) -> impl Future<Output = UserTransactionsResponse> + Send;

    /// Searches transactions by arbitrary filters.
    fn search_transactions<S: Sync>(
        &self,
        filters: &HashMap<String, String, S>,
    ) -> impl Future<Output = UserTransactionsResponse> + Send;
}

/// Client for the Fapshi payment gateway.
///
/// Cheap to share: operations take `&self` and hold no mutable state, so one
/// client can serve many tasks behind an `Arc`.
///
/// # Examples
///
/// ```no_run
/// use fapshi_client::{FapshiClient, FapshiConfig, PaymentLinkOptions};
///
/// # async fn run() -> fapshi_client::Result<()> {
/// let client = FapshiClient::new(FapshiConfig::sandbox("api-user", "api-key"))?;
///
/// let response = client
///     .create_payment_link(5000, PaymentLinkOptions::new().email("buyer@example.com"))
///     .await;
///
/// if response.status_code == 200 {
///     println!("send the payer to {:?}", response.link);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FapshiClient<T: Transport = HttpTransport> {
    base_url: String,
    transport: T,
}

impl FapshiClient<HttpTransport> {
    /// Creates a client backed by a pooled HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`FapshiError::MissingCredentials`](crate::FapshiError::MissingCredentials)
    /// on blank credentials, [`FapshiError::InvalidBaseUrl`](crate::FapshiError::InvalidBaseUrl)
    /// on an unusable base URL, and [`FapshiError::InvalidConfig`](crate::FapshiError::InvalidConfig)
    /// or [`FapshiError::HttpError`](crate::FapshiError::HttpError) if the
    /// transport cannot be built.
    pub fn new(config: FapshiConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config.api_user, &config.api_key, &config.http)?;
        Ok(Self::from_parts(&config, transport))
    }
}

impl<T: Transport> FapshiClient<T> {
    /// Creates a client over a caller-supplied transport.
    ///
    /// The transport is responsible for attaching credentials; the config is
    /// still validated so a misconfigured client never reaches a request.
    ///
    /// # Errors
    ///
    /// Same validation failures as [`FapshiClient::new`].
    pub fn with_transport(config: FapshiConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(&config, transport))
    }

    fn from_parts(config: &FapshiConfig, transport: T) -> Self {
        debug!(
            base_url = config.trimmed_base_url(),
            protocol = transport.protocol_name(),
            "fapshi client ready"
        );
        Self { base_url: config.trimmed_base_url().to_owned(), transport }
    }

    /// Base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates a hosted payment link.
    ///
    /// `POST /initiate-pay`. Only options that were set, and are not blank,
    /// are sent.
    #[instrument(skip(self, options), fields(external_id = options.external_id.as_deref()))]
    pub async fn create_payment_link(
        &self,
        amount: i64,
        options: PaymentLinkOptions,
    ) -> InitiatePayResponse {
        if let Err(e) = validate_amount(amount) {
            return rejected(e);
        }
        self.post("/initiate-pay", &InitiatePayRequest::new(amount, &options)).await
    }

    /// Charges a mobile-money wallet without a hosted page.
    ///
    /// `POST /direct-pay`. The amount is checked before the phone number.
    #[instrument(skip(self, phone), fields(phone = %mask_phone(phone)))]
    pub async fn charge_phone_wallet(&self, amount: i64, phone: &str) -> DirectPayResponse {
        if let Err(e) = validate_amount(amount).and_then(|()| validate_phone(phone)) {
            return rejected(e);
        }
        self.post("/direct-pay", &PhoneAmountRequest { amount, phone }).await
    }

    /// `GET /payment-status/{trans_id}`.
    #[instrument(skip(self))]
    pub async fn get_payment_status(&self, trans_id: &str) -> PaymentStatusResponse {
        if let Err(e) = validate_transaction_id(trans_id) {
            return rejected(e);
        }
        self.get(&format!("/payment-status/{trans_id}")).await
    }

    /// Expires a payment link so it can no longer be paid.
    ///
    /// `POST /expire-pay`.
    #[instrument(skip(self))]
    pub async fn cancel_payment_link(&self, trans_id: &str) -> ExpirePayResponse {
        if let Err(e) = validate_transaction_id(trans_id) {
            return rejected(e);
        }
        self.post("/expire-pay", &ExpirePayRequest { trans_id }).await
    }

    /// `GET /balance`.
    #[instrument(skip(self))]
    pub async fn get_account_balance(&self) -> BalanceResponse {
        self.get("/balance").await
    }

    /// Pays `amount` XAF out to a mobile-money wallet.
    ///
    /// `POST /payout`. The amount is checked before the phone number.
    #[instrument(skip(self, phone), fields(phone = %mask_phone(phone)))]
    pub async fn disburse_to_phone(&self, amount: i64, phone: &str) -> PayoutResponse {
        if let Err(e) = validate_amount(amount).and_then(|()| validate_phone(phone)) {
            return rejected(e);
        }
        self.post("/payout", &PhoneAmountRequest { amount, phone }).await
    }

    /// `GET /transaction/{user_id}`.
    #[instrument(skip(self))]
    pub async fn get_user_transactions(&self, user_id: &str) -> UserTransactionsResponse {
        if let Err(e) = validate_user_id(user_id) {
            return rejected(e);
        }
        let url = self.url(&format!("/transaction/{user_id}"));
        execute_transactions(|| self.transport.get(&url)).await
    }

    /// `GET /search?{filters}`.
    ///
    /// Filters are form-encoded in key order, so equal maps yield equal URLs.
    #[instrument(skip(self, filters), fields(filter_count = filters.len()))]
    pub async fn search_transactions<S: Sync>(
        &self,
        filters: &HashMap<String, String, S>,
    ) -> UserTransactionsResponse {
        if let Err(e) = validate_filters(filters) {
            return rejected(e);
        }
        let url = self.url(&format!("/search?{}", encode_query(filters)));
        execute_transactions(|| self.transport.get(&url)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get<R>(&self, path: &str) -> R
    where
        R: DeserializeOwned + Envelope,
    {
        let url = self.url(path);
        execute(|| self.transport.get(&url)).await.into_response()
    }

    async fn post<R, B>(&self, path: &str, body: &B) -> R
    where
        R: DeserializeOwned + Envelope,
        B: Serialize + Sync + ?Sized,
    {
        let payload = match serde_json::to_vec(body) {
            Ok(payload) => payload,
            Err(e) => {
                return R::degraded(
                    TRANSPORT_FAILURE_STATUS,
                    Some(format!("failed to encode request body: {e}")),
                );
            }
        };
        let url = self.url(path);
        execute(|| self.transport.post(&url, payload)).await.into_response()
    }
}

impl<T: Transport> FapshiApi for FapshiClient<T> {
    async fn create_payment_link(
        &self,
        amount: i64,
        options: PaymentLinkOptions,
    ) -> InitiatePayResponse {
        Self::create_payment_link(self, amount, options).await
    }

    async fn charge_phone_wallet(&self, amount: i64, phone: &str) -> DirectPayResponse {
        Self::charge_phone_wallet(self, amount, phone).await
    }

    async fn get_payment_status(&self, trans_id: &str) -> PaymentStatusResponse {
        Self::get_payment_status(self, trans_id).await
    }

    async fn cancel_payment_link(&self, trans_id: &str) -> ExpirePayResponse {
        Self::cancel_payment_link(self, trans_id).await
    }

    async fn get_account_balance(&self) -> BalanceResponse {
        Self::get_account_balance(self).await
    }

    async fn disburse_to_phone(&self, amount: i64, phone: &str) -> PayoutResponse {
        Self::disburse_to_phone(self, amount, phone).await
    }

    async fn get_user_transactions(&self, user_id: &str) -> UserTransactionsResponse {
        Self::get_user_transactions(self, user_id).await
    }

    async fn search_transactions<S: Sync>(
        &self,
        filters: &HashMap<String, String, S>,
    ) -> UserTransactionsResponse {
        Self::search_transactions(self, filters).await
    }
}

fn rejected<R: Envelope>(error: ValidationError) -> R {
    debug!(reason = %error, "input rejected");
    R::degraded(VALIDATION_FAILURE_STATUS, Some(error.to_string()))
}

/// Keeps the last three digits of a phone number for log output.
fn mask_phone(phone: &str) -> String {
    let visible = phone.len().saturating_sub(3);
    match phone.get(visible..) {
        Some(tail) if visible > 0 => format!("{}{tail}", "*".repeat(visible)),
        _ => "*".repeat(phone.chars().count()),
    }
}
