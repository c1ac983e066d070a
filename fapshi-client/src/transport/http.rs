//! HTTP transport implementation.
//!
//! HTTP/1.1 and HTTP/2 over reqwest with rustls. Credential headers are
//! installed as client defaults so individual requests never see them.

use reqwest::{
    Client,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use super::config::{HttpConfig, HttpVersion};
use crate::{
    error::{FapshiError, Result},
    transport::{Transport, TransportResponse},
};

const API_USER_HEADER: &str = "apiuser";
const API_KEY_HEADER: &str = "apikey";

/// Builds the default header set: credentials plus JSON content negotiation.
fn credential_headers(api_user: &str, api_key: &SecretString) -> Result<HeaderMap> {
    let user = HeaderValue::from_str(api_user).map_err(|_| {
        FapshiError::InvalidConfig("api_user contains characters not allowed in a header".into())
    })?;
    let mut key = HeaderValue::from_str(api_key.expose_secret()).map_err(|_| {
        FapshiError::InvalidConfig("api_key contains characters not allowed in a header".into())
    })?;
    key.set_sensitive(true);

    let mut headers = HeaderMap::with_capacity(4);
    headers.insert(API_USER_HEADER, user);
    headers.insert(API_KEY_HEADER, key);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// reqwest-backed [`Transport`] authenticated with the gateway's
/// `apiuser`/`apikey` header pair.
///
/// Connection pooling, keep-alive and HTTP/2 multiplexing come from reqwest.
/// Cloning is cheap and shares the pool.
///
/// # Examples
///
/// ```
/// use fapshi_client::transport::{HttpConfig, HttpTransport};
/// use secrecy::SecretString;
///
/// let transport = HttpTransport::new(
///     "my-api-user",
///     &SecretString::from("my-api-key"),
///     &HttpConfig::default(),
/// )?;
/// # Ok::<(), fapshi_client::FapshiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    http_version: HttpVersion,
}

impl HttpTransport {
    /// Creates a transport with the credential headers attached.
    ///
    /// # Errors
    ///
    /// Returns [`FapshiError::InvalidConfig`] if a credential cannot be sent
    /// as a header value or the HTTP settings are out of bounds, and
    /// [`FapshiError::HttpError`] if the reqwest client cannot be built.
    pub fn new(api_user: &str, api_key: &SecretString, config: &HttpConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .default_headers(credential_headers(api_user, api_key)?)
            .user_agent(config.user_agent.as_str())
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout());

        builder = match config.http_version {
            HttpVersion::Http1 => builder.http1_only(),
            HttpVersion::Auto => builder,
        };

        let client = builder.build().map_err(FapshiError::HttpError)?;

        Ok(Self { client, http_version: config.http_version })
    }

    async fn read(response: reqwest::Response) -> Result<TransportResponse> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(FapshiError::HttpError)?;
        debug!(status, body_len = body.len(), "gateway responded");
        Ok(TransportResponse { status, body })
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self), fields(method = "GET"))]
    async fn get<'a>(&'a self, url: &'a str) -> Result<TransportResponse> {
        let response = self.client.get(url).send().await?;
        Self::read(response).await
    }

    #[instrument(skip(self, body), fields(method = "POST", body_len = body.len()))]
    async fn post<'a>(&'a self, url: &'a str, body: Vec<u8>) -> Result<TransportResponse> {
        let response = self.client.post(url).body(body).send().await?;
        Self::read(response).await
    }

    fn protocol_name(&self) -> &'static str {
        match self.http_version {
            HttpVersion::Http1 => "http/1.1",
            HttpVersion::Auto => "http",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SecretString {
        SecretString::from("sk-test-123")
    }

    #[test]
    fn test_http_transport_new() {
        let transport = HttpTransport::new("user", &key(), &HttpConfig::default());
        assert!(transport.is_ok());
    }

    #[test]
    fn test_http_transport_protocol_name() {
        let http1 = HttpConfig { http_version: HttpVersion::Http1, ..Default::default() };
        let transport = HttpTransport::new("user", &key(), &http1).unwrap();
        assert_eq!(transport.protocol_name(), "http/1.1");

        let transport = HttpTransport::new("user", &key(), &HttpConfig::default()).unwrap();
        assert_eq!(transport.protocol_name(), "http");
    }

    #[test]
    fn test_http_transport_rejects_invalid_config() {
        let config = HttpConfig { timeout_secs: 0, ..Default::default() };
        let result = HttpTransport::new("user", &key(), &config);
        assert!(matches!(result.unwrap_err(), FapshiError::InvalidConfig(_)));
    }

    #[test]
    fn test_credential_headers() {
        let headers = credential_headers("user-1", &key()).unwrap();
        assert_eq!(headers[API_USER_HEADER], "user-1");
        assert_eq!(headers[API_KEY_HEADER], "sk-test-123");
        assert!(headers[API_KEY_HEADER].is_sensitive());
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_credential_headers_crlf_rejected() {
        let result = credential_headers("user\r\nX-Evil: 1", &key());
        assert!(matches!(result.unwrap_err(), FapshiError::InvalidConfig(_)));

        let result = credential_headers("user", &SecretString::from("key\n"));
        assert!(matches!(result.unwrap_err(), FapshiError::InvalidConfig(_)));
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let transport = HttpTransport::new("user", &key(), &HttpConfig::default()).unwrap();
        let debug_str = format!("{transport:?}");
        assert!(debug_str.contains("HttpTransport"));
        assert!(!debug_str.contains("sk-test-123"));
    }

    #[tokio::test]
    async fn test_http_transport_connection_refused() {
        let config = HttpConfig { connect_timeout_secs: 1, timeout_secs: 2, ..Default::default() };
        let transport = HttpTransport::new("user", &key(), &config).unwrap();

        // Port 9 (discard) is closed on loopback in test environments.
        let result = transport.get("http://127.0.0.1:9/balance").await;
        assert!(matches!(result.unwrap_err(), FapshiError::HttpError(_)));
    }
}
