//! Client configuration.
//!
//! Credentials and base URL are fixed for the lifetime of a client. They can
//! be built in code, parsed from TOML, or read from the environment.
//!
//! ```toml
//! api_user = "c0ffee-user"
//! api_key = "FAK_TEST_0123456789"
//! base_url = "https://sandbox.fapshi.com"
//!
//! [http]
//! timeout_secs = 20
//! ```

use std::{env, fmt};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use url::Url;

use crate::{
    error::{FapshiError, Result},
    transport::HttpConfig,
};

/// Production gateway.
pub const LIVE_BASE_URL: &str = "https://live.fapshi.com";

/// Sandbox gateway; accepts test credentials and never moves money.
pub const SANDBOX_BASE_URL: &str = "https://sandbox.fapshi.com";

/// Environment variable holding the API user.
pub const API_USER_ENV: &str = "FAPSHI_API_USER";
/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "FAPSHI_API_KEY";
/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "FAPSHI_BASE_URL";

/// Credentials, endpoint and HTTP tuning for a [`FapshiClient`](crate::FapshiClient).
#[derive(Clone, Deserialize)]
pub struct FapshiConfig {
    /// API user identifier from the Fapshi dashboard.
    pub api_user: String,

    /// API key. Never logged or printed.
    #[serde(deserialize_with = "deserialize_secret")]
    pub api_key: SecretString,

    /// Gateway root, without a trailing path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
}

impl fmt::Debug for FapshiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FapshiConfig")
            .field("api_user", &self.api_user)
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("http", &self.http)
            .finish()
    }
}

impl FapshiConfig {
    /// Creates a configuration for the live gateway.
    ///
    /// # Examples
    ///
    /// ```
    /// use fapshi_client::config::{FapshiConfig, LIVE_BASE_URL};
    ///
    /// let config = FapshiConfig::new("api-user", "api-key");
    /// assert_eq!(config.base_url, LIVE_BASE_URL);
    /// ```
    #[must_use]
    pub fn new(api_user: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_user: api_user.into(),
            api_key: SecretString::from(api_key.into()),
            base_url: default_base_url(),
            http: HttpConfig::default(),
        }
    }

    /// Creates a configuration for the sandbox gateway.
    #[must_use]
    pub fn sandbox(api_user: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::new(api_user, api_key).with_base_url(SANDBOX_BASE_URL)
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the HTTP settings.
    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`FapshiError::InvalidConfig`] if the document is malformed or
    /// misses a credential key.
    pub fn from_toml(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| FapshiError::InvalidConfig(e.to_string()))
    }

    /// Reads [`API_USER_ENV`], [`API_KEY_ENV`] and, if set, [`BASE_URL_ENV`].
    ///
    /// # Errors
    ///
    /// Returns [`FapshiError::MissingCredentials`] if either credential
    /// variable is unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_user = lookup(API_USER_ENV).ok_or(FapshiError::MissingCredentials)?;
        let api_key = lookup(API_KEY_ENV).ok_or(FapshiError::MissingCredentials)?;

        let mut config = Self::new(api_user, api_key);
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url;
        }
        Ok(config)
    }

    /// Checks credentials, base URL and HTTP settings.
    ///
    /// # Errors
    ///
    /// - [`FapshiError::MissingCredentials`] when either credential is blank
    /// - [`FapshiError::InvalidBaseUrl`] when the base URL does not parse, is
    ///   not `http`/`https`, or carries a query or fragment
    /// - [`FapshiError::InvalidConfig`] when HTTP settings are out of range
    pub fn validate(&self) -> Result<()> {
        if self.api_user.trim().is_empty() || self.api_key.expose_secret().trim().is_empty() {
            return Err(FapshiError::MissingCredentials);
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| FapshiError::InvalidBaseUrl(format!("'{}': {e}", self.base_url)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(FapshiError::InvalidBaseUrl(format!(
                "scheme must be http or https, got: {}",
                url.scheme()
            )));
        }
        if url.host_str().is_none() {
            return Err(FapshiError::InvalidBaseUrl(format!("missing host: {}", self.base_url)));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(FapshiError::InvalidBaseUrl(
                "base URL must not carry a query or fragment".to_owned(),
            ));
        }

        self.http.validate()
    }

    /// Base URL without trailing slashes, ready for path concatenation.
    #[must_use]
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn default_base_url() -> String {
    LIVE_BASE_URL.to_owned()
}

fn deserialize_secret<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_new_defaults() {
        let config = FapshiConfig::new("user", "key");
        assert_eq!(config.api_user, "user");
        assert_eq!(config.api_key.expose_secret(), "key");
        assert_eq!(config.base_url, LIVE_BASE_URL);
        assert_eq!(config.http, HttpConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sandbox() {
        let config = FapshiConfig::sandbox("user", "key");
        assert_eq!(config.base_url, SANDBOX_BASE_URL);
    }

    #[test]
    fn test_blank_credentials_rejected() {
        for (user, key) in [("", "key"), ("user", ""), ("   ", "key"), ("user", "\t")] {
            let config = FapshiConfig::new(user, key);
            assert!(matches!(config.validate().unwrap_err(), FapshiError::MissingCredentials));
        }
    }

    #[test]
    fn test_invalid_base_urls() {
        for base_url in [
            "not a url",
            "ftp://live.fapshi.com",
            "https://live.fapshi.com?x=1",
            "https://live.fapshi.com#frag",
        ] {
            let config = FapshiConfig::new("user", "key").with_base_url(base_url);
            assert!(
                matches!(config.validate().unwrap_err(), FapshiError::InvalidBaseUrl(_)),
                "{base_url} should be rejected"
            );
        }
    }

    #[test]
    fn test_plain_http_allowed_for_local_gateways() {
        let config = FapshiConfig::new("user", "key").with_base_url("http://127.0.0.1:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_trimmed_base_url() {
        let config = FapshiConfig::new("user", "key").with_base_url("https://sandbox.fapshi.com//");
        assert_eq!(config.trimmed_base_url(), "https://sandbox.fapshi.com");
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
            api_user = "user-1"
            api_key = "key-1"
            base_url = "https://sandbox.fapshi.com"

            [http]
            timeout_secs = 20
        "#;

        let config = FapshiConfig::from_toml(toml).unwrap();
        assert_eq!(config.api_user, "user-1");
        assert_eq!(config.api_key.expose_secret(), "key-1");
        assert_eq!(config.base_url, SANDBOX_BASE_URL);
        assert_eq!(config.http.timeout_secs, 20);
        assert_eq!(config.http.connect_timeout_secs, 10);
    }

    #[test]
    fn test_from_toml_minimal() {
        let config = FapshiConfig::from_toml("api_user = \"u\"\napi_key = \"k\"").unwrap();
        assert_eq!(config.base_url, LIVE_BASE_URL);
    }

    #[test]
    fn test_from_toml_missing_key() {
        let result = FapshiConfig::from_toml("api_user = \"u\"");
        assert!(matches!(result.unwrap_err(), FapshiError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_lookup() {
        let vars = HashMap::from([
            (API_USER_ENV, "env-user"),
            (API_KEY_ENV, "env-key"),
            (BASE_URL_ENV, "https://sandbox.fapshi.com"),
        ]);
        let config =
            FapshiConfig::from_lookup(|name| vars.get(name).map(|v| (*v).to_owned())).unwrap();
        assert_eq!(config.api_user, "env-user");
        assert_eq!(config.base_url, SANDBOX_BASE_URL);
    }

    #[test]
    fn test_from_lookup_missing_key() {
        let vars = HashMap::from([(API_USER_ENV, "env-user")]);
        let result = FapshiConfig::from_lookup(|name| vars.get(name).map(|v| (*v).to_owned()));
        assert!(matches!(result.unwrap_err(), FapshiError::MissingCredentials));
    }

    #[test]
    fn test_from_lookup_blank_base_url_keeps_default() {
        let vars = HashMap::from([(API_USER_ENV, "u"), (API_KEY_ENV, "k"), (BASE_URL_ENV, " ")]);
        let config =
            FapshiConfig::from_lookup(|name| vars.get(name).map(|v| (*v).to_owned())).unwrap();
        assert_eq!(config.base_url, LIVE_BASE_URL);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = FapshiConfig::new("user", "super-secret-key");
        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("super-secret-key"));
    }
}
