use std::time::Duration;

use serde::Deserialize;

use crate::error::ClientError;

/// Production endpoint of the scraping API.
pub const DEFAULT_API_URL: &str = "https://api.askpablos.com/proxy";

/// Configuration for [`AskPablosClient`](crate::AskPablosClient).
///
/// Can be built in code with [`ClientConfig::new`] and the `with_*` methods,
/// or loaded from TOML:
///
/// ```toml
/// api_key = "my-api-key"
/// secret_key = "my-secret"
/// timeout_secs = 60
/// ```
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// API key sent in the `X-API-Key` header.
    pub api_key: String,

    /// Secret used to sign request bodies. Never sent over the wire.
    pub secret_key: String,

    /// Endpoint that receives the payload.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}

fn default_timeout_secs() -> u64 {
    30
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("secret_key", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration for the production endpoint.
    ///
    /// Defaults to a 30-second timeout.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Parse a configuration from a TOML document and validate it.
    pub fn from_toml_str(contents: &str) -> Result<Self, ClientError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ClientError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Override the API endpoint (useful for testing).
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reject configurations that cannot produce an authenticated request.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.api_key.trim().is_empty() {
            return Err(ClientError::Configuration(
                "api_key must not be empty".into(),
            ));
        }
        if self.secret_key.is_empty() {
            return Err(ClientError::Configuration(
                "secret_key must not be empty".into(),
            ));
        }
        if self.api_url.trim().is_empty() {
            return Err(ClientError::Configuration(
                "api_url must not be empty".into(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ClientError::Configuration(
                "timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ClientConfig::new("key", "secret");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.secret_key, "secret");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let config = ClientConfig::new("key", "secret")
            .with_api_url("http://localhost:9999/proxy")
            .with_timeout_secs(5);
        assert_eq!(config.api_url, "http://localhost:9999/proxy");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn toml_minimal_uses_defaults() {
        let config = ClientConfig::from_toml_str(
            r#"
            api_key = "key"
            secret_key = "secret"
            "#,
        )
        .unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn toml_full() {
        let config = ClientConfig::from_toml_str(
            r#"
            api_key = "key"
            secret_key = "secret"
            api_url = "https://staging.example.com/proxy"
            timeout_secs = 90
            "#,
        )
        .unwrap();
        assert_eq!(config.api_url, "https://staging.example.com/proxy");
        assert_eq!(config.timeout(), Duration::from_secs(90));
    }

    #[test]
    fn toml_missing_secret_is_rejected() {
        let err = ClientConfig::from_toml_str(r#"api_key = "key""#).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
        assert!(err.to_string().contains("secret_key"));
    }

    #[test]
    fn validate_rejects_empty_fields() {
        let err = ClientConfig::new(" ", "secret").validate().unwrap_err();
        assert!(err.to_string().contains("api_key"));

        let err = ClientConfig::new("key", "").validate().unwrap_err();
        assert!(err.to_string().contains("secret_key"));

        let err = ClientConfig::new("key", "secret")
            .with_api_url("")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("api_url"));

        let err = ClientConfig::new("key", "secret")
            .with_timeout_secs(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn debug_redacts_secrets() {
        let key = "test-key-placeholder";
        let secret = "test-secret-placeholder";
        let debug = format!("{:?}", ClientConfig::new(key, secret));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains(DEFAULT_API_URL));
        assert!(!debug.contains(key));
        assert!(!debug.contains(secret));
    }
}
