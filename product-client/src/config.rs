//! Client configuration

use crate::{ClientResult, NetworkHttpClient};

/// Client configuration for connecting to the product API
///
/// # Environment
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | PRODUCT_API_URL | http://localhost:8080 | Backend base URL |
/// | PRODUCT_API_KEY | - | Value sent as `X-Api-Key` on create/update/delete |
/// | PRODUCT_API_TIMEOUT_SECS | - | Request timeout; transport default when unset |
#[derive(Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Shared secret for write operations
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: None,
        }
    }

    /// Load configuration from the environment
    ///
    /// Unset or unparsable variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("PRODUCT_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
            api_key: std::env::var("PRODUCT_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            timeout: std::env::var("PRODUCT_API_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok()),
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

// API key stays out of logs
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("http://api.local:9000")
            .with_api_key("secret")
            .with_timeout(5);

        assert_eq!(config.base_url, "http://api.local:9000");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Some(5));
    }

    #[test]
    fn test_default_has_no_key_or_timeout() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(config.api_key.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::default().with_api_key("c38e5e97");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("c38e5e97"));
        assert!(debug.contains("***"));
    }
}
