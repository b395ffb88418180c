//! Client configuration

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_CLIENT_ID, DEFAULT_TIMEOUT_SECS};
use crate::errors::ConfigError;

/// Configuration for a `VenmoClient`
///
/// Every field has a default, so partial JSON/TOML documents are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "https://api.venmo.com/v1")
    pub base_url: String,
    /// Client id used when the caller does not provide one
    pub default_client_id: String,
    /// Per-request timeout enforced by the transport
    pub timeout_secs: u64,
    /// Optional `User-Agent` override
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_client_id: DEFAULT_CLIENT_ID.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at a different base URL, everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    /// Check the configuration and return the parsed base URL.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if the base URL does not parse, is not
    /// http(s), cannot carry a path, or if the timeout or default client id are
    /// empty.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::Invalid(format!("base_url '{}': {e}", self.base_url)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if url.cannot_be_a_base() {
            return Err(ConfigError::Invalid(format!(
                "base_url '{}' cannot carry a path",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be greater than 0".into()));
        }
        if self.default_client_id.trim().is_empty() {
            return Err(ConfigError::Invalid("default_client_id must not be empty".into()));
        }

        Ok(url)
    }
}
