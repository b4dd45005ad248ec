//! eVatR client configuration.
//!
//! Defaults point to the production endpoint. Override via environment
//! variables or explicit construction for testing.

use std::time::Duration;

use url::Url;

/// Production eVatR XML-RPC endpoint.
pub const DEFAULT_BASE_URL: &str = "https://evatr.bff-online.de/evatrRPC";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where and how long to ask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvatrConfig {
    /// Endpoint the encoded query is appended to.
    pub base_url: Url,
    /// Upper bound for one request, including reading the body.
    pub timeout: Duration,
}

impl Default for EvatrConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl EvatrConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `EVATR_URL` (default: `https://evatr.bff-online.de/evatrRPC`)
    /// - `EVATR_TIMEOUT_SECS` (default: 10)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var("EVATR_URL") {
            config = config.with_base_url(&raw)?;
        }
        if let Ok(raw) = std::env::var("EVATR_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            config = config.with_timeout(Duration::from_secs(secs))?;
        }
        Ok(config)
    }

    /// Replace the endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `raw` is not an absolute http(s) URL.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(raw.into(), e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(
                raw.into(),
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        self.base_url = url;
        Ok(self)
    }

    /// Replace the timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTimeout` for a zero duration.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(format!("{timeout:?}")));
        }
        self.timeout = timeout;
        Ok(self)
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default eVatR URL is valid")
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid eVatR URL '{0}': {1}")]
    InvalidUrl(String, String),
    #[error("invalid timeout '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),
}
