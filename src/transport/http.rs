//! Blocking HTTP transport for the eVatR endpoint.

use std::time::Duration;

use url::Url;

use super::{EvatrConfig, Transport, TransportError};

/// GETs `<base_url>?<query>` with a blocking `reqwest` client.
///
/// The body is returned whatever the HTTP status: eVatR reports problems
/// through its own `ErrorCode` field. A body that cannot be read to the end
/// is a [`TransportError`], not a decode failure.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns `TransportError` if the TLS backend cannot be initialized.
    pub fn new(base_url: Url) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| TransportError::new(e.to_string()))?;
        Ok(Self { base_url, client })
    }

    /// # Errors
    ///
    /// See [`HttpTransport::new`].
    pub fn from_config(config: &EvatrConfig) -> Result<Self, TransportError> {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn get(&self, query: &str, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        let mut url = self.base_url.clone();
        url.set_query(Some(query));

        let resp = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(|e| TransportError::new(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(%status, "eVatR answered with non-success HTTP status");
        }

        let body = resp
            .bytes()
            .map_err(|e| TransportError::new(e.to_string()))?;
        Ok(body.to_vec())
    }
}
