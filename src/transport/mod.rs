//! Transport seam between the check orchestrator and the network.
//!
//! [`Checker`](crate::check::Checker) only needs "send this query, give me
//! the body". Tests plug in an in-memory [`Transport`]; production code
//! uses [`HttpTransport`] (feature `http`).

mod config;
#[cfg(feature = "http")]
mod http;

pub use config::{ConfigError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, EvatrConfig};
#[cfg(feature = "http")]
pub use http::HttpTransport;

use std::time::Duration;

/// Connectivity failure: DNS, TLS, connection reset, timeout, or a body
/// that could not be read. Causes are not distinguished.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Sends one encoded eVatR query and returns the raw response body.
pub trait Transport {
    /// Issue a single request with `query` (already URL-encoded, without
    /// the leading `?`) and wait at most `timeout` for the full body.
    ///
    /// # Errors
    ///
    /// Any failure before the complete body is in hand is a
    /// `TransportError`, and so surfaces as
    /// [`EvatrError::ServiceUnreachable`](crate::core::EvatrError::ServiceUnreachable).
    /// That includes a connection dropped while the body is being read,
    /// even after a success status line. Only a fully received body is
    /// handed to the XML decoder.
    fn get(&self, query: &str, timeout: Duration) -> Result<Vec<u8>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, query: &str, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        (**self).get(query, timeout)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, query: &str, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        (**self).get(query, timeout)
    }
}
