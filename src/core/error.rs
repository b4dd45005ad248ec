use thiserror::Error;

use crate::transport::{ConfigError, TransportError};

/// Errors that can occur while checking a VAT number with eVatR.
///
/// A response that reports a mismatch is not an error; it comes back as a
/// regular result with the service's error code set.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EvatrError {
    /// The own (German) VAT number is malformed. No request was sent.
    #[error("input: the German VAT number '{0}' is invalid")]
    InvalidDomesticVat(String),

    /// The foreign VAT number is malformed or its country is unsupported.
    /// No request was sent.
    #[error("input: the foreign VAT number '{0}' is invalid")]
    InvalidForeignVat(String),

    /// The eVatR service could not be reached or did not answer in time.
    #[error("the eVatR service is not reachable: {0}")]
    ServiceUnreachable(#[from] TransportError),

    /// The response body is not well-formed XML. Carries the parser's own
    /// error unchanged.
    #[error(transparent)]
    Decode(#[from] quick_xml::Error),

    /// The response body is well-formed so far but contains no document at
    /// all (empty body, plain text).
    #[error("malformed eVatR response: {0}")]
    MalformedResponse(String),

    /// Client configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl EvatrError {
    /// `true` for input errors, which are raised before any network I/O.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidDomesticVat(_) | Self::InvalidForeignVat(_))
    }

    /// `true` if the service answered with a body that could not be decoded.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::MalformedResponse(_))
    }
}
