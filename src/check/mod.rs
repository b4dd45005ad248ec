//! Simple and qualified eVatR confirmation requests.
//!
//! Both checks validate the own (German) number first, then the foreign
//! number, and only then send exactly one request. Invalid input never
//! reaches the transport.
//!
//! # Example
//!
//! ```ignore
//! use evatr::check::Checker;
//! use evatr::core::SimpleCheckInput;
//!
//! let checker = Checker::from_env()?;
//! let result = checker.check_simple(&SimpleCheckInput::new("DE115235681", "LU 26375245"))?;
//! assert!(result.is_valid);
//! ```

use url::form_urlencoded;

use crate::core::{
    EvatrError, QualifiedCheckInput, QualifiedCheckResult, SUCCESS_CODE, SimpleCheckInput,
    SimpleCheckResult, VatNumber,
};
use crate::rpc::{ResponseDocument, fields};
use crate::transport::{EvatrConfig, Transport};

/// Request parameter names.
mod params {
    pub const OWN_VAT: &str = "UstId_1";
    pub const FOREIGN_VAT: &str = "UstId_2";
    pub const COMPANY_NAME: &str = "Firmenname";
    pub const CITY: &str = "Ort";
    pub const POST_CODE: &str = "PLZ";
    pub const STREET: &str = "Strasse";
    pub const PRINT: &str = "Druck";
}

/// Runs confirmation requests over a [`Transport`].
///
/// Holds no per-request state; one `Checker` can serve any number of
/// callers.
#[derive(Debug, Clone)]
pub struct Checker<T> {
    transport: T,
    config: EvatrConfig,
}

impl<T: Transport> Checker<T> {
    /// Use `transport` with the default configuration.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, EvatrConfig::default())
    }

    pub fn with_config(transport: T, config: EvatrConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &EvatrConfig {
        &self.config
    }

    /// Confirm that `foreign_vat_number` is valid.
    ///
    /// # Errors
    ///
    /// - [`EvatrError::InvalidDomesticVat`] / [`EvatrError::InvalidForeignVat`]
    ///   for malformed input (no request is sent),
    /// - [`EvatrError::ServiceUnreachable`] on connectivity failures,
    ///   including a body cut off mid-read,
    /// - [`EvatrError::Decode`] if the response is not well-formed XML,
    /// - [`EvatrError::MalformedResponse`] if it contains no XML document.
    ///
    /// A non-200 error code is not an error; see `is_valid`.
    pub fn check_simple(&self, input: &SimpleCheckInput) -> Result<SimpleCheckResult, EvatrError> {
        let own = VatNumber::domestic(&input.own_vat_number)?;
        let foreign = VatNumber::foreign(&input.foreign_vat_number)?;

        tracing::debug!(
            kind = "simple",
            own_country = own.country(),
            foreign_country = foreign.country(),
            "sending eVatR confirmation request"
        );
        let doc = self.send(&simple_query(&own, &foreign))?;

        let error_code = doc.error_code();
        tracing::debug!(error_code, "eVatR simple check answered");

        Ok(SimpleCheckResult {
            own_vat_number: doc.value_or_empty(fields::OWN_VAT).to_string(),
            validated_vat_number: doc.value_or_empty(fields::FOREIGN_VAT).to_string(),
            error_code,
            is_valid: error_code == SUCCESS_CODE,
            valid_from: doc.date(fields::VALID_FROM),
            valid_until: doc.date(fields::VALID_UNTIL),
            requested_at: doc.requested_at(),
        })
    }

    /// Confirm `foreign_vat_number` together with company name and address.
    ///
    /// # Errors
    ///
    /// Same as [`check_simple`](Self::check_simple).
    pub fn check_qualified(
        &self,
        input: &QualifiedCheckInput,
    ) -> Result<QualifiedCheckResult, EvatrError> {
        let own = VatNumber::domestic(&input.own_vat_number)?;
        let foreign = VatNumber::foreign(&input.foreign_vat_number)?;

        tracing::debug!(
            kind = "qualified",
            own_country = own.country(),
            foreign_country = foreign.country(),
            print = input.print,
            "sending eVatR confirmation request"
        );
        let doc = self.send(&qualified_query(&own, &foreign, input))?;

        let error_code = doc.error_code();
        tracing::debug!(error_code, "eVatR qualified check answered");

        Ok(QualifiedCheckResult {
            own_vat_number: doc.value_or_empty(fields::OWN_VAT).to_string(),
            validated_vat_number: doc.value_or_empty(fields::FOREIGN_VAT).to_string(),
            error_code,
            name: doc.match_status(fields::MATCH_NAME),
            city: doc.match_status(fields::MATCH_CITY),
            post_code: doc.match_status(fields::MATCH_POST_CODE),
            street: doc.match_status(fields::MATCH_STREET),
            valid_from: doc.date(fields::VALID_FROM),
            valid_until: doc.date(fields::VALID_UNTIL),
            requested_at: doc.requested_at(),
        })
    }

    fn send(&self, query: &str) -> Result<ResponseDocument, EvatrError> {
        let body = self
            .transport
            .get(query, self.config.timeout)
            .inspect_err(|e| tracing::warn!(error = %e, "eVatR request failed"))?;
        ResponseDocument::parse(&body)
    }
}

#[cfg(feature = "http")]
impl Checker<crate::transport::HttpTransport> {
    /// HTTP checker for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`EvatrError::ServiceUnreachable`] if the HTTP client cannot
    /// be built.
    pub fn from_config(config: EvatrConfig) -> Result<Self, EvatrError> {
        let transport = crate::transport::HttpTransport::from_config(&config)?;
        Ok(Self::with_config(transport, config))
    }

    /// HTTP checker configured from `EVATR_URL` / `EVATR_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns [`EvatrError::Config`] for unparseable variables.
    pub fn from_env() -> Result<Self, EvatrError> {
        Self::from_config(EvatrConfig::from_env()?)
    }
}

fn print_flag(print: bool) -> &'static str {
    if print { "ja" } else { "nein" }
}

/// URL-encode `pairs` with keys in ascending order.
fn encode(mut pairs: Vec<(&str, &str)>) -> String {
    pairs.sort_by_key(|&(k, _)| k);
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

fn simple_query(own: &VatNumber, foreign: &VatNumber) -> String {
    encode(vec![
        (params::OWN_VAT, own.as_str()),
        (params::FOREIGN_VAT, foreign.as_str()),
    ])
}

fn qualified_query(own: &VatNumber, foreign: &VatNumber, input: &QualifiedCheckInput) -> String {
    encode(vec![
        (params::OWN_VAT, own.as_str()),
        (params::FOREIGN_VAT, foreign.as_str()),
        (params::COMPANY_NAME, input.company_name.as_str()),
        (params::CITY, input.city.as_str()),
        (params::POST_CODE, input.post_code.as_str()),
        (params::STREET, input.street.as_str()),
        (params::PRINT, print_flag(input.print)),
    ])
}
