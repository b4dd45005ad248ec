use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::status::MatchStatus;

/// eVatR error code for a confirmed VAT number.
pub const SUCCESS_CODE: i32 = 200;

/// eVatR error code for inputs that look plausible but were not confirmed.
pub const NOT_MATCHED_CODE: i32 = 206;

/// Input for a simple confirmation request (VAT number only).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimpleCheckInput {
    /// Own German VAT number (`UstId_1`).
    pub own_vat_number: String,
    /// Foreign VAT number to confirm (`UstId_2`).
    pub foreign_vat_number: String,
}

impl SimpleCheckInput {
    pub fn new(own_vat_number: impl Into<String>, foreign_vat_number: impl Into<String>) -> Self {
        Self {
            own_vat_number: own_vat_number.into(),
            foreign_vat_number: foreign_vat_number.into(),
        }
    }
}

/// Input for a qualified confirmation request (VAT number plus company data).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualifiedCheckInput {
    /// Own German VAT number (`UstId_1`).
    pub own_vat_number: String,
    /// Foreign VAT number to confirm (`UstId_2`).
    pub foreign_vat_number: String,
    /// Company name (`Firmenname`).
    pub company_name: String,
    /// City (`Ort`).
    pub city: String,
    /// Postal code (`PLZ`).
    pub post_code: String,
    /// Street and house number (`Strasse`).
    pub street: String,
    /// Request an official confirmation letter by post (`Druck`).
    pub print: bool,
}

impl QualifiedCheckInput {
    pub fn new(own_vat_number: impl Into<String>, foreign_vat_number: impl Into<String>) -> Self {
        Self {
            own_vat_number: own_vat_number.into(),
            foreign_vat_number: foreign_vat_number.into(),
            ..Default::default()
        }
    }

    pub fn company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = name.into();
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn post_code(mut self, post_code: impl Into<String>) -> Self {
        self.post_code = post_code.into();
        self
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = street.into();
        self
    }

    pub fn print(mut self, print: bool) -> Self {
        self.print = print;
        self
    }
}

/// Outcome of a simple confirmation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleCheckResult {
    /// Own VAT number as echoed by the service.
    pub own_vat_number: String,
    /// Confirmed VAT number as echoed by the service.
    pub validated_vat_number: String,
    /// eVatR error code; `0` if the response carried none.
    pub error_code: i32,
    /// `true` iff `error_code` is [`SUCCESS_CODE`].
    pub is_valid: bool,
    /// Start of validity (`Gueltig_ab`), for numbers not yet valid.
    pub valid_from: Option<NaiveDate>,
    /// End of validity (`Gueltig_bis`), for numbers no longer valid.
    pub valid_until: Option<NaiveDate>,
    /// Service timestamp of the request (`Datum` + `Uhrzeit`).
    pub requested_at: Option<NaiveDateTime>,
}

impl SimpleCheckResult {
    /// The service answered with [`NOT_MATCHED_CODE`].
    pub fn is_not_matched(&self) -> bool {
        self.error_code == NOT_MATCHED_CODE
    }
}

/// Outcome of a qualified confirmation request.
///
/// There is no overall validity flag: check `error_code` and the
/// per-field statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifiedCheckResult {
    pub own_vat_number: String,
    pub validated_vat_number: String,
    /// eVatR error code; `0` if the response carried none.
    pub error_code: i32,
    /// `Erg_Name`
    pub name: MatchStatus,
    /// `Erg_Ort`
    pub city: MatchStatus,
    /// `Erg_PLZ`
    pub post_code: MatchStatus,
    /// `Erg_Str`
    pub street: MatchStatus,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub requested_at: Option<NaiveDateTime>,
}
