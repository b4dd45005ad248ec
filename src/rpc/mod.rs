//! eVatR XML-RPC response decoding.
//!
//! The service encodes its answer as a list of two-element string arrays,
//! `[field name, value]`. [`ResponseDocument`] keeps that generic shape;
//! the helpers here turn named fields into typed values so callers never
//! deal with array positions.

mod document;

pub use document::{Param, ResponseDocument};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::core::MatchStatus;

/// Response field names.
pub mod fields {
    pub const ERROR_CODE: &str = "ErrorCode";
    pub const OWN_VAT: &str = "UstId_1";
    pub const FOREIGN_VAT: &str = "UstId_2";
    pub const DATE: &str = "Datum";
    pub const TIME: &str = "Uhrzeit";
    pub const VALID_FROM: &str = "Gueltig_ab";
    pub const VALID_UNTIL: &str = "Gueltig_bis";
    pub const MATCH_NAME: &str = "Erg_Name";
    pub const MATCH_CITY: &str = "Erg_Ort";
    pub const MATCH_POST_CODE: &str = "Erg_PLZ";
    pub const MATCH_STREET: &str = "Erg_Str";
}

const DATE_FORMAT: &str = "%d.%m.%Y";
const TIME_FORMAT: &str = "%H:%M:%S";

impl ResponseDocument {
    /// Numeric `ErrorCode`. Missing or non-numeric codes read as `0`.
    pub fn error_code(&self) -> i32 {
        self.value(fields::ERROR_CODE)
            .and_then(|c| c.parse().ok())
            .unwrap_or(0)
    }

    /// Translate the letter code stored under `field`.
    pub fn match_status(&self, field: &str) -> MatchStatus {
        MatchStatus::from_code(self.value_or_empty(field))
    }

    /// A `dd.mm.yyyy` date field; `None` if absent, empty, or malformed.
    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        let raw = self.value(field)?.trim();
        NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
    }

    /// Service timestamp built from `Datum` and `Uhrzeit`.
    pub fn requested_at(&self) -> Option<NaiveDateTime> {
        let date = self.date(fields::DATE)?;
        let time = NaiveTime::parse_from_str(self.value(fields::TIME)?.trim(), TIME_FORMAT).ok()?;
        Some(date.and_time(time))
    }
}
