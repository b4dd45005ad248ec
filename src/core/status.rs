use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of comparing one address field of a qualified confirmation
/// request with the foreign registry.
///
/// eVatR reports these as single letters in `Erg_Name`, `Erg_Ort`,
/// `Erg_PLZ` and `Erg_Str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    /// `A`: the submitted value matches.
    Matched,
    /// `B`: the submitted value does not match.
    NotMatched,
    /// `C`: the field was not requested.
    NotQueried,
    /// `D`: the member state did not provide the field.
    Unknown,
    /// Missing or unrecognized code.
    Invalid,
}

impl MatchStatus {
    /// Translate an eVatR result letter. Never fails: anything other than
    /// `A`–`D` (including an empty string) is [`MatchStatus::Invalid`].
    pub fn from_code(code: &str) -> Self {
        match code {
            "A" => Self::Matched,
            "B" => Self::NotMatched,
            "C" => Self::NotQueried,
            "D" => Self::Unknown,
            _ => Self::Invalid,
        }
    }

    /// Letter code. `Invalid` has no service code and reports `E`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Matched => "A",
            Self::NotMatched => "B",
            Self::NotQueried => "C",
            Self::Unknown => "D",
            Self::Invalid => "E",
        }
    }

    pub fn is_matched(&self) -> bool {
        *self == Self::Matched
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Matched => "Matched",
            Self::NotMatched => "No match",
            Self::NotQueried => "Not queried",
            Self::Unknown => "Not in database",
            Self::Invalid => "Invalid",
        };
        write!(f, "{}: {label}", self.code())
    }
}
