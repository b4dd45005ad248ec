//! VAT ID format validation (no network call).

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::error::EvatrError;
use super::normalize::normalize;

/// Country prefix of the own VAT number in an eVatR request.
pub const DOMESTIC_COUNTRY: &str = "DE";

const DOMESTIC_BODY: &str = "[0-9]{9}";

/// Body patterns per country prefix for the VAT number being confirmed.
///
/// Patterns are matched against the whole body (everything after the
/// 2-letter prefix), never as a substring search.
const FOREIGN_PATTERNS: &[(&str, &str)] = &[
    ("AT", r"U[A-Z0-9]{8}"),
    ("BE", r"(0[0-9]{9}|[0-9]{10})"),
    ("BG", r"[0-9]{9,10}"),
    (
        "CH",
        r"(?:E(?:-| )[0-9]{3}(?:\.| )[0-9]{3}(?:\.| )[0-9]{3}( MWST)?|E[0-9]{9}(?:MWST)?)",
    ),
    ("CY", r"[0-9]{8}[A-Z]"),
    ("CZ", r"[0-9]{8,10}"),
    ("DK", r"[0-9]{8}"),
    ("EE", r"[0-9]{9}"),
    ("EL", r"[0-9]{9}"),
    ("ES", r"[A-Z][0-9]{7}[A-Z]|[0-9]{8}[A-Z]|[A-Z][0-9]{8}"),
    ("FI", r"[0-9]{8}"),
    ("FR", r"([A-Z]{2}|[0-9]{2})[0-9]{9}"),
    ("GB", r"[0-9]{9}|[0-9]{12}|(GD|HA)[0-9]{3}"),
    ("HR", r"[0-9]{11}"),
    ("HU", r"[0-9]{8}"),
    ("IE", r"[A-Z0-9]{7}[A-Z]|[A-Z0-9]{7}[A-W][A-I]"),
    ("IT", r"[0-9]{11}"),
    ("LT", r"([0-9]{9}|[0-9]{12})"),
    ("LU", r"[0-9]{8}"),
    ("LV", r"[0-9]{11}"),
    ("MT", r"[0-9]{8}"),
    ("NL", r"[0-9]{9}B[0-9]{2}"),
    ("PL", r"[0-9]{10}"),
    ("PT", r"[0-9]{9}"),
    ("RO", r"[0-9]{2,10}"),
    ("SE", r"[0-9]{12}"),
    ("SI", r"[0-9]{8}"),
    ("SK", r"[0-9]{10}"),
];

static DOMESTIC_REGEX: OnceLock<Regex> = OnceLock::new();
static FOREIGN_TABLE: OnceLock<HashMap<&'static str, Regex>> = OnceLock::new();

/// Compile `pattern` so that it must cover the entire input.
fn full_match(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{pattern})$")).expect("VAT body patterns are valid regexes")
}

fn domestic_regex() -> &'static Regex {
    DOMESTIC_REGEX.get_or_init(|| full_match(DOMESTIC_BODY))
}

fn foreign_table() -> &'static HashMap<&'static str, Regex> {
    FOREIGN_TABLE.get_or_init(|| {
        FOREIGN_PATTERNS
            .iter()
            .map(|&(code, pattern)| (code, full_match(pattern)))
            .collect()
    })
}

/// Split an uppercased VAT number into prefix and body.
///
/// Inputs shorter than 3 bytes, or whose prefix is not on a char
/// boundary, have no valid split.
fn split(n: &str) -> Option<(String, String)> {
    if n.len() < 3 {
        return None;
    }
    let upper = n.to_ascii_uppercase();
    let country = upper.get(..2)?.to_string();
    let body = upper.get(2..)?.to_string();
    Some((country, body))
}

/// Check a (normalized) German VAT number: `DE` followed by exactly 9 digits.
pub fn is_valid_domestic(n: &str) -> bool {
    match split(n) {
        Some((country, body)) => country == DOMESTIC_COUNTRY && domestic_regex().is_match(&body),
        None => false,
    }
}

/// Check a (normalized) foreign VAT number against the country pattern table.
///
/// Unknown prefixes fail. `DE` is not in the table: a German number is
/// never a valid confirmation target.
pub fn is_valid_foreign(n: &str) -> bool {
    match split(n) {
        Some((country, body)) => foreign_table()
            .get(country.as_str())
            .is_some_and(|re| re.is_match(&body)),
        None => false,
    }
}

/// Country codes accepted for the foreign VAT number, sorted.
pub fn supported_countries() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = FOREIGN_PATTERNS.iter().map(|&(code, _)| code).collect();
    codes.sort_unstable();
    codes
}

/// A normalized, format-checked VAT number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VatNumber(String);

impl VatNumber {
    /// Normalize and validate the own (German) VAT number.
    ///
    /// # Errors
    ///
    /// Returns [`EvatrError::InvalidDomesticVat`] if the number is not `DE`
    /// followed by 9 digits.
    pub fn domestic(raw: &str) -> Result<Self, EvatrError> {
        let n = normalize(raw);
        if is_valid_domestic(&n) {
            Ok(Self(n.to_ascii_uppercase()))
        } else {
            Err(EvatrError::InvalidDomesticVat(n))
        }
    }

    /// Normalize and validate the foreign VAT number to be confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`EvatrError::InvalidForeignVat`] for unknown countries or
    /// malformed bodies.
    pub fn foreign(raw: &str) -> Result<Self, EvatrError> {
        let n = normalize(raw);
        if is_valid_foreign(&n) {
            Ok(Self(n.to_ascii_uppercase()))
        } else {
            Err(EvatrError::InvalidForeignVat(n))
        }
    }

    /// The 2-letter country prefix.
    pub fn country(&self) -> &str {
        &self.0[..2]
    }

    /// Everything after the country prefix.
    pub fn body(&self) -> &str {
        &self.0[2..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for VatNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VatNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
