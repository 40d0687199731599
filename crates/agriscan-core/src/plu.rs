//! PLU (Price Look-Up) codes.
//!
//! PLU codes are 4- or 5-digit identifiers printed on produce stickers.
//! By industry convention a 5-digit code with a leading `9` marks organically
//! grown produce; every other code (4-digit, or 5-digit with another prefix)
//! is conventional.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PluNotFound, ValidationError};

/// A PLU code whose shape has been checked: 4 or 5 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluCode(String);

impl PluCode {
    /// Parse a code without sanitising it. Anything other than 4–5 digits
    /// is rejected; callers strip whitespace or punctuation beforehand
    /// (see [`digits_only`]).
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        let well_formed =
            matches!(code.len(), 4 | 5) && code.bytes().all(|b| b.is_ascii_digit());
        if well_formed {
            Ok(Self(code.to_string()))
        } else {
            Err(ValidationError::MalformedPlu(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Organic by shape: exactly 5 digits starting with `9`.
    pub fn is_organic(&self) -> bool {
        self.0.len() == 5 && self.0.starts_with('9')
    }
}

impl fmt::Display for PluCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PluCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PluCode> for String {
    fn from(code: PluCode) -> Self {
        code.0
    }
}

/// Result of resolving a code against a PLU table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluLookupResult {
    pub code: PluCode,
    pub is_organic: bool,
    pub meaning: String,
}

/// Resolves PLU codes to their meaning.
///
/// Implemented by the static table in `agriscan-verdict`, and by any
/// `Fn(&PluCode) -> Result<PluLookupResult, PluNotFound>` so tests and
/// callers can pass a closure.
pub trait PluLookup {
    fn lookup(&self, code: &PluCode) -> Result<PluLookupResult, PluNotFound>;
}

impl<F> PluLookup for F
where
    F: Fn(&PluCode) -> Result<PluLookupResult, PluNotFound>,
{
    fn lookup(&self, code: &PluCode) -> Result<PluLookupResult, PluNotFound> {
        self(code)
    }
}

/// Sanitise free-text PLU entry: keep ASCII digits only, at most five.
///
/// Mirrors the manual entry field, which discards anything a user types
/// that is not a digit.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).take(5).collect()
}
