//! VIN normalization and format validation (no network call).

use std::fmt;

use crate::error::{DecoderError, VIN_FORMAT_RULE};

/// Number of characters in a VIN.
pub const VIN_LENGTH: usize = 17;

/// Placeholder the vPIC API accepts for unknown positions.
pub const WILDCARD: char = '*';

/// A trimmed, uppercased VIN that passed format validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vin(String);

impl Vin {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if any position holds the `*` placeholder.
    pub fn is_wildcard(&self) -> bool {
        self.0.contains(WILDCARD)
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Vin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Vin {
    type Err = DecoderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_and_normalize(s)
    }
}

fn is_vin_char(c: char) -> bool {
    c == WILDCARD || c.is_ascii_digit() || (c.is_ascii_uppercase() && !matches!(c, 'I' | 'O' | 'Q'))
}

/// Validate a raw VIN and return its normalized form.
///
/// Leading/trailing whitespace is trimmed and letters are uppercased. The
/// result must be exactly 17 characters from `0-9`, `A-Z` without `I`, `O`
/// and `Q`, or the `*` wildcard.
///
/// # Errors
///
/// Returns `DecoderError::InvalidVin` if the input is empty or does not match
/// the format rule.
pub fn validate_and_normalize(raw: &str) -> Result<Vin, DecoderError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DecoderError::InvalidVin {
            input: raw.to_string(),
            reason: "VIN cannot be empty".to_string(),
        });
    }

    // ASCII-only case mapping: U+FB00 must not become "FF".
    let normalized = trimmed.to_ascii_uppercase();
    if normalized.len() != VIN_LENGTH || !normalized.chars().all(is_vin_char) {
        return Err(DecoderError::InvalidVin {
            input: raw.to_string(),
            reason: format!("invalid VIN format: '{raw}'. {VIN_FORMAT_RULE}"),
        });
    }

    Ok(Vin(normalized))
}
