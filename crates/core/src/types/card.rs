//! Payment card number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CardNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CardNumberError {
    /// The input contains characters other than decimal digits.
    #[error("card number must be numeric")]
    NonNumeric,
    /// The input is not exactly 16 digits long.
    #[error("card number must be 16 digits long")]
    WrongLength,
    /// The Luhn checksum does not hold.
    #[error("card number is invalid")]
    ChecksumFailed,
}

/// A validated 16-digit payment card number.
///
/// Validation happens once at parse time; a constructed `CardNumber` is
/// guaranteed to be 16 decimal digits that satisfy the Luhn checksum.
/// The number is stored as presented - no masking or tokenization.
///
/// ## Examples
///
/// ```
/// use orchard_core::{CardNumber, CardNumberError};
///
/// assert!(CardNumber::parse("4539148803436467").is_ok());
/// assert_eq!(
///     CardNumber::parse("4539148803436468"),
///     Err(CardNumberError::ChecksumFailed)
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CardNumber(String);

impl CardNumber {
    /// Exact number of digits a card number must have.
    pub const LENGTH: usize = 16;

    /// Parse a `CardNumber` from a string.
    ///
    /// Checks run in order: all characters are decimal digits, the length
    /// is exactly 16, and the Luhn checksum holds.
    ///
    /// # Errors
    ///
    /// Returns `CardNumberError::NonNumeric`, `WrongLength`, or
    /// `ChecksumFailed` for the first check that fails.
    pub fn parse(s: &str) -> Result<Self, CardNumberError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CardNumberError::NonNumeric);
        }

        if s.len() != Self::LENGTH {
            return Err(CardNumberError::WrongLength);
        }

        if !luhn_checksum_holds(s) {
            return Err(CardNumberError::ChecksumFailed);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the card number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `CardNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CardNumber {
    type Err = CardNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CardNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Luhn checksum: starting from the rightmost digit, double every second
/// digit going leftward; a doubled digit above 9 has 9 subtracted. The
/// number is valid iff the sum of all digits is a multiple of 10.
fn luhn_checksum_holds(digits: &str) -> bool {
    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_valid_number() {
        assert!(CardNumber::parse("4539148803436467").is_ok());
    }

    #[test]
    fn test_parse_checksum_failure() {
        assert_eq!(
            CardNumber::parse("4539148803436468"),
            Err(CardNumberError::ChecksumFailed)
        );
    }

    #[test]
    fn test_parse_wrong_length() {
        assert_eq!(CardNumber::parse("123"), Err(CardNumberError::WrongLength));
        assert_eq!(
            CardNumber::parse("45391488034364670"),
            Err(CardNumberError::WrongLength)
        );
    }

    #[test]
    fn test_parse_non_numeric() {
        assert_eq!(
            CardNumber::parse("abcd123456789012"),
            Err(CardNumberError::NonNumeric)
        );
        assert_eq!(
            CardNumber::parse("4539 1488 0343 64"),
            Err(CardNumberError::NonNumeric)
        );
        assert_eq!(CardNumber::parse(""), Err(CardNumberError::NonNumeric));
    }

    #[test]
    fn test_luhn_agrees_with_manual_computation() {
        // 79927398713 is the classic Luhn example; pad to 16 digits with
        // a prefix that keeps the checksum intact (leading zeros).
        assert!(luhn_checksum_holds("0000079927398713"));
        assert!(!luhn_checksum_holds("0000079927398714"));
    }

    #[test]
    fn test_display_preserves_input() {
        let card = CardNumber::parse("4539148803436467").unwrap();
        assert_eq!(card.to_string(), "4539148803436467");
    }

    #[test]
    fn test_serde_roundtrip() {
        let card = CardNumber::parse("4539148803436467").unwrap();
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, "\"4539148803436467\"");

        let parsed: CardNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, card);
    }
}
