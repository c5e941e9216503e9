//! Contact number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ContactNumber`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum ContactNumberError {
    /// The input string is empty.
    #[error("contact number cannot be empty")]
    Empty,
    /// The input is not exactly ten digits long.
    #[error("contact number must be exactly {expected} digits")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
    },
    /// The input contains a non-digit character.
    #[error("contact number must contain only digits")]
    NonDigit,
}

/// A ten-digit contact number.
///
/// The food service keys accounts by contact number, so this is the
/// closest thing the system has to a primary account identifier.
///
/// ## Constraints
///
/// - Exactly 10 characters
/// - ASCII digits only (no separators, no country code)
///
/// ## Examples
///
/// ```
/// use hunger_box_core::ContactNumber;
///
/// assert!(ContactNumber::parse("9876543210").is_ok());
///
/// assert!(ContactNumber::parse("").is_err());            // empty
/// assert!(ContactNumber::parse("12345").is_err());       // too short
/// assert!(ContactNumber::parse("98765_3210").is_err());  // non-digit
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ContactNumber(String);

impl ContactNumber {
    /// Required number of digits.
    pub const DIGITS: usize = 10;

    /// Parse a `ContactNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is not exactly ten characters long
    /// - Contains anything other than ASCII digits
    pub fn parse(s: &str) -> Result<Self, ContactNumberError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(ContactNumberError::Empty);
        }

        if s.len() != Self::DIGITS {
            return Err(ContactNumberError::WrongLength {
                expected: Self::DIGITS,
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ContactNumberError::NonDigit);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the contact number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ContactNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ContactNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ContactNumber {
    type Err = ContactNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ContactNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(ContactNumber::parse("9876543210").is_ok());
        assert!(ContactNumber::parse("0000000000").is_ok());
        // surrounding whitespace is tolerated, form input is messy
        assert_eq!(
            ContactNumber::parse(" 9876543210 ").unwrap().as_str(),
            "9876543210"
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(
            ContactNumber::parse(""),
            Err(ContactNumberError::Empty)
        ));
        assert!(matches!(
            ContactNumber::parse("   "),
            Err(ContactNumberError::Empty)
        ));
    }

    #[test]
    fn test_parse_wrong_length() {
        assert!(matches!(
            ContactNumber::parse("12345"),
            Err(ContactNumberError::WrongLength { expected: 10 })
        ));
        assert!(matches!(
            ContactNumber::parse("98765432100"),
            Err(ContactNumberError::WrongLength { expected: 10 })
        ));
    }

    #[test]
    fn test_parse_non_digit() {
        assert!(matches!(
            ContactNumber::parse("98765x3210"),
            Err(ContactNumberError::NonDigit)
        ));
        assert!(matches!(
            ContactNumber::parse("98765 3210"),
            Err(ContactNumberError::NonDigit)
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let number = ContactNumber::parse("9876543210").unwrap();
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "\"9876543210\"");

        let parsed: ContactNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, number);
    }

    #[test]
    fn test_from_str() {
        let number: ContactNumber = "9876543210".parse().unwrap();
        assert_eq!(number.as_str(), "9876543210");
    }
}
