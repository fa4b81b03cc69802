//! Stock-keeping unit identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A stock-keeping unit identifier, stored as an 8-character zero-padded
/// numeric string.
///
/// The product catalog stores SKUs zero-padded to 8 digits, so every SKU
/// entering the system is normalized the same way before lookup or storage.
/// Input longer than 8 characters is preserved as-is rather than truncated;
/// callers can detect it via [`Sku::is_conforming`] and warn the operator.
///
/// ## Examples
///
/// ```
/// use storewatch_core::Sku;
///
/// assert_eq!(Sku::normalize("123").as_str(), "00000123");
/// assert_eq!(Sku::normalize("12345678").as_str(), "12345678");
///
/// // Over-long input is kept, not cut - it signals a non-conforming code.
/// let long = Sku::normalize("123456789");
/// assert_eq!(long.as_str(), "123456789");
/// assert!(!long.is_conforming());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Canonical SKU length after zero-padding.
    pub const LENGTH: usize = 8;

    /// Normalize a raw SKU string by left-padding with `'0'` to 8 characters.
    ///
    /// Never truncates: input longer than 8 characters comes through
    /// unchanged and reports `false` from [`Sku::is_conforming`].
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.len() >= Self::LENGTH {
            return Self(trimmed.to_owned());
        }
        let mut padded = String::with_capacity(Self::LENGTH);
        for _ in 0..(Self::LENGTH - trimmed.len()) {
            padded.push('0');
        }
        padded.push_str(trimmed);
        Self(padded)
    }

    /// Whether this SKU has the canonical 8-character form.
    #[must_use]
    pub fn is_conforming(&self) -> bool {
        self.0.len() == Self::LENGTH
    }

    /// Returns the SKU as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Sku` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Sku {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pads_short_input() {
        assert_eq!(Sku::normalize("123").as_str(), "00000123");
        assert_eq!(Sku::normalize("1").as_str(), "00000001");
    }

    #[test]
    fn test_normalize_keeps_exact_length() {
        assert_eq!(Sku::normalize("12345678").as_str(), "12345678");
    }

    #[test]
    fn test_normalize_never_truncates() {
        let sku = Sku::normalize("1234567890");
        assert_eq!(sku.as_str(), "1234567890");
        assert!(sku.as_str().len() >= Sku::LENGTH);
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(Sku::normalize(" 123 ").as_str(), "00000123");
    }

    #[test]
    fn test_is_conforming() {
        assert!(Sku::normalize("123").is_conforming());
        assert!(Sku::normalize("12345678").is_conforming());
        assert!(!Sku::normalize("123456789").is_conforming());
    }

    #[test]
    fn test_length_always_at_least_eight() {
        for raw in ["", "7", "424242", "12345678", "123456789"] {
            assert!(Sku::normalize(raw).as_str().len() >= Sku::LENGTH);
        }
    }
}
