//! Currency code types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::CurrencyCodeError;

/// Currencies quoted by the reference rates provider, used when the set of
/// known currencies is not fetched from the provider itself.
pub const FALLBACK_CURRENCIES: [&str; 33] = [
    "EUR", "AUD", "BGN", "BRL", "CAD", "CHF", "CNY", "CZK", "DKK", "GBP", "HKD", "HRK", "HUF",
    "IDR", "ILS", "INR", "ISK", "JPY", "KRW", "MXN", "MYR", "NOK", "NZD", "PHP", "PLN", "RON",
    "RUB", "SEK", "SGD", "THB", "TRY", "USD", "ZAR",
];

/// ISO 4217 style currency code: exactly three uppercase ASCII letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    /// Parse a currency code. Lowercase input is rejected rather than folded,
    /// the provider only answers to the uppercase form.
    pub fn parse(code: &str) -> Result<Self, CurrencyCodeError> {
        let bytes = code.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(CurrencyCodeError(code.to_string()));
        }
        Ok(Self([bytes[0], bytes[1], bytes[2]]))
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    pub fn eur() -> Self {
        Self(*b"EUR")
    }

    pub fn gbp() -> Self {
        Self(*b"GBP")
    }

    pub fn usd() -> Self {
        Self(*b"USD")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for CurrencyCode {
    type Error = CurrencyCodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Serialize for CurrencyCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CurrencyCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Self::parse(&code).map_err(serde::de::Error::custom)
    }
}

/// The set of currencies a provider is known to quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencySet(BTreeSet<CurrencyCode>);

impl CurrencySet {
    /// Build a set from already parsed codes.
    pub fn new(codes: impl IntoIterator<Item = CurrencyCode>) -> Self {
        Self(codes.into_iter().collect())
    }

    /// The static fallback set.
    pub fn fallback() -> Self {
        Self::new(
            FALLBACK_CURRENCIES
                .iter()
                .filter_map(|code| CurrencyCode::parse(code).ok()),
        )
    }

    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.0.contains(code)
    }

    /// Parse `code` and check that it is a member of the set.
    pub fn lookup(&self, code: &str) -> Result<CurrencyCode, CurrencyCodeError> {
        let parsed = CurrencyCode::parse(code)?;
        if self.contains(&parsed) {
            Ok(parsed)
        } else {
            Err(CurrencyCodeError(code.to_string()))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.0.iter()
    }
}

impl Default for CurrencySet {
    fn default() -> Self {
        Self::fallback()
    }
}

impl FromIterator<CurrencyCode> for CurrencySet {
    fn from_iter<T: IntoIterator<Item = CurrencyCode>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_code() {
        let code = CurrencyCode::parse("GBP").unwrap();
        assert_eq!(code.as_str(), "GBP");
        assert_eq!(code, CurrencyCode::gbp());
        assert_eq!(code.to_string(), "GBP");
    }

    #[test]
    fn test_parse_rejects_malformed_codes() {
        for bad in ["", "GB", "GBPX", "gbp", "G8P", "INVALID"] {
            let err = CurrencyCode::parse(bad).unwrap_err();
            assert_eq!(err.0, bad);
        }
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&CurrencyCode::usd()).unwrap();
        assert_eq!(json, "\"USD\"");

        let back: CurrencyCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CurrencyCode::usd());

        assert!(serde_json::from_str::<CurrencyCode>("\"usd\"").is_err());
    }

    #[test]
    fn test_fallback_set() {
        let set = CurrencySet::fallback();
        assert_eq!(set.len(), FALLBACK_CURRENCIES.len());
        assert!(set.contains(&CurrencyCode::eur()));
        assert!(set.contains(&CurrencyCode::gbp()));
        assert!(!set.contains(&CurrencyCode::parse("XYZ").unwrap()));
    }

    #[test]
    fn test_lookup() {
        let set = CurrencySet::fallback();
        assert_eq!(set.lookup("USD").unwrap(), CurrencyCode::usd());
        assert_eq!(set.lookup("XYZ").unwrap_err().0, "XYZ");
        assert_eq!(set.lookup("INVALID").unwrap_err().0, "INVALID");
    }
}
