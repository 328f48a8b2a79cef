//! Currency codes and rate provider abstractions

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use super::error::{CurrencyCodeError, ProviderError};

/// Three letter ISO-4217 style currency code, always uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// For compile-time known codes only, no validation is done.
    pub(crate) fn from_static(code: &'static str) -> Self {
        CurrencyCode(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Country code used by the catalog for this currency, if known.
    pub fn country(&self) -> Option<&'static str> {
        country_for(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CurrencyCodeError::Invalid(s.to_string()));
        }
        Ok(CurrencyCode(code.to_ascii_uppercase()))
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CurrencyCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which of the two providers produced a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    Primary,
    Fallback,
}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ProviderKind::Primary => "primary",
                ProviderKind::Fallback => "fallback",
            }
        )
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetches the rate to convert one unit of `from` into `to`.
    ///
    /// Implementations make exactly one request and never retry.
    async fn fetch_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Decimal, ProviderError>;
}

/// Static currency code to country code table backing the `currencies` listing.
pub const CURRENCY_COUNTRIES: &[(&str, &str)] = &[
    ("AED", "AE"),
    ("ARS", "AR"),
    ("AUD", "AU"),
    ("BDT", "BD"),
    ("BGN", "BG"),
    ("BRL", "BR"),
    ("CAD", "CA"),
    ("CHF", "CH"),
    ("CLP", "CL"),
    ("CNY", "CN"),
    ("COP", "CO"),
    ("CZK", "CZ"),
    ("DKK", "DK"),
    ("EGP", "EG"),
    ("EUR", "FR"),
    ("GBP", "GB"),
    ("HKD", "HK"),
    ("HUF", "HU"),
    ("IDR", "ID"),
    ("ILS", "IL"),
    ("INR", "IN"),
    ("JPY", "JP"),
    ("KES", "KE"),
    ("KRW", "KR"),
    ("LKR", "LK"),
    ("MXN", "MX"),
    ("MYR", "MY"),
    ("NGN", "NG"),
    ("NOK", "NO"),
    ("NPR", "NP"),
    ("NZD", "NZ"),
    ("PHP", "PH"),
    ("PKR", "PK"),
    ("PLN", "PL"),
    ("RON", "RO"),
    ("SAR", "SA"),
    ("SEK", "SE"),
    ("SGD", "SG"),
    ("THB", "TH"),
    ("TRY", "TR"),
    ("TWD", "TW"),
    ("UAH", "UA"),
    ("USD", "US"),
    ("VND", "VN"),
    ("ZAR", "ZA"),
];

pub fn country_for(code: &str) -> Option<&'static str> {
    CURRENCY_COUNTRIES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, country)| *country)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalises_case() {
        let code: CurrencyCode = "usd".parse().unwrap();
        assert_eq!(code.as_str(), "USD");
        assert_eq!(code.to_string(), "USD");

        let padded: CurrencyCode = " inr ".parse().unwrap();
        assert_eq!(padded.as_str(), "INR");
    }

    #[test]
    fn test_parse_rejects_bad_codes() {
        for input in ["", "US", "USDT", "U$D", "12A"] {
            assert!(
                input.parse::<CurrencyCode>().is_err(),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_codes_outside_catalog_are_allowed() {
        let code: CurrencyCode = "XYZ".parse().unwrap();
        assert!(code.country().is_none());
        assert_eq!("inr".parse::<CurrencyCode>().unwrap().country(), Some("IN"));
    }

    #[test]
    fn test_catalog_codes_are_valid_and_sorted() {
        for window in CURRENCY_COUNTRIES.windows(2) {
            assert!(window[0].0 < window[1].0);
        }
        for (code, _) in CURRENCY_COUNTRIES {
            assert!(code.parse::<CurrencyCode>().is_ok());
        }
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let code: CurrencyCode = serde_yaml::from_str("\"eur\"").unwrap();
        assert_eq!(code.as_str(), "EUR");
        assert!(serde_yaml::from_str::<CurrencyCode>("\"euro\"").is_err());
    }
}
