//! Error types shared by the conversion core and the providers

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyCodeError {
    #[error("Invalid currency code: {0:?} (expected three letters)")]
    Invalid(String),
}

/// Rejections raised by the input guard before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Amount is missing")]
    MissingAmount,
    #[error("Amount is not a number: {0:?}")]
    NotANumber(String),
    #[error("Amount must be greater than 0, got {0}")]
    NotPositive(String),
    #[error(transparent)]
    Currency(#[from] CurrencyCodeError),
}

/// Failure of a single provider call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("Request error: {0}")]
    Network(String),
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },
    #[error("No rate for {currency} in response")]
    CurrencyUnavailable { currency: String },
}

impl ProviderError {
    pub fn reason(&self) -> FailureReason {
        match self {
            ProviderError::Network(_) => FailureReason::NetworkError,
            ProviderError::Http { status } => FailureReason::HttpError(*status),
            ProviderError::CurrencyUnavailable { .. } => FailureReason::CurrencyUnavailable,
        }
    }
}

/// Why a rate could not be resolved. Kept for diagnostics, never shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
    NetworkError,
    HttpError(u16),
    CurrencyUnavailable,
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::NetworkError => write!(f, "NetworkError"),
            FailureReason::HttpError(status) => write!(f, "HttpError({status})"),
            FailureReason::CurrencyUnavailable => write!(f, "CurrencyUnavailable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_reason() {
        assert_eq!(
            ProviderError::Network("connection refused".into()).reason(),
            FailureReason::NetworkError
        );
        assert_eq!(
            ProviderError::Http { status: 503 }.reason(),
            FailureReason::HttpError(503)
        );
        assert_eq!(
            ProviderError::CurrencyUnavailable {
                currency: "XYZ".into()
            }
            .reason(),
            FailureReason::CurrencyUnavailable
        );
    }

    #[test]
    fn test_failure_reason_display() {
        assert_eq!(FailureReason::HttpError(500).to_string(), "HttpError(500)");
        assert_eq!(FailureReason::NetworkError.to_string(), "NetworkError");
    }
}
