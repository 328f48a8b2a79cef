//! Validated conversion requests

use rust_decimal::Decimal;
use std::str::FromStr;

use super::currency::CurrencyCode;
use super::error::ValidationError;

/// A source/target pair with a positive amount. Only built through the input guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    source: CurrencyCode,
    target: CurrencyCode,
    amount: Decimal,
}

impl ConversionRequest {
    pub fn new(
        source: CurrencyCode,
        target: CurrencyCode,
        amount: Decimal,
    ) -> Result<Self, ValidationError> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NotPositive(amount.normalize().to_string()));
        }
        Ok(Self {
            source,
            target,
            amount,
        })
    }

    /// Builds a request from raw user input, rejecting blank, non-numeric,
    /// zero and negative amounts as well as malformed currency codes.
    pub fn parse(source: &str, target: &str, amount: &str) -> Result<Self, ValidationError> {
        let amount = parse_amount(amount)?;
        Self::new(source.parse()?, target.parse()?, amount)
    }

    pub fn source(&self) -> &CurrencyCode {
        &self.source
    }

    pub fn target(&self) -> &CurrencyCode {
        &self.target
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingAmount);
    }
    let amount = Decimal::from_str(trimmed)
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NotPositive(trimmed.to_string()));
    }
    Ok(amount)
}
