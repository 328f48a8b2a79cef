//! User facing messages for conversion outcomes

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;

use super::request::ConversionRequest;
use super::resolver::RateQuoteResult;

pub const IDLE_MESSAGE: &str = "Enter an amount and click 'Get Exchange Rate'";
pub const IN_FLIGHT_MESSAGE: &str = "Getting exchange rate...";
pub const INVALID_AMOUNT_MESSAGE: &str = "Please enter a valid amount greater than 0.";
pub const UNRESOLVED_MESSAGE: &str = "Unable to get exchange rate. Please try again.";
pub const TOO_LARGE_MESSAGE: &str = "Amount is too large to convert. Please enter a smaller amount.";

/// Plain text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMessage(String);

impl DisplayMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DisplayMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converted total rounded half-up to two decimal places, `None` if it overflows.
pub fn converted_total(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    amount
        .checked_mul(rate)
        .map(|total| total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

pub fn format(request: &ConversionRequest, result: &RateQuoteResult) -> DisplayMessage {
    match result {
        RateQuoteResult::Resolved { rate, .. } => {
            let Some(total) = converted_total(request.amount(), *rate) else {
                return DisplayMessage(TOO_LARGE_MESSAGE.to_string());
            };
            DisplayMessage(format!(
                "{} {} = {:.2} {}",
                request.amount().normalize(),
                request.source(),
                total,
                request.target()
            ))
        }
        RateQuoteResult::Unresolved { .. } => DisplayMessage(UNRESOLVED_MESSAGE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::ProviderKind;
    use crate::core::error::FailureReason;
    use std::str::FromStr;

    fn resolved(rate: &str) -> RateQuoteResult {
        RateQuoteResult::Resolved {
            rate: Decimal::from_str(rate).unwrap(),
            provider: ProviderKind::Primary,
        }
    }

    #[test]
    fn test_format_resolved() {
        let request = ConversionRequest::parse("USD", "INR", "10").unwrap();
        assert_eq!(
            format(&request, &resolved("1.5")).as_str(),
            "10 USD = 15.00 INR"
        );

        let request = ConversionRequest::parse("USD", "EUR", "100").unwrap();
        assert_eq!(
            format(&request, &resolved("0.9")).as_str(),
            "100 USD = 90.00 EUR"
        );
    }

    #[test]
    fn test_format_trims_amount() {
        let request = ConversionRequest::parse("EUR", "GBP", "10.50").unwrap();
        assert_eq!(
            format(&request, &resolved("0.85")).as_str(),
            "10.5 EUR = 8.93 GBP"
        );
    }

    #[test]
    fn test_total_rounds_half_up() {
        let amount = Decimal::from_str("1").unwrap();
        assert_eq!(
            converted_total(amount, Decimal::from_str("0.125").unwrap()),
            Some(Decimal::from_str("0.13").unwrap())
        );
        assert_eq!(
            converted_total(amount, Decimal::from_str("0.124").unwrap()),
            Some(Decimal::from_str("0.12").unwrap())
        );
    }

    #[test]
    fn test_format_overflowing_total() {
        let request =
            ConversionRequest::parse("USD", "INR", "1000000000000000000000000000").unwrap();
        assert_eq!(
            format(&request, &resolved("83.12")).as_str(),
            TOO_LARGE_MESSAGE
        );
        assert!(converted_total(Decimal::MAX, Decimal::TWO).is_none());
    }

    #[test]
    fn test_format_unresolved_hides_reason() {
        let request = ConversionRequest::parse("USD", "EUR", "1").unwrap();
        for reason in [
            FailureReason::NetworkError,
            FailureReason::HttpError(500),
            FailureReason::CurrencyUnavailable,
        ] {
            let message = format(&request, &RateQuoteResult::Unresolved { reason });
            assert_eq!(message.as_str(), UNRESOLVED_MESSAGE);
        }
    }
}
