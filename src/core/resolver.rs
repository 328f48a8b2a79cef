//! Rate resolution with a single fallback hop.
//!
//! Resolution is a small state machine:
//!
//! ```text
//! TryingPrimary --ok--> Resolved(Primary)
//!       |
//!     failed / missing rate
//!       v
//! TryingFallback --ok--> Resolved(Fallback)
//!       |
//!     failed / missing rate
//!       v
//! Unresolved(reason of the fallback failure)
//! ```
//!
//! Primary failures never leave the machine; they only select the fallback
//! transition. Each provider is called at most once and never concurrently.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::currency::{ProviderKind, RateProvider};
use super::error::{FailureReason, ProviderError};
use super::request::ConversionRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateQuoteResult {
    Resolved {
        rate: Decimal,
        provider: ProviderKind,
    },
    Unresolved {
        reason: FailureReason,
    },
}

impl RateQuoteResult {
    pub fn rate(&self) -> Option<Decimal> {
        match self {
            RateQuoteResult::Resolved { rate, .. } => Some(*rate),
            RateQuoteResult::Unresolved { .. } => None,
        }
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            RateQuoteResult::Resolved { .. } => None,
            RateQuoteResult::Unresolved { reason } => Some(*reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolveState {
    TryingPrimary,
    TryingFallback,
    Resolved {
        rate: Decimal,
        provider: ProviderKind,
    },
    Unresolved(FailureReason),
}

impl ResolveState {
    fn after_primary(outcome: Result<Decimal, ProviderError>) -> Self {
        match outcome {
            Ok(rate) => ResolveState::Resolved {
                rate,
                provider: ProviderKind::Primary,
            },
            Err(_) => ResolveState::TryingFallback,
        }
    }

    fn after_fallback(outcome: Result<Decimal, ProviderError>) -> Self {
        match outcome {
            Ok(rate) => ResolveState::Resolved {
                rate,
                provider: ProviderKind::Fallback,
            },
            Err(e) => ResolveState::Unresolved(e.reason()),
        }
    }
}

pub struct RateResolver {
    primary: Arc<dyn RateProvider>,
    fallback: Arc<dyn RateProvider>,
}

impl RateResolver {
    pub fn new(primary: Arc<dyn RateProvider>, fallback: Arc<dyn RateProvider>) -> Self {
        Self { primary, fallback }
    }

    #[instrument(
        name = "ResolveRate",
        skip(self, request),
        fields(from = %request.source(), to = %request.target())
    )]
    pub async fn resolve(&self, request: &ConversionRequest) -> RateQuoteResult {
        let (from, to) = (request.source(), request.target());
        let mut state = ResolveState::TryingPrimary;

        loop {
            state = match state {
                ResolveState::TryingPrimary => {
                    debug!(provider = self.primary.name(), "Trying primary provider");
                    let outcome = self.primary.fetch_rate(from, to).await;
                    if let Err(e) = &outcome {
                        warn!(
                            provider = self.primary.name(),
                            reason = %e.reason(),
                            error = %e,
                            "Primary provider failed, trying fallback"
                        );
                    }
                    ResolveState::after_primary(outcome)
                }
                ResolveState::TryingFallback => {
                    debug!(provider = self.fallback.name(), "Trying fallback provider");
                    let outcome = self.fallback.fetch_rate(from, to).await;
                    if let Err(e) = &outcome {
                        warn!(
                            provider = self.fallback.name(),
                            reason = %e.reason(),
                            error = %e,
                            "Fallback provider also failed"
                        );
                    }
                    ResolveState::after_fallback(outcome)
                }
                ResolveState::Resolved { rate, provider } => {
                    debug!(%rate, %provider, "Resolved exchange rate");
                    return RateQuoteResult::Resolved { rate, provider };
                }
                ResolveState::Unresolved(reason) => {
                    return RateQuoteResult::Unresolved { reason };
                }
            };
        }
    }
}
