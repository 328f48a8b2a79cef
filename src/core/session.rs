//! Conversion session: the current source/target/amount selection and the
//! plumbing that writes conversion outcomes to a display surface.
//!
//! Every conversion started by the session takes a ticket with a
//! monotonically increasing token. A result is only written to the surface if
//! no newer conversion has been started in the meantime. Token checks and
//! writes to the surface happen under one lock, so a slow response can never
//! overwrite anything shown for a later request.

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

use super::currency::CurrencyCode;
use super::format::{
    self, DisplayMessage, IDLE_MESSAGE, IN_FLIGHT_MESSAGE, INVALID_AMOUNT_MESSAGE,
};
use super::request::{ConversionRequest, parse_amount};
use super::resolver::{RateQuoteResult, RateResolver};

/// Where the session writes messages.
pub trait DisplaySurface: Send + Sync {
    fn show(&self, message: &DisplayMessage);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    pub amount: String,
}

/// A conversion that passed the input guard and is waiting to be resolved.
#[derive(Debug, Clone)]
pub struct Ticket {
    token: u64,
    request: ConversionRequest,
}

impl Ticket {
    pub fn request(&self) -> &ConversionRequest {
        &self.request
    }
}

#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub result: RateQuoteResult,
    pub message: DisplayMessage,
    /// False when a newer conversion was started before this one finished.
    pub displayed: bool,
}

pub struct ConversionSession {
    resolver: Arc<RateResolver>,
    surface: Arc<dyn DisplaySurface>,
    selection: Mutex<Selection>,
    /// Token of the newest ticket. Held while writing to the surface.
    latest_token: Mutex<u64>,
}

impl ConversionSession {
    pub fn new(
        resolver: Arc<RateResolver>,
        surface: Arc<dyn DisplaySurface>,
        source: CurrencyCode,
        target: CurrencyCode,
    ) -> Self {
        Self {
            resolver,
            surface,
            selection: Mutex::new(Selection {
                source,
                target,
                amount: String::new(),
            }),
            latest_token: Mutex::new(0),
        }
    }

    /// Writes the prompt shown before anything has been converted.
    pub fn show_idle(&self) {
        self.surface.show(&DisplayMessage::new(IDLE_MESSAGE));
    }

    pub fn selection(&self) -> Selection {
        self.lock_selection().clone()
    }

    pub fn set_amount(&self, amount: &str) {
        self.lock_selection().amount = amount.to_string();
    }

    /// Changes the source currency, converting if an amount is already entered.
    pub fn set_source(&self, code: CurrencyCode) -> Option<Ticket> {
        self.lock_selection().source = code;
        self.convert_if_amount_entered()
    }

    /// Changes the target currency, converting if an amount is already entered.
    pub fn set_target(&self, code: CurrencyCode) -> Option<Ticket> {
        self.lock_selection().target = code;
        self.convert_if_amount_entered()
    }

    pub fn swap(&self) -> Option<Ticket> {
        {
            let mut selection = self.lock_selection();
            let Selection { source, target, .. } = &mut *selection;
            std::mem::swap(source, target);
        }
        self.convert_if_amount_entered()
    }

    /// Starts a conversion for the current selection. An invalid amount is
    /// reported on the surface and no ticket is issued.
    pub fn submit(&self) -> Option<Ticket> {
        let selection = self.selection();
        match ConversionRequest::parse(
            selection.source.as_str(),
            selection.target.as_str(),
            &selection.amount,
        ) {
            Ok(request) => Some(self.issue(request)),
            Err(e) => {
                debug!(error = %e, "Rejected conversion input");
                self.surface
                    .show(&DisplayMessage::new(INVALID_AMOUNT_MESSAGE));
                None
            }
        }
    }

    /// Resolves a ticket and writes the outcome unless it has been superseded.
    pub async fn complete(&self, ticket: Ticket) -> ConversionOutcome {
        let result = self.resolver.resolve(&ticket.request).await;
        let message = format::format(&ticket.request, &result);

        if let RateQuoteResult::Unresolved { reason } = &result {
            warn!(
                from = %ticket.request.source(),
                to = %ticket.request.target(),
                %reason,
                "Exchange rate could not be resolved"
            );
        }

        let displayed = {
            let latest = lock(&self.latest_token);
            let current = *latest == ticket.token;
            if current {
                self.surface.show(&message);
            }
            current
        };
        if !displayed {
            debug!(token = ticket.token, "Discarding result of superseded conversion");
        }

        ConversionOutcome {
            result,
            message,
            displayed,
        }
    }

    fn convert_if_amount_entered(&self) -> Option<Ticket> {
        let selection = self.selection();
        parse_amount(&selection.amount).ok()?;
        self.submit()
    }

    fn issue(&self, request: ConversionRequest) -> Ticket {
        let mut latest = lock(&self.latest_token);
        *latest += 1;
        let token = *latest;
        debug!(
            token,
            "Fetching exchange rate for {} {} to {}",
            request.amount(),
            request.source(),
            request.target()
        );
        self.surface.show(&DisplayMessage::new(IN_FLIGHT_MESSAGE));
        Ticket { token, request }
    }

    fn lock_selection(&self) -> MutexGuard<'_, Selection> {
        lock(&self.selection)
    }
}

// Guarded values are plain data, a poisoned lock still holds a usable value.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
