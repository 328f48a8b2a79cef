//! Core conversion logic: requests, rate resolution and formatting

pub mod config;
pub mod currency;
pub mod error;
pub mod format;
pub mod log;
pub mod request;
pub mod resolver;
pub mod session;

// Re-export main types for cleaner imports
pub use currency::{CurrencyCode, ProviderKind, RateProvider};
pub use error::{FailureReason, ProviderError, ValidationError};
pub use format::{DisplayMessage, format};
pub use request::ConversionRequest;
pub use resolver::{RateQuoteResult, RateResolver};
pub use session::{ConversionSession, DisplaySurface};
