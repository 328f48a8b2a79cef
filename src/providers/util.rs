use crate::core::{CurrencyCode, ProviderError};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Shape shared by both rate services: `{"rates": {"EUR": 0.9, ...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct RatesResponse {
    #[serde(default)]
    rates: HashMap<String, serde_json::Value>,
}

impl RatesResponse {
    /// Looks up a usable rate. Non-numeric, zero and negative entries count as missing.
    pub(crate) fn rate_for(&self, currency: &CurrencyCode) -> Option<Decimal> {
        self.rates
            .get(currency.as_str())
            .and_then(serde_json::Value::as_f64)
            .and_then(Decimal::from_f64)
            .filter(|rate| *rate > Decimal::ZERO)
    }
}

/// Builds the HTTP client shared by a provider's requests.
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder =
        reqwest::Client::builder().user_agent(concat!("fxconv/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("Failed to build HTTP client")
}

/// Issues a single GET and extracts the rate for `target` from the response.
///
/// Connection failures map to [`ProviderError::Network`], non-2xx statuses to
/// [`ProviderError::Http`] without reading the body, and any received body that
/// does not carry a usable rate to [`ProviderError::CurrencyUnavailable`].
pub(crate) async fn fetch_rate(
    client: &reqwest::Client,
    url: &str,
    target: &CurrencyCode,
) -> Result<Decimal, ProviderError> {
    debug!("Requesting exchange rates from {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ProviderError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Http {
            status: status.as_u16(),
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| ProviderError::Network(e.to_string()))?;
    let unavailable = || ProviderError::CurrencyUnavailable {
        currency: target.to_string(),
    };

    let data: RatesResponse = match serde_json::from_str(&text) {
        Ok(data) => data,
        Err(e) => {
            warn!(error = ?e, response = %text, "Failed to parse rates response");
            return Err(unavailable());
        }
    };
    debug!(rates = data.rates.len(), "Received rates response");

    data.rate_for(target).ok_or_else(unavailable)
}
