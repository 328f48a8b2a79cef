use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::instrument;

use super::util::fetch_rate;
use crate::core::{CurrencyCode, ProviderError, RateProvider};

/// Primary provider: `GET <base_url>/<FROM>` returning the full rate table for `FROM`.
pub struct ExchangeRateApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    fn name(&self) -> &str {
        "exchangerate-api"
    }

    #[instrument(name = "PrimaryRateFetch", skip_all, fields(from = %from, to = %to))]
    async fn fetch_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Decimal, ProviderError> {
        let url = format!("{}/{}", self.base_url, from);
        fetch_rate(&self.client, &url, to).await
    }
}
