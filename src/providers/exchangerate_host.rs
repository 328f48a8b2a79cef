use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::instrument;

use super::util::fetch_rate;
use crate::core::{CurrencyCode, ProviderError, RateProvider};

/// Fallback provider: `GET <base_url>?base=<FROM>&symbols=<TO>`.
pub struct ExchangeRateHostProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateHostProvider {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        ExchangeRateHostProvider {
            base_url: base_url.to_string(),
            client,
        }
    }
}

#[async_trait]
impl RateProvider for ExchangeRateHostProvider {
    fn name(&self) -> &str {
        "exchangerate-host"
    }

    #[instrument(name = "FallbackRateFetch", skip_all, fields(from = %from, to = %to))]
    async fn fetch_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Decimal, ProviderError> {
        let url = format!("{}?base={}&symbols={}", self.base_url, from, to);
        fetch_rate(&self.client, &url, to).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::util::build_client;
    use std::str::FromStr;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    async fn create_mock_server(from: &str, to: &str, template: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("base", from))
            .and(query_param("symbols", to))
            .respond_with(template)
            .expect(1)
            .mount(&mock_server)
            .await;
        mock_server
    }

    fn provider(mock_server: &MockServer) -> ExchangeRateHostProvider {
        let base_url = format!("{}/latest", mock_server.uri());
        ExchangeRateHostProvider::new(&base_url, build_client(None).unwrap())
    }

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let mock_server = create_mock_server(
            "USD",
            "XYZ",
            ResponseTemplate::new(200)
                .set_body_string(r#"{"success": true, "base": "USD", "rates": {"XYZ": 2.0}}"#),
        )
        .await;

        let rate = provider(&mock_server)
            .fetch_rate(&code("USD"), &code("XYZ"))
            .await
            .expect("Failed to get rate");
        assert_eq!(rate, Decimal::from_str("2").unwrap());
    }

    #[tokio::test]
    async fn test_response_without_rates() {
        // exchangerate.host answers 200 with an error object when the key is missing
        let mock_server = create_mock_server(
            "USD",
            "EUR",
            ResponseTemplate::new(200).set_body_string(
                r#"{"success": false, "error": {"code": 101, "type": "missing_access_key"}}"#,
            ),
        )
        .await;

        let result = provider(&mock_server)
            .fetch_rate(&code("USD"), &code("EUR"))
            .await;
        assert_eq!(
            result,
            Err(ProviderError::CurrencyUnavailable {
                currency: "EUR".into()
            })
        );
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server =
            create_mock_server("EUR", "GBP", ResponseTemplate::new(503)).await;

        let result = provider(&mock_server)
            .fetch_rate(&code("EUR"), &code("GBP"))
            .await;
        assert_eq!(result, Err(ProviderError::Http { status: 503 }));
    }
}
