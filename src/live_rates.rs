//! Live exchange-rate client.
//!
//! Fetches `{base_url}/{FROM}` and reads `{"rates": {code: number}}` from the
//! body. Any failure (timeout, transport error, non-2xx status, malformed body
//! or a missing target currency) falls back to the static table, so a quote is
//! always available for supported pairs.

use crate::config::Settings;
use crate::error::{CalcError, Result};
use crate::formulas::{ExchangeRateTable, RateQuote, RateSource};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Body returned by the rate service
#[derive(Debug, Clone, Deserialize)]
pub struct RatesResponse {
    pub rates: HashMap<String, f64>,
    /// Unix seconds of the provider's last refresh
    #[serde(default)]
    pub time_last_updated: Option<i64>,
}

impl RatesResponse {
    pub fn as_of(&self) -> Option<DateTime<Utc>> {
        self.time_last_updated
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }

    /// Live quote for `from -> to`, if the body carries a usable rate
    pub fn quote(&self, from: &str, to: &str) -> Option<RateQuote> {
        let rate = *self.rates.get(to)?;
        if !rate.is_finite() || rate <= 0.0 {
            return None;
        }
        Some(RateQuote {
            from: from.to_string(),
            to: to.to_string(),
            rate,
            source: RateSource::Live,
            as_of: self.as_of(),
        })
    }
}

/// Reusable client (connection-pooled) for the rate service
pub struct LiveRateClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl LiveRateClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Self::new(
            settings.rates_api_url.clone(),
            Duration::from_millis(settings.rates_timeout_ms),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Raw fetch for one base currency, no timeout or fallback applied
    pub async fn fetch_rates(&self, base: &str) -> anyhow::Result<RatesResponse> {
        let url = format!("{}/{}", self.base_url, base);
        debug!(%url, "fetching live rates");

        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json::<RatesResponse>().await?)
    }

    /// Quote `from -> to`, preferring the live service.
    ///
    /// Same-currency and unsupported pairs are rejected up front; every other
    /// failure degrades to the static table.
    pub async fn quote(&self, from: &str, to: &str) -> Result<RateQuote> {
        let table = ExchangeRateTable::fallback();
        if from == to {
            return Err(CalcError::SameCurrency);
        }
        if !table.contains(from) || !table.contains(to) {
            return Err(CalcError::UnsupportedCurrencyPair {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        match tokio::time::timeout(self.timeout, self.fetch_rates(from)).await {
            Ok(Ok(body)) => match body.quote(from, to) {
                Some(quote) => return Ok(quote),
                None => warn!(from, to, "live rates missing target currency, using static table"),
            },
            Ok(Err(e)) => warn!(from, to, error = %e, "live rate fetch failed, using static table"),
            Err(_) => warn!(
                from,
                to,
                timeout_ms = self.timeout.as_millis() as u64,
                "live rate fetch timed out, using static table"
            ),
        }

        table.quote(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rates_body() {
        let body: RatesResponse = serde_json::from_str(
            r#"{"base":"USD","rates":{"INR":83.12,"EUR":0.93},"time_last_updated":1700000000}"#,
        )
        .unwrap();

        let quote = body.quote("USD", "INR").unwrap();
        assert_eq!(quote.rate, 83.12);
        assert_eq!(quote.source, RateSource::Live);
        assert_eq!(quote.as_of.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_missing_or_bad_rate_gives_no_quote() {
        let body: RatesResponse =
            serde_json::from_str(r#"{"rates":{"EUR":0.0}}"#).unwrap();
        assert!(body.as_of().is_none());
        assert!(body.quote("USD", "INR").is_none());
        assert!(body.quote("USD", "EUR").is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = LiveRateClient::new("http://localhost:1/latest/", Duration::from_millis(10)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1/latest");
    }

    #[tokio::test]
    async fn test_unreachable_service_falls_back_to_static_table() {
        let client = LiveRateClient::new("http://127.0.0.1:9/latest", Duration::from_millis(500)).unwrap();

        let quote = client.quote("USD", "INR").await.unwrap();
        assert_eq!(quote.source, RateSource::Static);
        assert_eq!(quote.rate, 83.0);
    }

    #[tokio::test]
    async fn test_pair_checks_run_before_fetch() {
        let client = LiveRateClient::new("http://127.0.0.1:9/latest", Duration::from_millis(500)).unwrap();

        assert_eq!(client.quote("USD", "USD").await, Err(CalcError::SameCurrency));
        assert!(matches!(
            client.quote("USD", "XYZ").await,
            Err(CalcError::UnsupportedCurrencyPair { .. })
        ));
    }
}
