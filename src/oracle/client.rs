//! HTTP client for the fiat price service.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::blockchain::client::decode_json;
use crate::blockchain::types::{AptosError, AptosResult};
use crate::config::OracleConfig;
use crate::observability::metrics;

/// Source of fiat prices keyed by ticker symbol.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Current fiat price of `symbol`.
    async fn get_price(&self, symbol: &str) -> AptosResult<f64>;
}

#[derive(Debug, Deserialize)]
struct PriceEntry {
    price: serde_json::Value,
}

/// Oracle backed by the `/fiat-prices` REST endpoint.
#[derive(Debug, Clone)]
pub struct HttpPriceOracle {
    http: Client,
    base_url: String,
}

impl HttpPriceOracle {
    pub fn new(config: &OracleConfig) -> AptosResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_url(url: &str) -> AptosResult<Self> {
        Self::new(&OracleConfig {
            url: url.to_string(),
            ..OracleConfig::default()
        })
    }
}

#[async_trait]
impl PriceOracle for HttpPriceOracle {
    async fn get_price(&self, symbol: &str) -> AptosResult<f64> {
        let currency = symbol.to_lowercase();
        let url = format!("{}/fiat-prices", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("currencies", currency.as_str())])
            .send()
            .await?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(symbol = %symbol, status = status, "Price request failed");
            metrics::record_api_error("fiat_prices", status);
            return Err(AptosError::Api { status, body });
        }

        let entries: Vec<PriceEntry> = decode_json("fiat_prices", response).await?;
        let entry = entries
            .first()
            .ok_or_else(|| AptosError::PriceUnavailable(symbol.to_string()))?;
        let price = parse_price(&entry.price)
            .ok_or_else(|| AptosError::InvalidResponse(format!("Unreadable price for {}: {}", symbol, entry.price)))?;

        tracing::debug!(symbol = %symbol, price = price, "Fetched fiat price");

        Ok(price)
    }
}

/// The service sends prices either as JSON numbers or as numeric strings.
fn parse_price(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
