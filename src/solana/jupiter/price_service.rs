use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::warn;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;

use crate::solana::jupiter::models::{CoinGeckoSimplePrice, DexScreenerResponse};
use crate::solana::jupiter::Config;
use crate::solana::tokens::constants::SOL_MINT;

/// USD quote source for the balances dashboard.
#[async_trait]
pub trait PriceService: Send + Sync {
    /// USD price per mint. Every requested mint appears in the result; a
    /// mint with no quote from any source maps to 0.
    async fn get_usd_prices(&self, mints: &[String]) -> Result<HashMap<String, f64>>;
}

/// Price aggregation over Jupiter with per-mint fallbacks: CoinGecko for
/// SOL, DexScreener for everything else. Fallback failures are silent —
/// the next source is simply consulted.
pub struct AggregatePriceService {
    http_client: Client,
    config: Config,
}

impl AggregatePriceService {
    pub fn new(config: Config) -> Self {
        Self {
            http_client: Client::new(),
            config,
        }
    }

    async fn fetch_primary(&self, mints: &[String]) -> Result<Value> {
        let url = format!("{}?ids={}", self.config.price_api_url, mints.join(","));

        let mut request = self.http_client.get(&url);
        if let Some(key) = &self.config.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| anyhow!("HTTP request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Jupiter price API returned {}",
                response.status()
            ));
        }

        response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse prices response: {}", e))
    }

    async fn coingecko_sol_price(&self) -> Option<f64> {
        let url = format!(
            "{}?ids=solana&vs_currencies=usd",
            self.config.coingecko_api_url
        );

        let response = self.http_client.get(&url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }

        let prices: CoinGeckoSimplePrice = response.json().await.ok()?;
        prices.solana.map(|entry| entry.usd)
    }

    async fn dexscreener_price(&self, mint: &str) -> Option<f64> {
        let url = format!("{}/{}", self.config.dexscreener_api_url, mint);

        let response = self.http_client.get(&url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }

        let pairs: DexScreenerResponse = response.json().await.ok()?;
        pairs
            .pairs?
            .into_iter()
            .next()
            .and_then(|pair| pair.price_usd)
    }
}

#[async_trait]
impl PriceService for AggregatePriceService {
    async fn get_usd_prices(&self, mints: &[String]) -> Result<HashMap<String, f64>> {
        let payload = match self.fetch_primary(mints).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Jupiter price API unavailable, using fallbacks: {}", e);
                Value::Null
            }
        };

        let mut prices = HashMap::with_capacity(mints.len());

        for mint in mints {
            if let Some(price) = extract_usd_price(&payload, mint) {
                prices.insert(mint.clone(), price);
                continue;
            }

            let fallback = if mint == SOL_MINT {
                self.coingecko_sol_price().await
            } else {
                self.dexscreener_price(mint).await
            };

            prices.insert(mint.clone(), fallback.unwrap_or(0.0));
        }

        Ok(prices)
    }
}

/// Pull a USD quote for `mint` out of a price API payload. Both the flat
/// and the `data`-wrapped response shapes are understood, with the price
/// under either `usdPrice` or `price`.
pub fn extract_usd_price(payload: &Value, mint: &str) -> Option<f64> {
    for root in [payload.get("data"), Some(payload)] {
        let Some(entry) = root.and_then(|value| value.get(mint)) else {
            continue;
        };

        for key in ["usdPrice", "price"] {
            if let Some(price) = entry.get(key).and_then(Value::as_f64) {
                return Some(price);
            }
            if let Some(price) = entry
                .get(key)
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<f64>().ok())
            {
                return Some(price);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_price_from_flat_payload() {
        let payload = json!({ SOL_MINT: { "usdPrice": 147.25 } });
        assert_eq!(extract_usd_price(&payload, SOL_MINT), Some(147.25));
    }

    #[test]
    fn extracts_price_from_data_wrapped_payload() {
        let payload = json!({ "data": { SOL_MINT: { "price": "146.5" } } });
        assert_eq!(extract_usd_price(&payload, SOL_MINT), Some(146.5));
    }

    #[test]
    fn missing_mint_yields_none() {
        let payload = json!({ "data": {} });
        assert_eq!(extract_usd_price(&payload, SOL_MINT), None);
        assert_eq!(extract_usd_price(&Value::Null, SOL_MINT), None);
    }
}
