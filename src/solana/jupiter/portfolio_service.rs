use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::warn;
use reqwest::{Client, StatusCode};

use crate::entity::BotError;
use crate::solana::jupiter::models::{PortfolioPositions, StakedJup};
use crate::solana::jupiter::Config;

/// Third-party portfolio view (Jupiter positions and staked JUP).
#[async_trait]
pub trait PortfolioService: Send + Sync {
    /// Open positions for a wallet. A 401 from the API maps to
    /// `BotError::PortfolioRestricted` so the screen can branch.
    async fn get_positions(&self, address: &str) -> Result<PortfolioPositions>;

    /// Staked JUP, when the endpoint answers. Failures are non-fatal.
    async fn get_staked_jup(&self, address: &str) -> Result<Option<StakedJup>>;
}

pub struct JupiterPortfolioService {
    http_client: Client,
    config: Config,
}

impl JupiterPortfolioService {
    pub fn new(config: Config) -> Self {
        Self {
            http_client: Client::new(),
            config,
        }
    }

    fn get(&self, path: &str, address: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}/{}", self.config.portfolio_api_url, path, address);
        let mut request = self.http_client.get(&url);
        if let Some(key) = &self.config.api_key {
            request = request.header("x-api-key", key);
        }
        request
    }
}

#[async_trait]
impl PortfolioService for JupiterPortfolioService {
    async fn get_positions(&self, address: &str) -> Result<PortfolioPositions> {
        let response = self
            .get("positions", address)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to fetch portfolio: {}", e))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(BotError::PortfolioRestricted.into());
        }

        if !response.status().is_success() {
            return Err(anyhow!("Portfolio API returned {}", response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse portfolio response: {}", e))
    }

    async fn get_staked_jup(&self, address: &str) -> Result<Option<StakedJup>> {
        let response = match self.get("staked-jup", address).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Staked JUP request failed: {}", e);
                return Ok(None);
            }
        };

        if !response.status().is_success() {
            warn!("Staked JUP API returned: {}", response.status());
            return Ok(None);
        }

        Ok(response.json().await.ok())
    }
}
