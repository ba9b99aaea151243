use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::entity::Token;
use crate::solana::jupiter::Config;
use crate::solana::tokens::constants::{SOL_MINT, USDC_MINT};

/// Repository for token metadata.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Get token information by its mint address.
    async fn get_token_by_id(&self, token_id: &str) -> Result<Token>;

    /// The verified token list, keyed by mint. An unreachable list yields
    /// an empty map rather than blocking the dashboard.
    async fn token_map(&self) -> HashMap<String, Token>;

    /// Resolve a user-entered symbol ("SOL", "USDC", ...) to a token.
    async fn resolve_symbol(&self, symbol: &str) -> Option<Token>;
}

/// Metadata from the Jupiter verified token list, cached in-process for
/// the lifetime of the bot.
pub struct JupiterTokenRepository {
    http_client: Client,
    config: Config,
    list_cache: Arc<Mutex<Option<HashMap<String, Token>>>>,
}

impl JupiterTokenRepository {
    pub fn new(config: Config) -> Self {
        Self {
            http_client: Client::new(),
            config,
            list_cache: Arc::new(Mutex::new(None)),
        }
    }

    async fn fetch_verified_list(&self) -> Result<Vec<Token>> {
        let response = self
            .http_client
            .get(&self.config.token_list_url)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to fetch token list: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("Token list returned {}", response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse token list: {}", e))
    }

    fn placeholder(token_id: &str) -> Option<Token> {
        match token_id {
            SOL_MINT => Some(Token {
                address: SOL_MINT.to_string(),
                name: "Solana".to_string(),
                symbol: "SOL".to_string(),
                decimals: 9,
                logo_uri: None,
                tags: None,
            }),
            USDC_MINT => Some(Token {
                address: USDC_MINT.to_string(),
                name: "USD Coin".to_string(),
                symbol: "USDC".to_string(),
                decimals: 6,
                logo_uri: None,
                tags: None,
            }),
            _ => None,
        }
    }
}

#[async_trait]
impl TokenRepository for JupiterTokenRepository {
    async fn get_token_by_id(&self, token_id: &str) -> Result<Token> {
        if let Some(token) = self.token_map().await.get(token_id) {
            return Ok(token.clone());
        }

        // Not on the verified list: try the single-token endpoint.
        let url = format!("{}/{}", self.config.token_api_url, token_id);
        let response = self.http_client.get(&url).send().await.map_err(|e| {
            warn!("Failed to fetch token from Jupiter API: {}", e);
            anyhow!("Failed to fetch token from API: {}", e)
        })?;

        info!(
            "Jupiter token API response: {} for {}",
            response.status(),
            token_id
        );

        if !response.status().is_success() {
            if let Some(token) = Self::placeholder(token_id) {
                return Ok(token);
            }

            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!("Jupiter API error: {}", error_text));
        }

        response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse token response: {}", e))
    }

    async fn token_map(&self) -> HashMap<String, Token> {
        if let Some(cached) = self.list_cache.lock().unwrap().as_ref() {
            return cached.clone();
        }

        match self.fetch_verified_list().await {
            Ok(tokens) => {
                let map: HashMap<String, Token> = tokens
                    .into_iter()
                    .map(|token| (token.address.clone(), token))
                    .collect();
                info!("Loaded {} verified tokens", map.len());
                *self.list_cache.lock().unwrap() = Some(map.clone());
                map
            }
            Err(e) => {
                // Failures are not cached so the next refresh retries.
                warn!("Error fetching token metadata: {}", e);
                HashMap::new()
            }
        }
    }

    async fn resolve_symbol(&self, symbol: &str) -> Option<Token> {
        let wanted = symbol.to_uppercase();

        if wanted == "SOL" {
            return Self::placeholder(SOL_MINT);
        }

        let map = self.token_map().await;
        let mut found = map
            .values()
            .find(|token| token.symbol.to_uppercase() == wanted)
            .cloned();

        if found.is_none() && wanted == "USDC" {
            found = Self::placeholder(USDC_MINT);
        }

        found
    }
}
