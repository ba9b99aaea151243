use std::env;

/// Endpoints for the price and metadata providers. Everything has a
/// mainnet default and can be overridden from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Jupiter price API (primary quote source)
    pub price_api_url: String,

    /// Jupiter verified token list
    pub token_list_url: String,

    /// Jupiter single-token metadata endpoint
    pub token_api_url: String,

    /// Jupiter portfolio API
    pub portfolio_api_url: String,

    /// CoinGecko simple-price endpoint (SOL fallback)
    pub coingecko_api_url: String,

    /// DexScreener token-pairs endpoint (per-mint fallback)
    pub dexscreener_api_url: String,

    /// Optional Jupiter API key, sent as x-api-key
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            price_api_url: "https://api.jup.ag/price/v3".to_string(),
            token_list_url: "https://tokens.jup.ag/tokens?tags=verified".to_string(),
            token_api_url: "https://api.jup.ag/tokens/v1/token".to_string(),
            portfolio_api_url: "https://api.jup.ag/portfolio/v1".to_string(),
            coingecko_api_url: "https://api.coingecko.com/api/v3/simple/price".to_string(),
            dexscreener_api_url: "https://api.dexscreener.com/latest/dex/tokens".to_string(),
            api_key: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            price_api_url: env::var("JUPITER_PRICE_API_URL").unwrap_or(defaults.price_api_url),
            token_list_url: env::var("JUPITER_TOKEN_LIST_URL").unwrap_or(defaults.token_list_url),
            token_api_url: env::var("JUPITER_TOKEN_API_URL").unwrap_or(defaults.token_api_url),
            portfolio_api_url: env::var("JUPITER_PORTFOLIO_API_URL")
                .unwrap_or(defaults.portfolio_api_url),
            coingecko_api_url: env::var("COINGECKO_API_URL").unwrap_or(defaults.coingecko_api_url),
            dexscreener_api_url: env::var("DEXSCREENER_API_URL")
                .unwrap_or(defaults.dexscreener_api_url),
            api_key: env::var("JUPITER_API_KEY").ok(),
        }
    }
}
