use serde::{Deserialize, Serialize};

use crate::entity::Token;

/// A single row of the balances dashboard. Recomputed on every refresh,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenBalance {
    pub mint: String,
    pub balance: f64,
    pub decimals: u8,
    /// Raw on-chain amount, as the RPC returns it.
    pub amount: String,
    pub metadata: Option<Token>,
    pub price_usd: Option<f64>,
    pub usd_value: Option<f64>,
}

impl TokenBalance {
    pub fn symbol(&self) -> &str {
        self.metadata
            .as_ref()
            .map(|m| m.symbol.as_str())
            .unwrap_or("UNKNOWN")
    }
}
