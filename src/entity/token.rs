use serde::{Deserialize, Serialize};

/// Token metadata as served by the Jupiter verified token list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(rename = "logoURI")]
    pub logo_uri: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Token {
    /// Placeholder metadata for a mint the verified list does not know.
    pub fn unknown(mint: &str, decimals: u8) -> Self {
        Self {
            address: mint.to_string(),
            name: "Unknown Token".to_string(),
            symbol: mint.chars().take(6).collect(),
            decimals,
            logo_uri: None,
            tags: None,
        }
    }
}
