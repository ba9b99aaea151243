use serde::{Deserialize, Serialize};

/// Classification of a ledger transaction relative to the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Send,
    Receive,
    Swap,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Success,
    Failed,
}

/// One entry of the transaction history screen, derived from ledger
/// balance deltas and parsed instructions. Rebuilt on every fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub signature: String,
    pub timestamp: i64,
    pub kind: ActivityKind,
    pub amount: Option<f64>,
    pub token_symbol: Option<String>,
    pub token_mint: Option<String>,
    pub status: ActivityStatus,
    /// Network fee in SOL, when the transaction meta carried one.
    pub fee: Option<f64>,
}

impl ActivityRecord {
    pub fn new(signature: &str, timestamp: i64, status: ActivityStatus) -> Self {
        Self {
            signature: signature.to_string(),
            timestamp,
            kind: ActivityKind::Unknown,
            amount: None,
            token_symbol: None,
            token_mint: None,
            status,
            fee: None,
        }
    }
}
