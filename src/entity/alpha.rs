use serde::{Deserialize, Serialize};

/// ZeroAlpha user record. Owned by the backend; the bot only renders
/// the fields it receives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlphaUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub fair_score: f64,
    #[serde(default)]
    pub reputation_tier: String,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    #[serde(default)]
    pub last_daily_check_in: Option<String>,
    #[serde(default)]
    pub trading_volume: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub fair_score: f64,
    #[serde(default)]
    pub reputation_tier: String,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    #[serde(default)]
    pub trading_volume: f64,
    pub rank: u32,
}

/// KYC profile submitted through the profile-update endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycProfile {
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub dob: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bvn: Option<String>,
}

/// Virtual banking account provisioned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualAccount {
    pub currency: String,
    pub account_number: String,
    pub account_name: String,
    pub bank_name: String,
    #[serde(default)]
    pub bank_code: Option<String>,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}
