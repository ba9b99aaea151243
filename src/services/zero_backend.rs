use anyhow::Result;
use log::info;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;

use crate::entity::{AlphaUser, BotError, KycProfile, LeaderboardEntry, VirtualAccount};

const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";

/// Client for the ZeroAlpha backend: OTP login, points, check-in,
/// leaderboard, KYC profile and virtual banking accounts. The backend is
/// opaque; its `error` strings are surfaced to the UI unchanged.
pub struct ZeroBackendClient {
    http_client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    user: AlphaUser,
    #[serde(default)]
    warning: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CheckInResponse {
    message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AccountsResponse {
    #[serde(default)]
    pub accounts: Vec<VirtualAccount>,
    #[serde(default, rename = "isCustomer")]
    pub is_customer: bool,
}

impl ZeroBackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        let base_url =
            env::var("ZERO_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        Self::new(&base_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request an OTP for the given email.
    pub async fn send_otp(&self, email: &str) -> Result<()> {
        let response = self
            .http_client
            .post(self.url("/api/zero/auth/login"))
            .json(&json!({ "email": email }))
            .send()
            .await
            .map_err(|e| BotError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(backend_error(response).await.into());
        }

        info!("OTP requested for {}", email);
        Ok(())
    }

    /// Verify an OTP and bind the wallet address to the account.
    pub async fn verify_otp(
        &self,
        email: &str,
        otp: &str,
        wallet_address: Option<&str>,
    ) -> Result<AlphaUser> {
        let response = self
            .http_client
            .post(self.url("/api/zero/auth/verify"))
            .json(&json!({
                "email": email,
                "otp": otp,
                "walletAddress": wallet_address,
            }))
            .send()
            .await
            .map_err(|e| BotError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(backend_error(response).await.into());
        }

        let verified: VerifyResponse = response
            .json()
            .await
            .map_err(|e| BotError::Backend(format!("Malformed verify response: {}", e)))?;

        if let Some(warning) = verified.warning {
            return Err(BotError::Backend(warning).into());
        }

        Ok(verified.user)
    }

    /// Fetch the points record for an email.
    pub async fn get_user(&self, email: &str) -> Result<AlphaUser> {
        let response = self
            .http_client
            .get(self.url(&format!("/api/zero/user/{}", email)))
            .send()
            .await
            .map_err(|e| BotError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(backend_error(response).await.into());
        }

        response
            .json()
            .await
            .map_err(|e| BotError::Backend(format!("Malformed user response: {}", e)).into())
    }

    /// Daily check-in; returns the backend's confirmation message.
    pub async fn check_in(&self, email: &str) -> Result<String> {
        let response = self
            .http_client
            .post(self.url("/api/zero/checkin"))
            .json(&json!({ "email": email }))
            .send()
            .await
            .map_err(|e| BotError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(backend_error(response).await.into());
        }

        let checked: CheckInResponse = response
            .json()
            .await
            .map_err(|e| BotError::Backend(format!("Malformed check-in response: {}", e)))?;

        Ok(checked.message)
    }

    /// Ranked leaderboard, optionally filtered to one reputation tier.
    pub async fn leaderboard(&self, tier: Option<&str>) -> Result<Vec<LeaderboardEntry>> {
        let url = match tier {
            Some(tier) if tier != "all" => {
                self.url(&format!("/api/zero/leaderboard?tier={}", tier))
            }
            _ => self.url("/api/zero/leaderboard"),
        };

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| BotError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(backend_error(response).await.into());
        }

        response
            .json()
            .await
            .map_err(|e| BotError::Backend(format!("Malformed leaderboard response: {}", e)).into())
    }

    /// Submit a KYC profile; returns any virtual accounts the backend
    /// provisioned in response.
    pub async fn update_profile(&self, profile: &KycProfile) -> Result<Vec<VirtualAccount>> {
        let response = self
            .http_client
            .post(self.url("/api/zero/auth/update-profile"))
            .json(profile)
            .send()
            .await
            .map_err(|e| BotError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(backend_error(response).await.into());
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| BotError::Backend(format!("Malformed profile response: {}", e)))?;

        let accounts = body
            .get("accounts")
            .cloned()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| BotError::Backend(format!("Malformed accounts payload: {}", e)))?
            .unwrap_or_default();

        Ok(accounts)
    }

    /// Virtual accounts for an email. A 404 means none exist yet.
    pub async fn virtual_accounts(&self, email: &str) -> Result<AccountsResponse> {
        let response = self
            .http_client
            .get(self.url(&format!("/api/afriex/accounts/{}", email)))
            .send()
            .await
            .map_err(|e| BotError::Backend(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(AccountsResponse::default());
        }

        if !response.status().is_success() {
            return Err(backend_error(response).await.into());
        }

        response
            .json()
            .await
            .map_err(|e| BotError::Backend(format!("Malformed accounts response: {}", e)).into())
    }

    /// Provision virtual accounts for an existing customer.
    pub async fn create_virtual_accounts(&self, email: &str) -> Result<Vec<VirtualAccount>> {
        let response = self
            .http_client
            .post(self.url("/api/afriex/accounts/create"))
            .json(&json!({ "email": email }))
            .send()
            .await
            .map_err(|e| BotError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(backend_error(response).await.into());
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| BotError::Backend(format!("Malformed accounts response: {}", e)))?;

        let accounts = body
            .get("accounts")
            .cloned()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| BotError::Backend(format!("Malformed accounts payload: {}", e)))?
            .unwrap_or_default();

        Ok(accounts)
    }
}

/// Turn a failed response into the backend's own error string, falling
/// back to the HTTP status when the body carries none.
async fn backend_error(response: reqwest::Response) -> BotError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    BotError::Backend(extract_error(status, &body))
}

fn extract_error(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(message) = value.get(key).and_then(Value::as_str) {
                if !message.is_empty() {
                    return message.to_string();
                }
            }
        }
    }

    format!("Request failed with status {}", status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surfaces_server_error_string() {
        let message = extract_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":"OTP expired. Please request a new one."}"#,
        );
        assert_eq!(message, "OTP expired. Please request a new one.");
    }

    #[test]
    fn falls_back_to_status_for_opaque_bodies() {
        let message = extract_error(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(message, "Request failed with status 500 Internal Server Error");
    }

    #[test]
    fn parses_alpha_user_payload() {
        let user: AlphaUser = serde_json::from_str(
            r#"{
                "_id": "66f0c2",
                "email": "trader@example.com",
                "walletAddress": "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin",
                "points": 1250.0,
                "fairScore": 87.5,
                "reputationTier": "gold",
                "multiplier": 1.5,
                "lastDailyCheckIn": "2026-08-06T09:00:00Z",
                "tradingVolume": 40210.0
            }"#,
        )
        .unwrap();

        assert_eq!(user.email, "trader@example.com");
        assert_eq!(user.points, 1250.0);
        assert_eq!(user.reputation_tier, "gold");
        assert!(user.last_daily_check_in.is_some());
    }

    #[test]
    fn alpha_user_defaults_missing_fields() {
        let user: AlphaUser =
            serde_json::from_str(r#"{"_id":"1","email":"new@example.com"}"#).unwrap();

        assert_eq!(user.points, 0.0);
        assert_eq!(user.multiplier, 1.0);
        assert!(user.last_daily_check_in.is_none());
    }

    #[test]
    fn accounts_response_defaults_to_empty() {
        let response: AccountsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.accounts.is_empty());
        assert!(!response.is_customer);
    }
}
