use anyhow::Result;
use async_trait::async_trait;
use log::info;
use sqlx::PgPool;
use std::sync::Arc;

use crate::entity::{AlphaUser, BotError, KycProfile, LeaderboardEntry, VirtualAccount};
use crate::interactor::db;
use crate::services::{AccountsResponse, ZeroBackendClient};
use crate::utils;

/// ZeroAlpha points sub-app: OTP login, dashboard, check-in, leaderboard
/// and the banking endpoints behind the same backend.
#[async_trait]
pub trait AlphaInteractor: Send + Sync {
    /// Email of an already-verified session, if one is cached.
    async fn cached_email(&self, telegram_id: i64) -> Result<Option<String>>;
    async fn request_otp(&self, email: &str) -> Result<()>;
    async fn verify_otp(&self, telegram_id: i64, email: &str, otp: &str) -> Result<AlphaUser>;
    async fn dashboard(&self, email: &str) -> Result<AlphaUser>;
    async fn check_in(&self, email: &str) -> Result<String>;
    async fn leaderboard(&self, tier: Option<&str>) -> Result<Vec<LeaderboardEntry>>;
    async fn logout(&self, telegram_id: i64) -> Result<()>;
    async fn virtual_accounts(&self, email: &str) -> Result<AccountsResponse>;
    async fn create_virtual_accounts(&self, email: &str) -> Result<Vec<VirtualAccount>>;
    async fn submit_kyc(
        &self,
        telegram_id: i64,
        full_name: &str,
        phone: &str,
        dob: &str,
    ) -> Result<Vec<VirtualAccount>>;
}

pub struct AlphaInteractorImpl {
    db_pool: Arc<PgPool>,
    backend: Arc<ZeroBackendClient>,
}

impl AlphaInteractorImpl {
    pub fn new(db_pool: Arc<PgPool>, backend: Arc<ZeroBackendClient>) -> Self {
        Self { db_pool, backend }
    }
}

#[async_trait]
impl AlphaInteractor for AlphaInteractorImpl {
    async fn cached_email(&self, telegram_id: i64) -> Result<Option<String>> {
        let user = db::get_user_by_telegram_id(&self.db_pool, telegram_id).await?;
        Ok(user.alpha_email)
    }

    async fn request_otp(&self, email: &str) -> Result<()> {
        if !utils::validate_email(email) {
            return Err(BotError::Backend("Invalid email address".to_string()).into());
        }

        self.backend.send_otp(email).await
    }

    async fn verify_otp(&self, telegram_id: i64, email: &str, otp: &str) -> Result<AlphaUser> {
        // The backend issues six-digit codes; reject anything else before
        // making a request.
        if !utils::validate_otp_code(otp) {
            return Err(BotError::InvalidOtp.into());
        }

        let user = db::get_user_by_telegram_id(&self.db_pool, telegram_id).await?;

        let alpha_user = self
            .backend
            .verify_otp(email, otp.trim(), user.solana_address.as_deref())
            .await?;

        // Cache the verified email so the next /alpha skips the OTP step.
        db::set_alpha_email(&self.db_pool, telegram_id, Some(email)).await?;
        info!("ZeroAlpha session opened for Telegram ID {}", telegram_id);

        Ok(alpha_user)
    }

    async fn dashboard(&self, email: &str) -> Result<AlphaUser> {
        self.backend.get_user(email).await
    }

    async fn check_in(&self, email: &str) -> Result<String> {
        self.backend.check_in(email).await
    }

    async fn leaderboard(&self, tier: Option<&str>) -> Result<Vec<LeaderboardEntry>> {
        self.backend.leaderboard(tier).await
    }

    async fn logout(&self, telegram_id: i64) -> Result<()> {
        db::set_alpha_email(&self.db_pool, telegram_id, None).await?;
        Ok(())
    }

    async fn virtual_accounts(&self, email: &str) -> Result<AccountsResponse> {
        self.backend.virtual_accounts(email).await
    }

    async fn create_virtual_accounts(&self, email: &str) -> Result<Vec<VirtualAccount>> {
        self.backend.create_virtual_accounts(email).await
    }

    async fn submit_kyc(
        &self,
        telegram_id: i64,
        full_name: &str,
        phone: &str,
        dob: &str,
    ) -> Result<Vec<VirtualAccount>> {
        let Some(email) = self.cached_email(telegram_id).await? else {
            return Err(
                BotError::Backend("Sign in to ZeroAlpha before submitting KYC".to_string()).into(),
            );
        };

        let profile = KycProfile {
            email,
            full_name: full_name.to_string(),
            phone: phone.to_string(),
            dob: dob.to_string(),
            address: None,
            city: None,
            state: None,
            country_code: None,
            bvn: None,
        };

        self.backend.update_profile(&profile).await
    }
}
