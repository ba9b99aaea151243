use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::entity::BotError;
use crate::interactor::alpha_interactor::AlphaInteractor;
use crate::view::alpha_view::AlphaView;

#[async_trait]
pub trait AlphaPresenter: Send + Sync {
    /// Entry point: show the dashboard when a session is cached, otherwise
    /// start the email → OTP login flow.
    async fn open(&self, telegram_id: i64) -> Result<bool>;
    async fn request_otp(&self, email: &str) -> Result<bool>;
    async fn verify_otp(&self, telegram_id: i64, email: &str, otp: &str) -> Result<bool>;
    async fn show_dashboard(&self, telegram_id: i64) -> Result<bool>;
    async fn check_in(&self, telegram_id: i64) -> Result<bool>;
    async fn show_leaderboard(&self, tier: Option<String>) -> Result<()>;
    async fn show_accounts(&self, telegram_id: i64) -> Result<bool>;
    async fn create_accounts(&self, telegram_id: i64) -> Result<bool>;
    async fn submit_kyc(
        &self,
        telegram_id: i64,
        full_name: &str,
        phone: &str,
        dob: &str,
    ) -> Result<()>;
    async fn logout(&self, telegram_id: i64) -> Result<()>;
}

pub struct AlphaPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> AlphaPresenterImpl<I, V>
where
    I: AlphaInteractor,
    V: AlphaView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }

    async fn require_email(&self, telegram_id: i64) -> Result<Option<String>> {
        match self.interactor.cached_email(telegram_id).await? {
            Some(email) => Ok(Some(email)),
            None => {
                self.view.prompt_email().await?;
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<I, V> AlphaPresenter for AlphaPresenterImpl<I, V>
where
    I: AlphaInteractor + Send + Sync,
    V: AlphaView + Send + Sync,
{
    async fn open(&self, telegram_id: i64) -> Result<bool> {
        self.show_dashboard(telegram_id).await
    }

    async fn request_otp(&self, email: &str) -> Result<bool> {
        match self.interactor.request_otp(email).await {
            Ok(()) => {
                self.view.prompt_otp(email).await?;
                Ok(true)
            }
            Err(e) => {
                self.view.display_error(e.to_string(), None).await?;
                Ok(false)
            }
        }
    }

    async fn verify_otp(&self, telegram_id: i64, email: &str, otp: &str) -> Result<bool> {
        match self.interactor.verify_otp(telegram_id, email, otp).await {
            Ok(user) => {
                self.view.display_dashboard(user, None).await?;
                Ok(true)
            }
            Err(e) => {
                let text = match e.downcast_ref::<BotError>() {
                    Some(BotError::InvalidOtp) => "Please enter all 6 digits".to_string(),
                    _ => e.to_string(),
                };
                self.view.display_error(text, None).await?;
                Ok(false)
            }
        }
    }

    async fn show_dashboard(&self, telegram_id: i64) -> Result<bool> {
        let Some(email) = self.require_email(telegram_id).await? else {
            return Ok(false);
        };

        let message = self.view.display_loading().await?;

        match self.interactor.dashboard(&email).await {
            Ok(user) => self.view.display_dashboard(user, message).await?,
            Err(e) => self.view.display_error(e.to_string(), message).await?,
        }

        Ok(true)
    }

    async fn check_in(&self, telegram_id: i64) -> Result<bool> {
        let Some(email) = self.require_email(telegram_id).await? else {
            return Ok(false);
        };

        match self.interactor.check_in(&email).await {
            Ok(result) => {
                self.view.display_check_in_result(result).await?;
                // Check-in changes points; refresh the dashboard.
                self.show_dashboard(telegram_id).await?;
            }
            Err(e) => self.view.display_error(e.to_string(), None).await?,
        }

        Ok(true)
    }

    async fn show_leaderboard(&self, tier: Option<String>) -> Result<()> {
        match self.interactor.leaderboard(tier.as_deref()).await {
            Ok(entries) => self.view.display_leaderboard(entries, tier, None).await?,
            Err(e) => self.view.display_error(e.to_string(), None).await?,
        }

        Ok(())
    }

    async fn show_accounts(&self, telegram_id: i64) -> Result<bool> {
        let Some(email) = self.require_email(telegram_id).await? else {
            return Ok(false);
        };

        match self.interactor.virtual_accounts(&email).await {
            Ok(response) => {
                self.view
                    .display_accounts(response.accounts, response.is_customer, None)
                    .await?;
            }
            Err(e) => self.view.display_error(e.to_string(), None).await?,
        }

        Ok(true)
    }

    async fn create_accounts(&self, telegram_id: i64) -> Result<bool> {
        let Some(email) = self.require_email(telegram_id).await? else {
            return Ok(false);
        };

        match self.interactor.create_virtual_accounts(&email).await {
            Ok(accounts) => {
                self.view.display_accounts(accounts, true, None).await?;
            }
            Err(e) => self.view.display_error(e.to_string(), None).await?,
        }

        Ok(true)
    }

    async fn submit_kyc(
        &self,
        telegram_id: i64,
        full_name: &str,
        phone: &str,
        dob: &str,
    ) -> Result<()> {
        match self
            .interactor
            .submit_kyc(telegram_id, full_name, phone, dob)
            .await
        {
            Ok(accounts) => {
                self.view.display_accounts(accounts, true, None).await?;
            }
            Err(e) => self.view.display_error(e.to_string(), None).await?,
        }

        Ok(())
    }

    async fn logout(&self, telegram_id: i64) -> Result<()> {
        self.interactor.logout(telegram_id).await?;
        self.view.display_logged_out().await?;

        Ok(())
    }
}
