use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::entity::{BotError, User};
use crate::interactor::db;

/// Private key export bundle shown by the settings screen.
pub struct WalletExport {
    pub address: String,
    pub keypair_base58: String,
    pub mnemonic: String,
}

#[async_trait]
pub trait SettingsInteractor: Send + Sync {
    async fn get_user_settings(&self, telegram_id: i64) -> Result<User>;
    /// Flip light/dark and persist; returns the new theme.
    async fn toggle_theme(&self, telegram_id: i64) -> Result<String>;
    async fn export_wallet(&self, telegram_id: i64) -> Result<WalletExport>;
}

pub struct SettingsInteractorImpl {
    db_pool: Arc<PgPool>,
}

impl SettingsInteractorImpl {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SettingsInteractor for SettingsInteractorImpl {
    async fn get_user_settings(&self, telegram_id: i64) -> Result<User> {
        db::get_user_by_telegram_id(&self.db_pool, telegram_id)
            .await
            .map_err(|e| anyhow!("Failed to get user settings: {}", e))
    }

    async fn toggle_theme(&self, telegram_id: i64) -> Result<String> {
        let user = db::get_user_by_telegram_id(&self.db_pool, telegram_id).await?;

        let next = if user.theme == "light" { "dark" } else { "light" };

        db::update_theme(&self.db_pool, telegram_id, next)
            .await
            .map_err(|e| anyhow!("Failed to update theme setting: {}", e))?;

        Ok(next.to_string())
    }

    async fn export_wallet(&self, telegram_id: i64) -> Result<WalletExport> {
        let user = db::get_user_by_telegram_id(&self.db_pool, telegram_id).await?;

        match (
            user.solana_address,
            user.encrypted_private_key,
            user.mnemonic,
        ) {
            (Some(address), Some(keypair_base58), Some(mnemonic)) => Ok(WalletExport {
                address,
                keypair_base58,
                mnemonic,
            }),
            _ => Err(BotError::WalletNotFound.into()),
        }
    }
}
