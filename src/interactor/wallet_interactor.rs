use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::entity::BotError;
use crate::interactor::db;
use crate::solana::{self, NewWallet};

#[async_trait]
pub trait WalletInteractor: Send + Sync {
    async fn create_wallet(&self, telegram_id: i64) -> Result<NewWallet>;
    async fn get_wallet_address(&self, telegram_id: i64) -> Result<Option<String>>;
}

pub struct WalletInteractorImpl {
    db_pool: Arc<PgPool>,
}

impl WalletInteractorImpl {
    pub fn new(db_pool: Arc<PgPool>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl WalletInteractor for WalletInteractorImpl {
    async fn create_wallet(&self, telegram_id: i64) -> Result<NewWallet> {
        // Check if user already has a wallet
        let user = db::get_user_by_telegram_id(&self.db_pool, telegram_id).await?;

        if user.solana_address.is_some() {
            return Err(
                BotError::WalletCreationError("User already has a wallet".to_string()).into(),
            );
        }

        let wallet = solana::generate_wallet()?;

        db::save_wallet_info(
            &self.db_pool,
            telegram_id,
            &wallet.address,
            &wallet.keypair_base58,
            &wallet.mnemonic,
        )
        .await?;

        Ok(wallet)
    }

    async fn get_wallet_address(&self, telegram_id: i64) -> Result<Option<String>> {
        let user = db::get_user_by_telegram_id(&self.db_pool, telegram_id).await?;
        Ok(user.solana_address)
    }
}
