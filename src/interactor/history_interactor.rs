use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::entity::{ActivityRecord, BotError};
use crate::interactor::db;
use crate::solana;
use crate::solana::client::RpcPool;
use crate::solana::jupiter::TokenRepository;

#[async_trait]
pub trait HistoryInteractor: Send + Sync {
    /// Recent classified transactions for the user's wallet, newest first
    /// as returned by the RPC. Empty when the wallet has no history.
    async fn get_recent_activity(&self, telegram_id: i64) -> Result<Vec<ActivityRecord>>;
}

pub struct HistoryInteractorImpl {
    db_pool: Arc<PgPool>,
    rpc_pool: Arc<RpcPool>,
    token_repository: Arc<dyn TokenRepository + Send + Sync>,
}

impl HistoryInteractorImpl {
    pub fn new(
        db_pool: Arc<PgPool>,
        rpc_pool: Arc<RpcPool>,
        token_repository: Arc<dyn TokenRepository + Send + Sync>,
    ) -> Self {
        Self {
            db_pool,
            rpc_pool,
            token_repository,
        }
    }
}

#[async_trait]
impl HistoryInteractor for HistoryInteractorImpl {
    async fn get_recent_activity(&self, telegram_id: i64) -> Result<Vec<ActivityRecord>> {
        let user = db::get_user_by_telegram_id(&self.db_pool, telegram_id).await?;
        let address = user.solana_address.ok_or(BotError::WalletNotFound)?;

        let mut records = solana::get_recent_activity(&self.rpc_pool, &address).await?;

        // The classifier only knows mints; resolve display symbols from
        // the verified token list where possible.
        let needs_symbols = records
            .iter()
            .any(|record| record.token_symbol.is_none() && record.token_mint.is_some());

        if needs_symbols {
            let metadata = self.token_repository.token_map().await;
            for record in &mut records {
                if record.token_symbol.is_none() {
                    if let Some(mint) = &record.token_mint {
                        record.token_symbol =
                            metadata.get(mint).map(|token| token.symbol.clone());
                    }
                }
            }
        }

        Ok(records)
    }
}
