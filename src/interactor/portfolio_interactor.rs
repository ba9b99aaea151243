use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::entity::BotError;
use crate::interactor::db;
use crate::solana::jupiter::{PortfolioPositions, PortfolioService, StakedJup};

#[async_trait]
pub trait PortfolioInteractor: Send + Sync {
    async fn get_portfolio(
        &self,
        telegram_id: i64,
    ) -> Result<(String, PortfolioPositions, Option<StakedJup>)>;
}

pub struct PortfolioInteractorImpl {
    db_pool: Arc<PgPool>,
    portfolio_service: Arc<dyn PortfolioService + Send + Sync>,
}

impl PortfolioInteractorImpl {
    pub fn new(
        db_pool: Arc<PgPool>,
        portfolio_service: Arc<dyn PortfolioService + Send + Sync>,
    ) -> Self {
        Self {
            db_pool,
            portfolio_service,
        }
    }
}

#[async_trait]
impl PortfolioInteractor for PortfolioInteractorImpl {
    async fn get_portfolio(
        &self,
        telegram_id: i64,
    ) -> Result<(String, PortfolioPositions, Option<StakedJup>)> {
        let user = db::get_user_by_telegram_id(&self.db_pool, telegram_id).await?;
        let address = user.solana_address.ok_or(BotError::WalletNotFound)?;

        let positions = self.portfolio_service.get_positions(&address).await?;

        // Staked JUP is best-effort; the positions card renders without it.
        let staked = self.portfolio_service.get_staked_jup(&address).await?;

        Ok((address, positions, staked))
    }
}
