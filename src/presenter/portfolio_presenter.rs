use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::entity::BotError;
use crate::interactor::db;
use crate::interactor::portfolio_interactor::PortfolioInteractor;
use crate::view::portfolio_view::PortfolioView;
use sqlx::PgPool;

#[async_trait]
pub trait PortfolioPresenter: Send + Sync {
    async fn show_portfolio(&self, telegram_id: i64) -> Result<()>;
}

pub struct PortfolioPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
    db_pool: Arc<PgPool>,
}

impl<I, V> PortfolioPresenterImpl<I, V>
where
    I: PortfolioInteractor,
    V: PortfolioView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>, db_pool: Arc<PgPool>) -> Self {
        Self {
            interactor,
            view,
            db_pool,
        }
    }
}

#[async_trait]
impl<I, V> PortfolioPresenter for PortfolioPresenterImpl<I, V>
where
    I: PortfolioInteractor + Send + Sync,
    V: PortfolioView + Send + Sync,
{
    async fn show_portfolio(&self, telegram_id: i64) -> Result<()> {
        let message = self.view.display_loading().await?;

        match self.interactor.get_portfolio(telegram_id).await {
            Ok((_address, positions, staked)) => {
                self.view
                    .display_portfolio(positions, staked, message)
                    .await?;
            }
            Err(e) => match e.downcast_ref::<BotError>() {
                Some(BotError::WalletNotFound) => {
                    self.view.display_no_wallet(message).await?;
                }
                Some(BotError::PortfolioRestricted) => {
                    // The restricted screen links out to the hosted
                    // dashboard, which needs the wallet address.
                    let address = db::get_user_by_telegram_id(&self.db_pool, telegram_id)
                        .await
                        .ok()
                        .and_then(|user| user.solana_address)
                        .unwrap_or_default();
                    self.view.display_restricted(address, message).await?;
                }
                _ => {
                    self.view.display_error(e.to_string(), message).await?;
                }
            },
        }

        Ok(())
    }
}
