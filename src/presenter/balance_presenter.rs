use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::types::Message;

use crate::entity::BotError;
use crate::interactor::balance_interactor::BalanceInteractor;
use crate::view::balance_view::BalanceView;

#[async_trait]
pub trait BalancePresenter: Send + Sync {
    async fn show_balances(&self, telegram_id: i64) -> Result<()>;
    async fn refresh_balances(&self, telegram_id: i64, message: Option<Message>) -> Result<()>;
}

pub struct BalancePresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> BalancePresenterImpl<I, V>
where
    I: BalanceInteractor,
    V: BalanceView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }

    async fn load_and_display(&self, telegram_id: i64, message: Option<Message>) -> Result<()> {
        match self.interactor.get_wallet_balances(telegram_id).await {
            Ok((address, balances, total_usd)) => {
                self.view
                    .display_balances(address, balances, total_usd, message)
                    .await?;
            }
            Err(e) => match e.downcast_ref::<BotError>() {
                Some(BotError::WalletNotFound) => {
                    self.view.display_no_wallet(message).await?;
                }
                _ => {
                    self.view.display_error(e.to_string(), message).await?;
                }
            },
        }

        Ok(())
    }
}

#[async_trait]
impl<I, V> BalancePresenter for BalancePresenterImpl<I, V>
where
    I: BalanceInteractor + Send + Sync,
    V: BalanceView + Send + Sync,
{
    async fn show_balances(&self, telegram_id: i64) -> Result<()> {
        let message = self.view.display_loading().await?;
        self.load_and_display(telegram_id, message).await
    }

    async fn refresh_balances(&self, telegram_id: i64, message: Option<Message>) -> Result<()> {
        let message = match message {
            Some(msg) => self.view.display_loading_update(msg).await?,
            None => self.view.display_loading().await?,
        };

        self.load_and_display(telegram_id, message).await
    }
}
