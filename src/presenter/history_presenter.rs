use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::entity::BotError;
use crate::interactor::history_interactor::HistoryInteractor;
use crate::view::history_view::HistoryView;

#[async_trait]
pub trait HistoryPresenter: Send + Sync {
    async fn show_history(&self, telegram_id: i64) -> Result<()>;
}

pub struct HistoryPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> HistoryPresenterImpl<I, V>
where
    I: HistoryInteractor,
    V: HistoryView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I, V> HistoryPresenter for HistoryPresenterImpl<I, V>
where
    I: HistoryInteractor + Send + Sync,
    V: HistoryView + Send + Sync,
{
    async fn show_history(&self, telegram_id: i64) -> Result<()> {
        let message = self.view.display_loading().await?;

        match self.interactor.get_recent_activity(telegram_id).await {
            Ok(records) => {
                self.view.display_activity(records, message).await?;
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
