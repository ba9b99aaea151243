use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::interactor::send_interactor::SendInteractor;
use crate::view::send_view::SendView;

#[async_trait]
pub trait SendPresenter: Send + Sync {
    async fn send_transfer(
        &self,
        telegram_id: i64,
        recipient: &str,
        amount: f64,
        token: &str,
    ) -> Result<()>;
}

pub struct SendPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> SendPresenterImpl<I, V>
where
    I: SendInteractor,
    V: SendView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I, V> SendPresenter for SendPresenterImpl<I, V>
where
    I: SendInteractor + Send + Sync,
    V: SendView + Send + Sync,
{
    async fn send_transfer(
        &self,
        telegram_id: i64,
        recipient: &str,
        amount: f64,
        token: &str,
    ) -> Result<()> {
        let message = self.view.display_processing().await?;

        let outcome = self
            .interactor
            .send_transfer(telegram_id, recipient, amount, token)
            .await?;

        self.view.display_outcome(outcome, message).await?;

        Ok(())
    }
}
