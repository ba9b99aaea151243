use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::entity::BotError;
use crate::interactor::wallet_interactor::WalletInteractor;
use crate::view::wallet_view::WalletView;

#[async_trait]
pub trait WalletPresenter: Send + Sync {
    async fn create_wallet(&self, telegram_id: i64) -> Result<()>;
    /// The receive screen: address plus QR code.
    async fn show_receive_address(&self, telegram_id: i64) -> Result<()>;
}

pub struct WalletPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> WalletPresenterImpl<I, V>
where
    I: WalletInteractor,
    V: WalletView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I, V> WalletPresenter for WalletPresenterImpl<I, V>
where
    I: WalletInteractor + Send + Sync,
    V: WalletView + Send + Sync,
{
    async fn create_wallet(&self, telegram_id: i64) -> Result<()> {
        match self.interactor.create_wallet(telegram_id).await {
            Ok(wallet) => {
                self.view
                    .display_wallet_created(wallet.address, wallet.mnemonic)
                    .await?;
            }
            Err(e) => match e.downcast_ref::<BotError>() {
                Some(BotError::WalletCreationError(_)) => {
                    self.view.display_wallet_already_exists().await?;
                }
                _ => {
                    self.view.display_error(e.to_string()).await?;
                    return Err(e);
                }
            },
        }

        Ok(())
    }

    async fn show_receive_address(&self, telegram_id: i64) -> Result<()> {
        match self.interactor.get_wallet_address(telegram_id).await {
            Ok(Some(address)) => {
                self.view.display_receive_address(address).await?;
            }
            Ok(None) => {
                self.view.display_no_wallet().await?;
            }
            Err(e) => {
                self.view.display_error(e.to_string()).await?;
            }
        }

        Ok(())
    }
}
