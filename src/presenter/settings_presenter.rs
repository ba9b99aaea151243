use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::entity::BotError;
use crate::interactor::settings_interactor::SettingsInteractor;
use crate::view::settings_view::SettingsView;

#[async_trait]
pub trait SettingsPresenter: Send + Sync {
    async fn show_settings(&self, telegram_id: i64) -> Result<()>;
    async fn toggle_theme(&self, telegram_id: i64) -> Result<()>;
    async fn export_wallet(&self, telegram_id: i64) -> Result<()>;
}

pub struct SettingsPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> SettingsPresenterImpl<I, V>
where
    I: SettingsInteractor,
    V: SettingsView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I, V> SettingsPresenter for SettingsPresenterImpl<I, V>
where
    I: SettingsInteractor + Send + Sync,
    V: SettingsView + Send + Sync,
{
    async fn show_settings(&self, telegram_id: i64) -> Result<()> {
        match self.interactor.get_user_settings(telegram_id).await {
            Ok(user) => self.view.display_settings(user, None).await?,
            Err(e) => self.view.display_error(e.to_string()).await?,
        }

        Ok(())
    }

    async fn toggle_theme(&self, telegram_id: i64) -> Result<()> {
        match self.interactor.toggle_theme(telegram_id).await {
            Ok(theme) => {
                self.view.display_theme_updated(theme).await?;
                // Re-render the settings card with the new preference.
                self.show_settings(telegram_id).await?;
            }
            Err(e) => self.view.display_error(e.to_string()).await?,
        }

        Ok(())
    }

    async fn export_wallet(&self, telegram_id: i64) -> Result<()> {
        match self.interactor.export_wallet(telegram_id).await {
            Ok(export) => self.view.display_wallet_export(export).await?,
            Err(e) => match e.downcast_ref::<BotError>() {
                Some(BotError::WalletNotFound) => self.view.display_no_wallet().await?,
                _ => self.view.display_error(e.to_string()).await?,
            },
        }

        Ok(())
    }
}
