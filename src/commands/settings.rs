use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::interactor::settings_interactor::SettingsInteractorImpl;
use crate::presenter::settings_presenter::{SettingsPresenter, SettingsPresenterImpl};
use crate::view::settings_view::TelegramSettingsView;

pub fn settings_presenter(
    bot: Bot,
    chat_id: ChatId,
    services: &ServiceContainer,
) -> SettingsPresenterImpl<SettingsInteractorImpl, TelegramSettingsView> {
    let interactor = Arc::new(SettingsInteractorImpl::new(services.db_pool()));
    let view = Arc::new(TelegramSettingsView::new(bot, chat_id));
    SettingsPresenterImpl::new(interactor, view)
}

pub struct SettingsCommand;

impl CommandHandler for SettingsCommand {
    fn command_name() -> &'static str {
        "settings"
    }

    fn description() -> &'static str {
        "configure preferences"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        _dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let chat_id = msg.chat.id;

        info!(
            "Settings command received from Telegram ID: {}",
            telegram_id
        );

        let presenter = settings_presenter(bot, chat_id, &services);

        presenter.show_settings(telegram_id).await?;

        Ok(())
    }
}
