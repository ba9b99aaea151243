use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::interactor::history_interactor::HistoryInteractorImpl;
use crate::presenter::history_presenter::{HistoryPresenter, HistoryPresenterImpl};
use crate::view::history_view::TelegramHistoryView;

pub struct HistoryCommand;

impl CommandHandler for HistoryCommand {
    fn command_name() -> &'static str {
        "history"
    }

    fn description() -> &'static str {
        "show recent transactions"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        _dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let chat_id = msg.chat.id;

        info!("History command received from Telegram ID: {}", telegram_id);

        let interactor = Arc::new(HistoryInteractorImpl::new(
            services.db_pool(),
            services.rpc_pool(),
            services.token_repository(),
        ));
        let view = Arc::new(TelegramHistoryView::new(bot, chat_id));
        let presenter = HistoryPresenterImpl::new(interactor, view);

        presenter.show_history(telegram_id).await?;

        Ok(())
    }
}
