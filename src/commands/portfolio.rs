use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::interactor::portfolio_interactor::PortfolioInteractorImpl;
use crate::presenter::portfolio_presenter::{PortfolioPresenter, PortfolioPresenterImpl};
use crate::view::portfolio_view::TelegramPortfolioView;

pub struct PortfolioCommand;

impl CommandHandler for PortfolioCommand {
    fn command_name() -> &'static str {
        "portfolio"
    }

    fn description() -> &'static str {
        "show your Jupiter portfolio"
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
            "Portfolio command received from Telegram ID: {}",
            telegram_id
        );

        let interactor = Arc::new(PortfolioInteractorImpl::new(
            services.db_pool(),
            services.portfolio_service(),
        ));
        let view = Arc::new(TelegramPortfolioView::new(bot, chat_id));
        let presenter = PortfolioPresenterImpl::new(interactor, view, services.db_pool());

        presenter.show_portfolio(telegram_id).await?;

        Ok(())
    }
}
