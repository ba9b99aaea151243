use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use crate::commands::{alpha, help, history, portfolio, send, settings, wallet, CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;
use crate::interactor::balance_interactor::BalanceInteractorImpl;
use crate::presenter::alpha_presenter::AlphaPresenter;
use crate::presenter::balance_presenter::{BalancePresenter, BalancePresenterImpl};
use crate::presenter::settings_presenter::SettingsPresenter;
use crate::view::balance_view::TelegramBalanceView;

// Main callback handler function
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let callback_data = match q.clone().data {
        Some(data) => data,
        None => return Ok(()),
    };

    let Some(message) = q.regular_message().cloned() else {
        return Ok(());
    };
    let chat_id = message.chat.id;
    let telegram_id = q.from.id.0 as i64;

    info!(
        "Received callback: {} from user {}",
        callback_data, telegram_id
    );

    // Acknowledge the callback query to stop loading animation
    if let Err(err) = bot.answer_callback_query(q.id.clone()).await {
        info!("Failed to answer callback query: {}", err);
    }

    if callback_data == "menu" || callback_data == "refresh" {
        handle_refresh(&bot, Some(message), telegram_id, services).await?;
    } else if callback_data == "create_wallet" {
        wallet::CreateWalletCommand::execute(bot, message, telegram_id, Some(dialogue), services)
            .await?;
    } else if callback_data == "receive" {
        wallet::ReceiveCommand::execute(bot, message, telegram_id, Some(dialogue), services)
            .await?;
    } else if callback_data == "send" {
        send::SendCommand::execute(bot, message, telegram_id, Some(dialogue), services).await?;
    } else if callback_data == "history" {
        history::HistoryCommand::execute(bot, message, telegram_id, Some(dialogue), services)
            .await?;
    } else if callback_data == "portfolio" {
        portfolio::PortfolioCommand::execute(bot, message, telegram_id, Some(dialogue), services)
            .await?;
    } else if callback_data == "alpha" {
        alpha::AlphaCommand::execute(bot, message, telegram_id, Some(dialogue), services).await?;
    } else if callback_data == "alpha_checkin" {
        let presenter = alpha::alpha_presenter(bot, chat_id, &services);
        if !presenter.check_in(telegram_id).await? {
            dialogue.update(State::AwaitingAlphaEmail).await?;
        }
    } else if callback_data == "alpha_leaderboard" {
        let presenter = alpha::alpha_presenter(bot, chat_id, &services);
        presenter.show_leaderboard(None).await?;
    } else if let Some(tier) = callback_data.strip_prefix("alpha_tier_") {
        let presenter = alpha::alpha_presenter(bot, chat_id, &services);
        let tier = if tier == "all" {
            None
        } else {
            Some(tier.to_string())
        };
        presenter.show_leaderboard(tier).await?;
    } else if callback_data == "alpha_accounts" {
        let presenter = alpha::alpha_presenter(bot, chat_id, &services);
        if !presenter.show_accounts(telegram_id).await? {
            dialogue.update(State::AwaitingAlphaEmail).await?;
        }
    } else if callback_data == "alpha_create_accounts" {
        let presenter = alpha::alpha_presenter(bot, chat_id, &services);
        if !presenter.create_accounts(telegram_id).await? {
            dialogue.update(State::AwaitingAlphaEmail).await?;
        }
    } else if callback_data == "alpha_kyc" {
        dialogue.update(State::AwaitingKycFullName).await?;
        bot.send_message(chat_id, "Enter your full legal name:").await?;
    } else if callback_data == "alpha_logout" {
        let presenter = alpha::alpha_presenter(bot, chat_id, &services);
        presenter.logout(telegram_id).await?;
    } else if callback_data == "settings" {
        let presenter = settings::settings_presenter(bot, chat_id, &services);
        presenter.show_settings(telegram_id).await?;
    } else if callback_data == "toggle_theme" {
        let presenter = settings::settings_presenter(bot, chat_id, &services);
        presenter.toggle_theme(telegram_id).await?;
    } else if callback_data == "export_key" {
        let presenter = settings::settings_presenter(bot, chat_id, &services);
        presenter.export_wallet(telegram_id).await?;
    } else if callback_data == "help" {
        help::HelpCommand::execute(bot, message, telegram_id, Some(dialogue), services).await?;
    } else {
        bot.send_message(
            chat_id,
            format!("The {} feature is under development.", callback_data),
        )
        .await?;
    }

    Ok(())
}

// Refresh the dashboard in place, editing the existing message
async fn handle_refresh(
    bot: &Bot,
    message: Option<Message>,
    telegram_id: i64,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    if let Some(msg) = message {
        let chat_id = msg.chat.id;

        let interactor = Arc::new(BalanceInteractorImpl::new(
            services.db_pool(),
            services.rpc_pool(),
            services.price_service(),
            services.token_repository(),
        ));
        let view = Arc::new(TelegramBalanceView::new(bot.clone(), chat_id));
        let presenter = BalancePresenterImpl::new(interactor, view);

        presenter.refresh_balances(telegram_id, Some(msg)).await?;
    }

    Ok(())
}
