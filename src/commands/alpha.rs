use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;
use crate::interactor::alpha_interactor::AlphaInteractorImpl;
use crate::presenter::alpha_presenter::{AlphaPresenter, AlphaPresenterImpl};
use crate::view::alpha_view::TelegramAlphaView;

pub fn alpha_presenter(
    bot: Bot,
    chat_id: ChatId,
    services: &ServiceContainer,
) -> AlphaPresenterImpl<AlphaInteractorImpl, TelegramAlphaView> {
    let interactor = Arc::new(AlphaInteractorImpl::new(
        services.db_pool(),
        services.zero_backend(),
    ));
    let view = Arc::new(TelegramAlphaView::new(bot, chat_id));
    AlphaPresenterImpl::new(interactor, view)
}

pub struct AlphaCommand;

impl CommandHandler for AlphaCommand {
    fn command_name() -> &'static str {
        "alpha"
    }

    fn description() -> &'static str {
        "open the ZeroAlpha points dashboard"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let chat_id = msg.chat.id;

        info!("Alpha command received from Telegram ID: {}", telegram_id);

        let presenter = alpha_presenter(bot, chat_id, &services);

        // Without a cached session the presenter prompts for an email and
        // the dialogue moves into the login flow.
        let has_session = presenter.open(telegram_id).await?;

        if !has_session {
            if let Some(dialogue) = dialogue {
                dialogue.update(State::AwaitingAlphaEmail).await?;
            }
        }

        Ok(())
    }
}

pub struct AccountsCommand;

impl CommandHandler for AccountsCommand {
    fn command_name() -> &'static str {
        "accounts"
    }

    fn description() -> &'static str {
        "show your virtual bank accounts"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let chat_id = msg.chat.id;

        info!("Accounts command received from Telegram ID: {}", telegram_id);

        let presenter = alpha_presenter(bot, chat_id, &services);

        if !presenter.show_accounts(telegram_id).await? {
            if let Some(dialogue) = dialogue {
                dialogue.update(State::AwaitingAlphaEmail).await?;
            }
        }

        Ok(())
    }
}

pub async fn receive_alpha_email(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let Some(email) = msg.text() else {
        bot.send_message(msg.chat.id, "Please enter your email address as text:")
            .await?;
        return Ok(());
    };

    let presenter = alpha_presenter(bot, msg.chat.id, &services);

    if presenter.request_otp(email.trim()).await? {
        dialogue
            .update(State::AwaitingAlphaOtp {
                email: email.trim().to_string(),
            })
            .await?;
    }

    Ok(())
}

pub async fn receive_alpha_otp(
    bot: Bot,
    msg: Message,
    state: State,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    if let State::AwaitingAlphaOtp { email } = state {
        let Some(otp) = msg.text() else {
            bot.send_message(msg.chat.id, "Please enter the 6-digit code as text:")
                .await?;
            return Ok(());
        };

        let telegram_id = msg.from().map_or(0, |user| user.id.0 as i64);
        let presenter = alpha_presenter(bot, msg.chat.id, &services);

        // A wrong code keeps the dialogue in the OTP step for a retry.
        if presenter.verify_otp(telegram_id, &email, otp).await? {
            dialogue.update(State::Start).await?;
        }
    }

    Ok(())
}

pub async fn receive_kyc_full_name(bot: Bot, msg: Message, dialogue: MyDialogue) -> Result<()> {
    let Some(full_name) = msg.text() else {
        bot.send_message(msg.chat.id, "Please enter your full legal name:")
            .await?;
        return Ok(());
    };

    dialogue
        .update(State::AwaitingKycPhone {
            full_name: full_name.trim().to_string(),
        })
        .await?;

    bot.send_message(msg.chat.id, "Enter your phone number (with country code):")
        .await?;

    Ok(())
}

pub async fn receive_kyc_phone(
    bot: Bot,
    msg: Message,
    state: State,
    dialogue: MyDialogue,
) -> Result<()> {
    if let State::AwaitingKycPhone { full_name } = state {
        let Some(phone) = msg.text() else {
            bot.send_message(msg.chat.id, "Please enter your phone number:")
                .await?;
            return Ok(());
        };

        dialogue
            .update(State::AwaitingKycDob {
                full_name,
                phone: phone.trim().to_string(),
            })
            .await?;

        bot.send_message(msg.chat.id, "Enter your date of birth (YYYY-MM-DD):")
            .await?;
    }

    Ok(())
}

pub async fn receive_kyc_dob(
    bot: Bot,
    msg: Message,
    state: State,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    if let State::AwaitingKycDob { full_name, phone } = state {
        let Some(dob) = msg.text() else {
            bot.send_message(msg.chat.id, "Please enter your date of birth:")
                .await?;
            return Ok(());
        };

        dialogue.update(State::Start).await?;

        let telegram_id = msg.from().map_or(0, |user| user.id.0 as i64);
        let presenter = alpha_presenter(bot, msg.chat.id, &services);

        presenter
            .submit_kyc(telegram_id, &full_name, &phone, dob.trim())
            .await?;
    }

    Ok(())
}
