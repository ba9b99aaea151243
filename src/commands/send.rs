use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;
use crate::interactor::send_interactor::{SendInteractor, SendInteractorImpl};
use crate::presenter::send_presenter::{SendPresenter, SendPresenterImpl};
use crate::view::send_view::TelegramSendView;

fn send_interactor(services: &ServiceContainer) -> Arc<SendInteractorImpl> {
    Arc::new(SendInteractorImpl::new(
        services.db_pool(),
        services.rpc_pool(),
        services.token_repository(),
    ))
}

pub struct SendCommand;

impl CommandHandler for SendCommand {
    fn command_name() -> &'static str {
        "send"
    }

    fn description() -> &'static str {
        "send funds to another address"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        _telegram_id: i64,
        dialogue: Option<MyDialogue>,
        _services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let dialogue = dialogue.ok_or_else(|| anyhow::anyhow!("Dialogue context not provided"))?;
        info!("Send command initiated");

        dialogue.update(State::AwaitingRecipientAddress).await?;
        bot.send_message(msg.chat.id, "Enter the recipient's Solana address:")
            .await?;

        Ok(())
    }
}

pub async fn receive_recipient_address(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    if let Some(address_text) = msg.text() {
        let interactor = send_interactor(&services);

        // Validate the address format
        if interactor.validate_address(address_text).await? {
            dialogue
                .update(State::AwaitingAmount {
                    recipient: address_text.to_string(),
                })
                .await?;

            bot.send_message(
                msg.chat.id,
                "Enter the amount to send (example: 0.5 SOL or 100 USDC):",
            )
            .await?;
        } else {
            bot.send_message(
                msg.chat.id,
                "Invalid Solana address. Please check the address and try again:",
            )
            .await?;
        }
    } else {
        bot.send_message(msg.chat.id, "Please enter the recipient's address as text:")
            .await?;
    }

    Ok(())
}

pub async fn receive_amount(
    bot: Bot,
    msg: Message,
    state: State,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    if let State::AwaitingAmount { recipient } = state {
        if let Some(amount_text) = msg.text() {
            let interactor = send_interactor(&services);

            match interactor.parse_amount_and_token(amount_text).await {
                Ok((amount, token)) => {
                    dialogue
                        .update(State::AwaitingConfirmation {
                            recipient: recipient.clone(),
                            amount,
                            token: token.clone(),
                        })
                        .await?;

                    bot.send_message(
                        msg.chat.id,
                        format!(
                            "Confirm sending {} {} to address {} (yes/no):",
                            amount, token, recipient
                        ),
                    )
                    .await?;
                }
                Err(e) => {
                    bot.send_message(msg.chat.id, e.to_string()).await?;
                }
            }
        } else {
            bot.send_message(msg.chat.id, "Please enter the amount to send:")
                .await?;
        }
    }

    Ok(())
}

pub async fn receive_confirmation(
    bot: Bot,
    msg: Message,
    state: State,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    if let State::AwaitingConfirmation {
        recipient,
        amount,
        token,
    } = state
    {
        if let Some(text) = msg.text() {
            let confirmation = text.to_lowercase();

            // Reset dialogue state either way
            dialogue.update(State::Start).await?;

            if confirmation == "yes" {
                let telegram_id = msg.from().map_or(0, |user| user.id.0 as i64);

                let interactor = send_interactor(&services);
                let view = Arc::new(TelegramSendView::new(bot, msg.chat.id));
                let presenter = SendPresenterImpl::new(interactor, view);

                presenter
                    .send_transfer(telegram_id, &recipient, amount, &token)
                    .await?;
            } else {
                bot.send_message(msg.chat.id, "Transaction cancelled.")
                    .await?;
            }
        }
    }

    Ok(())
}
