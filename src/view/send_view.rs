use anyhow::Result;
use async_trait::async_trait;
use teloxide::{prelude::*, types::Message, Bot};

use crate::interactor::send_interactor::TransferOutcome;
use crate::utils;

#[async_trait]
pub trait SendView: Send + Sync {
    async fn display_processing(&self) -> Result<Option<Message>>;
    async fn display_outcome(&self, outcome: TransferOutcome, message: Option<Message>)
        -> Result<()>;
}

pub struct TelegramSendView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramSendView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    async fn show(&self, text: String, message: Option<Message>) -> Result<()> {
        if let Some(msg) = message {
            self.bot
                .edit_message_text(self.chat_id, msg.id, text)
                .await?;
        } else {
            self.bot.send_message(self.chat_id, text).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl SendView for TelegramSendView {
    async fn display_processing(&self) -> Result<Option<Message>> {
        let message = self
            .bot
            .send_message(self.chat_id, "Sending funds... Please wait.")
            .await?;

        Ok(Some(message))
    }

    async fn display_outcome(
        &self,
        outcome: TransferOutcome,
        message: Option<Message>,
    ) -> Result<()> {
        let text = if outcome.success {
            format!(
                "✅ Sent {} {} to {}.\nTx Signature: {}",
                utils::format_amount(outcome.amount, &outcome.token),
                outcome.token,
                outcome.recipient,
                outcome.signature.as_deref().unwrap_or("unknown")
            )
        } else {
            format!(
                "❌ Error sending funds: {}",
                outcome
                    .error_message
                    .as_deref()
                    .unwrap_or("Unknown error")
            )
        };

        self.show(text, message).await
    }
}
