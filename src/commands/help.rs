use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;

pub struct HelpCommand;

impl CommandHandler for HelpCommand {
    fn command_name() -> &'static str {
        "help"
    }

    fn description() -> &'static str {
        "display this help message"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        _telegram_id: i64,
        _dialogue: Option<MyDialogue>,
        _services: Arc<ServiceContainer>,
    ) -> Result<()> {
        bot.send_message(
            msg.chat.id,
            "Available commands:\n\
            /start - Start the bot and open the dashboard\n\
            /create_wallet - Create a new Solana wallet\n\
            /balance - Show balances and portfolio value\n\
            /send - Send funds to another address\n\
            /receive - Show your address and QR code\n\
            /history - Show recent transactions\n\
            /portfolio - Show your Jupiter portfolio\n\
            /alpha - Open the ZeroAlpha points dashboard\n\
            /accounts - Show your virtual bank accounts\n\
            /settings - Configure preferences\n\
            /help - Display this help message",
        )
        .await?;

        Ok(())
    }
}
