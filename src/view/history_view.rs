use anyhow::Result;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use teloxide::{
    prelude::*,
    types::{Message, ParseMode},
    Bot,
};

use crate::commands::ui;
use crate::entity::{ActivityKind, ActivityRecord, ActivityStatus};
use crate::utils;

#[async_trait]
pub trait HistoryView: Send + Sync {
    async fn display_loading(&self) -> Result<Option<Message>>;
    async fn display_activity(
        &self,
        records: Vec<ActivityRecord>,
        message: Option<Message>,
    ) -> Result<()>;
    async fn display_no_wallet(&self, message: Option<Message>) -> Result<()>;
    async fn display_error(&self, error_message: String, message: Option<Message>) -> Result<()>;
}

pub struct TelegramHistoryView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramHistoryView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    fn format_record(record: &ActivityRecord) -> String {
        let label = match record.kind {
            ActivityKind::Send => "↗️ Sent",
            ActivityKind::Receive => "↙️ Received",
            ActivityKind::Swap => "🔄 Swap",
            ActivityKind::Unknown => "• Activity",
        };

        let amount_text = match (record.amount, record.token_symbol.as_deref()) {
            (Some(amount), Some(symbol)) => format!(" {:.6} {}", amount, symbol),
            (Some(amount), None) => format!(" {:.6}", amount),
            _ => String::new(),
        };

        let status_text = match record.status {
            ActivityStatus::Success => "",
            ActivityStatus::Failed => " (failed)",
        };

        let when = Utc
            .timestamp_opt(record.timestamp, 0)
            .single()
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown time".to_string());

        format!(
            "{}{}{}\n<code>{}</code>\n{} UTC",
            label,
            amount_text,
            status_text,
            utils::shorten_address(&record.signature),
            when
        )
    }
}

#[async_trait]
impl HistoryView for TelegramHistoryView {
    async fn display_loading(&self) -> Result<Option<Message>> {
        let message = self
            .bot
            .send_message(self.chat_id, "Fetching recent transactions...")
            .await?;

        Ok(Some(message))
    }

    async fn display_activity(
        &self,
        records: Vec<ActivityRecord>,
        message: Option<Message>,
    ) -> Result<()> {
        let text = if records.is_empty() {
            "No transactions yet. Fund your wallet to get started.".to_string()
        } else {
            let rows: Vec<String> = records.iter().map(Self::format_record).collect();
            format!("<b>Recent Transactions</b>\n\n{}", rows.join("\n\n"))
        };

        let keyboard = ui::create_main_menu_keyboard();

        if let Some(msg) = message {
            self.bot
                .edit_message_text(self.chat_id, msg.id, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .await?;
        } else {
            self.bot
                .send_message(self.chat_id, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .await?;
        }

        Ok(())
    }

    async fn display_no_wallet(&self, message: Option<Message>) -> Result<()> {
        let text = "You don't have a wallet yet. Use /create_wallet to create a new wallet.";

        if let Some(msg) = message {
            self.bot
                .edit_message_text(self.chat_id, msg.id, text)
                .await?;
        } else {
            self.bot.send_message(self.chat_id, text).await?;
        }

        Ok(())
    }

    async fn display_error(&self, error_message: String, message: Option<Message>) -> Result<()> {
        let text = format!("Error: {}", error_message);

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
