use anyhow::Result;
use async_trait::async_trait;
use chrono;
use teloxide::{
    prelude::*,
    types::{Message, ParseMode},
    Bot,
};

use crate::commands::ui;
use crate::entity::TokenBalance;

#[async_trait]
pub trait BalanceView: Send + Sync {
    async fn display_loading(&self) -> Result<Option<Message>>;
    async fn display_loading_update(&self, message: Message) -> Result<Option<Message>>;
    async fn display_balances(
        &self,
        address: String,
        balances: Vec<TokenBalance>,
        total_usd: f64,
        message: Option<Message>,
    ) -> Result<()>;

    async fn display_no_wallet(&self, message: Option<Message>) -> Result<()>;
    async fn display_error(&self, error_message: String, message: Option<Message>) -> Result<()>;
}

pub struct TelegramBalanceView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramBalanceView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    fn format_token_rows(balances: &[TokenBalance]) -> String {
        // First row is SOL, rendered separately.
        let rows: Vec<String> = balances
            .iter()
            .skip(1)
            .filter(|token| token.balance > 0.0)
            .map(|token| {
                let usd = token.usd_value.unwrap_or(0.0);
                if usd > 0.0 {
                    format!(
                        "• <b>{}</b>: {:.6} (${:.2})",
                        token.symbol(),
                        token.balance,
                        usd
                    )
                } else {
                    format!("• <b>{}</b>: {:.6}", token.symbol(), token.balance)
                }
            })
            .collect();

        if rows.is_empty() {
            return String::new();
        }

        format!("\n\n<b>Token Balances</b>\n\n{}", rows.join("\n"))
    }

    fn format_total_portfolio_text(total_usd: f64) -> String {
        if total_usd > 0.0 {
            return format!("<b>Total Portfolio Value:</b> ${:.2}", total_usd);
        }

        String::new()
    }
}

#[async_trait]
impl BalanceView for TelegramBalanceView {
    async fn display_loading(&self) -> Result<Option<Message>> {
        let message = self
            .bot
            .send_message(self.chat_id, "Fetching balance and token information...")
            .await?;

        Ok(Some(message))
    }

    async fn display_loading_update(&self, message: Message) -> Result<Option<Message>> {
        let updated_msg = self
            .bot
            .edit_message_text(
                self.chat_id,
                message.id,
                "Refreshing balance information...",
            )
            .await?;

        Ok(Some(updated_msg))
    }

    async fn display_balances(
        &self,
        address: String,
        balances: Vec<TokenBalance>,
        total_usd: f64,
        message: Option<Message>,
    ) -> Result<()> {
        let sol = balances.first();
        let sol_balance = sol.map(|token| token.balance).unwrap_or(0.0);
        let sol_usd = sol.and_then(|token| token.usd_value).unwrap_or(0.0);

        let sol_text = format!(
            "<b>Solana</b>\n\
            <code>{}</code>\n\n\
            Balance: <b>{:.6}</b> SOL (${:.2})",
            address, sol_balance, sol_usd
        );

        let token_text = Self::format_token_rows(&balances);
        let portfolio_total = Self::format_total_portfolio_text(total_usd);

        let updated_text = format!("Updated: {} UTC", chrono::Utc::now().format("%H:%M:%S"));

        let text = format!(
            "{}{}\n\n{}\n\n{}",
            sol_text, token_text, portfolio_total, updated_text
        );

        let keyboard = ui::create_main_menu_keyboard();

        // Update existing message or send a new one
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
        let keyboard = ui::create_main_menu_keyboard();

        if let Some(msg) = message {
            self.bot
                .edit_message_text(self.chat_id, msg.id, text)
                .reply_markup(keyboard)
                .await?;
        } else {
            self.bot
                .send_message(self.chat_id, text)
                .reply_markup(keyboard)
                .await?;
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
