use anyhow::Result;
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{Message, ParseMode},
    Bot,
};

use crate::commands::ui;
use crate::entity::{AlphaUser, LeaderboardEntry, VirtualAccount};

#[async_trait]
pub trait AlphaView: Send + Sync {
    async fn prompt_email(&self) -> Result<()>;
    async fn prompt_otp(&self, email: &str) -> Result<()>;
    async fn display_loading(&self) -> Result<Option<Message>>;
    async fn display_dashboard(&self, user: AlphaUser, message: Option<Message>) -> Result<()>;
    async fn display_check_in_result(&self, result: String) -> Result<()>;
    async fn display_leaderboard(
        &self,
        entries: Vec<LeaderboardEntry>,
        tier: Option<String>,
        message: Option<Message>,
    ) -> Result<()>;
    async fn display_accounts(
        &self,
        accounts: Vec<VirtualAccount>,
        is_customer: bool,
        message: Option<Message>,
    ) -> Result<()>;
    async fn display_logged_out(&self) -> Result<()>;
    async fn display_error(&self, error_message: String, message: Option<Message>) -> Result<()>;
}

pub struct TelegramAlphaView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramAlphaView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    async fn show(&self, text: String, message: Option<Message>) -> Result<()> {
        if let Some(msg) = message {
            self.bot
                .edit_message_text(self.chat_id, msg.id, text)
                .parse_mode(ParseMode::Html)
                .await?;
        } else {
            self.bot
                .send_message(self.chat_id, text)
                .parse_mode(ParseMode::Html)
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl AlphaView for TelegramAlphaView {
    async fn prompt_email(&self) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                "<b>ZeroAlpha</b>\n\nEnter your email to access your points dashboard:",
            )
            .parse_mode(ParseMode::Html)
            .await?;

        Ok(())
    }

    async fn prompt_otp(&self, email: &str) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                format!(
                    "We sent a 6-digit code to {}. Enter it here to sign in:",
                    email
                ),
            )
            .await?;

        Ok(())
    }

    async fn display_loading(&self) -> Result<Option<Message>> {
        let message = self
            .bot
            .send_message(self.chat_id, "Loading your ZeroAlpha dashboard...")
            .await?;

        Ok(Some(message))
    }

    async fn display_dashboard(&self, user: AlphaUser, message: Option<Message>) -> Result<()> {
        let check_in = user
            .last_daily_check_in
            .as_deref()
            .unwrap_or("never");

        let text = format!(
            "<b>ZeroAlpha</b> — {}\n\n\
            Points: <b>{:.0}</b>\n\
            Fair Score: <b>{:.1}</b>\n\
            Tier: <b>{}</b>\n\
            Multiplier: <b>{}x</b>\n\
            Trading Volume: <b>${:.2}</b>\n\
            Last check-in: {}",
            user.email,
            user.points,
            user.fair_score,
            if user.reputation_tier.is_empty() {
                "unranked"
            } else {
                &user.reputation_tier
            },
            user.multiplier,
            user.trading_volume,
            check_in
        );

        let keyboard = ui::create_alpha_menu_keyboard();

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

    async fn display_check_in_result(&self, result: String) -> Result<()> {
        self.bot.send_message(self.chat_id, result).await?;

        Ok(())
    }

    async fn display_leaderboard(
        &self,
        entries: Vec<LeaderboardEntry>,
        tier: Option<String>,
        message: Option<Message>,
    ) -> Result<()> {
        let title = match &tier {
            Some(tier) => format!("<b>Leaderboard</b> — {} tier", tier),
            None => "<b>Leaderboard</b>".to_string(),
        };

        let text = if entries.is_empty() {
            format!("{}\n\nNo entries yet.", title)
        } else {
            let rows: Vec<String> = entries
                .iter()
                .take(10)
                .map(|entry| {
                    format!(
                        "{}. {} — {:.0} pts ({})",
                        entry.rank,
                        entry.email,
                        entry.points,
                        if entry.reputation_tier.is_empty() {
                            "unranked"
                        } else {
                            &entry.reputation_tier
                        }
                    )
                })
                .collect();
            format!("{}\n\n{}", title, rows.join("\n"))
        };

        if let Some(msg) = message {
            self.bot
                .edit_message_text(self.chat_id, msg.id, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(ui::create_leaderboard_tier_keyboard())
                .await?;
        } else {
            self.bot
                .send_message(self.chat_id, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(ui::create_leaderboard_tier_keyboard())
                .await?;
        }

        Ok(())
    }

    async fn display_accounts(
        &self,
        accounts: Vec<VirtualAccount>,
        is_customer: bool,
        message: Option<Message>,
    ) -> Result<()> {
        let text = if accounts.is_empty() {
            if is_customer {
                "No virtual accounts yet. Use the button below to create them.".to_string()
            } else {
                "No banking profile found. Submit your KYC details to open virtual accounts."
                    .to_string()
            }
        } else {
            let rows: Vec<String> = accounts
                .iter()
                .map(|account| {
                    format!(
                        "<b>{}</b> — {}\n{} ({})\nBalance: {:.2}",
                        account.currency,
                        account.bank_name,
                        account.account_number,
                        account.account_name,
                        account.balance
                    )
                })
                .collect();
            format!("<b>Virtual Accounts</b>\n\n{}", rows.join("\n\n"))
        };

        let keyboard = ui::create_banking_keyboard(is_customer, !accounts.is_empty());

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

    async fn display_logged_out(&self) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                "Signed out of ZeroAlpha. Use /alpha to sign in again.",
            )
            .await?;

        Ok(())
    }

    async fn display_error(&self, error_message: String, message: Option<Message>) -> Result<()> {
        self.show(format!("Error: {}", error_message), message).await
    }
}
