use anyhow::Result;
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{Message, ParseMode},
    Bot,
};

use crate::solana::jupiter::{PortfolioPositions, StakedJup};

#[async_trait]
pub trait PortfolioView: Send + Sync {
    async fn display_loading(&self) -> Result<Option<Message>>;
    async fn display_portfolio(
        &self,
        positions: PortfolioPositions,
        staked: Option<StakedJup>,
        message: Option<Message>,
    ) -> Result<()>;
    /// Shown when the portfolio API answers 401: point the user at the
    /// hosted dashboard instead.
    async fn display_restricted(&self, address: String, message: Option<Message>) -> Result<()>;
    async fn display_no_wallet(&self, message: Option<Message>) -> Result<()>;
    async fn display_error(&self, error_message: String, message: Option<Message>) -> Result<()>;
}

pub struct TelegramPortfolioView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramPortfolioView {
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

    fn position_rows(title: &str, positions: &[crate::solana::jupiter::PortfolioPosition]) -> String {
        if positions.is_empty() {
            return String::new();
        }

        let rows: Vec<String> = positions
            .iter()
            .map(|position| {
                format!(
                    "• {} — ${:.2}",
                    position
                        .name
                        .as_deref()
                        .or(position.symbol.as_deref())
                        .unwrap_or("Jupiter Position"),
                    position.display_value()
                )
            })
            .collect();

        format!("\n\n<b>{}</b>\n{}", title, rows.join("\n"))
    }
}

#[async_trait]
impl PortfolioView for TelegramPortfolioView {
    async fn display_loading(&self) -> Result<Option<Message>> {
        let message = self
            .bot
            .send_message(self.chat_id, "Fetching Jupiter portfolio...")
            .await?;

        Ok(Some(message))
    }

    async fn display_portfolio(
        &self,
        positions: PortfolioPositions,
        staked: Option<StakedJup>,
        message: Option<Message>,
    ) -> Result<()> {
        let mut text = format!(
            "<b>Jupiter Portfolio</b>\n\nTotal Position Value: <b>${:.2}</b>",
            positions.total_value_usd.unwrap_or(0.0)
        );

        if let Some(staked) = &staked {
            text.push_str(&format!(
                "\nStaked JUP: <b>{:.2}</b> (unstaking {:.2} across {} requests)",
                staked.staked_amount.unwrap_or(0.0),
                staked.unstaking_total(),
                staked.unstaking.len()
            ));
        }

        if positions.is_empty() {
            text.push_str(
                "\n\nNo active positions found. Spot, Perps, DCA and Limit Orders will appear here.",
            );
        } else {
            text.push_str(&Self::position_rows("Spot", &positions.positions));
            text.push_str(&Self::position_rows("Perps", &positions.perp_positions));
            text.push_str(&Self::position_rows("Limit Orders", &positions.limit_orders));
            text.push_str(&Self::position_rows("DCA", &positions.dca));
        }

        self.show(text, message).await
    }

    async fn display_restricted(&self, address: String, message: Option<Message>) -> Result<()> {
        let text = format!(
            "<b>Jupiter API Restricted</b>\n\n\
            Jupiter's Portfolio API now requires an authorized API key. You can still view \
            and manage your positions on the official site:\n\
            https://jup.ag/stats/{}\n\
            https://vote.jup.ag",
            address
        );

        self.show(text, message).await
    }

    async fn display_no_wallet(&self, message: Option<Message>) -> Result<()> {
        self.show(
            "You don't have a wallet yet. Use /create_wallet to create a new wallet.".to_string(),
            message,
        )
        .await
    }

    async fn display_error(&self, error_message: String, message: Option<Message>) -> Result<()> {
        self.show(format!("Error: {}", error_message), message).await
    }
}
