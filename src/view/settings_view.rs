use anyhow::Result;
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{Message, ParseMode},
    Bot,
};

use crate::commands::ui;
use crate::entity::User;
use crate::interactor::settings_interactor::WalletExport;

#[async_trait]
pub trait SettingsView: Send + Sync {
    async fn display_settings(&self, user: User, message: Option<Message>) -> Result<()>;
    async fn display_theme_updated(&self, theme: String) -> Result<()>;
    async fn display_wallet_export(&self, export: WalletExport) -> Result<()>;
    async fn display_no_wallet(&self) -> Result<()>;
    async fn display_error(&self, error_message: String) -> Result<()>;
}

pub struct TelegramSettingsView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramSettingsView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl SettingsView for TelegramSettingsView {
    async fn display_settings(&self, user: User, message: Option<Message>) -> Result<()> {
        let wallet = user
            .solana_address
            .as_deref()
            .map(|address| format!("<code>{}</code>", address))
            .unwrap_or_else(|| "no wallet yet".to_string());

        let alpha = user
            .alpha_email
            .as_deref()
            .unwrap_or("not signed in");

        let text = format!(
            "<b>Settings</b>\n\n\
            Identity: {}\n\
            Primary wallet: {}\n\
            ZeroAlpha: {}\n\
            Theme: <b>{}</b>",
            user.username.as_deref().unwrap_or("Anonymous"),
            wallet,
            alpha,
            user.theme
        );

        let keyboard = ui::create_settings_keyboard(&user.theme);

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

    async fn display_theme_updated(&self, theme: String) -> Result<()> {
        self.bot
            .send_message(self.chat_id, format!("Theme switched to {} mode.", theme))
            .await?;

        Ok(())
    }

    async fn display_wallet_export(&self, export: WalletExport) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                format!(
                    "<b>Wallet export</b>\n\n\
                    Address: <code>{}</code>\n\n\
                    Private key (base58): <code>{}</code>\n\n\
                    Mnemonic: <code>{}</code>\n\n\
                    <b>Never share these with anyone.</b> Delete this message once saved.",
                    export.address, export.keypair_base58, export.mnemonic
                ),
            )
            .parse_mode(ParseMode::Html)
            .await?;

        Ok(())
    }

    async fn display_no_wallet(&self) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                "You don't have a wallet yet. Use /create_wallet to create a new wallet.",
            )
            .await?;

        Ok(())
    }

    async fn display_error(&self, error_message: String) -> Result<()> {
        self.bot
            .send_message(self.chat_id, format!("Error: {}", error_message))
            .await?;

        Ok(())
    }
}
