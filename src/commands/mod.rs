use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};
use teloxide::prelude::*;

use crate::di::ServiceContainer;
use crate::entity::State;

pub mod alpha;
pub mod balance;
pub mod callback;
pub mod help;
pub mod history;
pub mod menu;
pub mod portfolio;
pub mod send;
pub mod settings;
pub mod start;
pub mod ui;
pub mod wallet;

pub type MyDialogue = Dialogue<State, InMemStorage<State>>;

/// Trait that defines a command handler
pub trait CommandHandler {
    /// The command name in lowercase
    fn command_name() -> &'static str;

    /// The command description for help
    fn description() -> &'static str;

    /// Execute the command
    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()>;
}

/// Bot Commands enum for teloxide command filter
#[derive(teloxide::utils::command::BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum BotCommands {
    #[command(description = "start the bot and open the dashboard")]
    Start,
    #[command(rename = "create_wallet", description = "create a new Solana wallet")]
    CreateWallet,
    #[command(description = "show balances and portfolio value")]
    Balance,
    #[command(description = "send funds to another address")]
    Send,
    #[command(description = "show your address and QR code")]
    Receive,
    #[command(description = "show recent transactions")]
    History,
    #[command(description = "show your Jupiter portfolio")]
    Portfolio,
    #[command(description = "open the ZeroAlpha points dashboard")]
    Alpha,
    #[command(description = "show your virtual bank accounts")]
    Accounts,
    #[command(description = "configure preferences")]
    Settings,
    #[command(description = "display this help message")]
    Help,
    #[command(description = "show the main menu")]
    Menu,
}
