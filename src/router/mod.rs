use async_trait::async_trait;
use std::sync::Arc;
use teloxide::{
    dispatching::dialogue::InMemStorage, dispatching::UpdateHandler, prelude::*,
};

use crate::commands::{self, callback::handle_callback, BotCommands, CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;

// Base router trait
#[async_trait]
pub trait Router: Send + Sync {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error>;
}

// Command router implementation
pub struct TelegramRouter {
    services: Arc<ServiceContainer>,
}

impl TelegramRouter {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self { services }
    }
}

fn sender_id(msg: &Message) -> i64 {
    msg.from().map_or(0, |user| user.id.0 as i64)
}

macro_rules! command_branch {
    ($services:expr, $($variant:ident)::+, $handler:ty) => {{
        use dptree::case;
        let services = $services.clone();
        case![$($variant)::+].endpoint(move |bot: Bot, msg: Message, dialogue: MyDialogue| {
            let services = services.clone();
            let telegram_id = sender_id(&msg);
            async move {
                <$handler>::execute(bot, msg, telegram_id, Some(dialogue), services).await
            }
        })
    }};
}

#[async_trait]
impl Router for TelegramRouter {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error> {
        use dptree::case;
        use teloxide::dispatching::UpdateFilterExt;

        let services = &self.services;

        // Use BotCommands enum with teloxide's command filter
        let command_handler = teloxide::filter_command::<BotCommands, _>()
            .branch(command_branch!(
                services,
                BotCommands::Start,
                commands::start::StartCommand
            ))
            .branch(command_branch!(
                services,
                BotCommands::CreateWallet,
                commands::wallet::CreateWalletCommand
            ))
            .branch(command_branch!(
                services,
                BotCommands::Balance,
                commands::balance::BalanceCommand
            ))
            .branch(command_branch!(
                services,
                BotCommands::Send,
                commands::send::SendCommand
            ))
            .branch(command_branch!(
                services,
                BotCommands::Receive,
                commands::wallet::ReceiveCommand
            ))
            .branch(command_branch!(
                services,
                BotCommands::History,
                commands::history::HistoryCommand
            ))
            .branch(command_branch!(
                services,
                BotCommands::Portfolio,
                commands::portfolio::PortfolioCommand
            ))
            .branch(command_branch!(
                services,
                BotCommands::Alpha,
                commands::alpha::AlphaCommand
            ))
            .branch(command_branch!(
                services,
                BotCommands::Accounts,
                commands::alpha::AccountsCommand
            ))
            .branch(command_branch!(
                services,
                BotCommands::Settings,
                commands::settings::SettingsCommand
            ))
            .branch(command_branch!(
                services,
                BotCommands::Help,
                commands::help::HelpCommand
            ))
            .branch(command_branch!(
                services,
                BotCommands::Menu,
                commands::menu::MenuCommand
            ));

        let services_send1 = self.services.clone();
        let services_send2 = self.services.clone();
        let services_send3 = self.services.clone();
        let services_alpha1 = self.services.clone();
        let services_alpha2 = self.services.clone();
        let services_kyc = self.services.clone();

        let message_handler = Update::filter_message().branch(command_handler).branch(
            dptree::entry()
                .branch(case![State::AwaitingRecipientAddress].endpoint(
                    move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                        let services = services_send1.clone();
                        async move {
                            commands::send::receive_recipient_address(bot, msg, dialogue, services)
                                .await
                        }
                    },
                ))
                .branch(case![State::AwaitingAmount { recipient }].endpoint(
                    move |bot: Bot, msg: Message, state: State, dialogue: MyDialogue| {
                        let services = services_send2.clone();
                        async move {
                            commands::send::receive_amount(bot, msg, state, dialogue, services)
                                .await
                        }
                    },
                ))
                .branch(
                    case![State::AwaitingConfirmation {
                        recipient,
                        amount,
                        token
                    }]
                    .endpoint(
                        move |bot: Bot, msg: Message, state: State, dialogue: MyDialogue| {
                            let services = services_send3.clone();
                            async move {
                                commands::send::receive_confirmation(
                                    bot, msg, state, dialogue, services,
                                )
                                .await
                            }
                        },
                    ),
                )
                .branch(case![State::AwaitingAlphaEmail].endpoint(
                    move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                        let services = services_alpha1.clone();
                        async move {
                            commands::alpha::receive_alpha_email(bot, msg, dialogue, services)
                                .await
                        }
                    },
                ))
                .branch(case![State::AwaitingAlphaOtp { email }].endpoint(
                    move |bot: Bot, msg: Message, state: State, dialogue: MyDialogue| {
                        let services = services_alpha2.clone();
                        async move {
                            commands::alpha::receive_alpha_otp(bot, msg, state, dialogue, services)
                                .await
                        }
                    },
                ))
                .branch(case![State::AwaitingKycFullName].endpoint(
                    move |bot: Bot, msg: Message, dialogue: MyDialogue| async move {
                        commands::alpha::receive_kyc_full_name(bot, msg, dialogue).await
                    },
                ))
                .branch(case![State::AwaitingKycPhone { full_name }].endpoint(
                    move |bot: Bot, msg: Message, state: State, dialogue: MyDialogue| async move {
                        commands::alpha::receive_kyc_phone(bot, msg, state, dialogue).await
                    },
                ))
                .branch(
                    case![State::AwaitingKycDob { full_name, phone }].endpoint(
                        move |bot: Bot, msg: Message, state: State, dialogue: MyDialogue| {
                            let services = services_kyc.clone();
                            async move {
                                commands::alpha::receive_kyc_dob(
                                    bot, msg, state, dialogue, services,
                                )
                                .await
                            }
                        },
                    ),
                ),
        );

        // Callback query handler for the inline keyboards
        let services_for_callbacks = self.services.clone();
        let callback_handler = Update::filter_callback_query().endpoint(
            move |bot: Bot, q: CallbackQuery, dialogue: MyDialogue| {
                let services = services_for_callbacks.clone();
                async move { handle_callback(bot, q, dialogue, services).await }
            },
        );

        teloxide::dispatching::dialogue::enter::<Update, InMemStorage<State>, State, _>()
            .branch(message_handler)
            .branch(callback_handler)
    }
}
