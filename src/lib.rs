pub mod commands;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod presenter;
pub mod qrcodeutils;
pub mod router;
pub mod services;
pub mod solana;
pub mod utils;
pub mod view;

use std::sync::Arc;

use sqlx::PgPool;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::Bot;

// Re-export commonly used items
pub use commands::MyDialogue;
pub use di::ServiceContainer;
pub use entity::State;
pub use router::{Router, TelegramRouter};
pub use solana::client::RpcPool;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wire up the application components: DI container, router and dialogue
/// storage.
pub fn create_application(
    bot: Bot,
    db_pool: Arc<PgPool>,
    rpc_pool: Arc<RpcPool>,
) -> (
    TelegramRouter,
    Bot,
    Arc<ServiceContainer>,
    Arc<InMemStorage<State>>,
) {
    let services = Arc::new(ServiceContainer::new(db_pool, rpc_pool));
    let router = TelegramRouter::new(services.clone());
    let storage = InMemStorage::<State>::new();

    (router, bot, services, storage)
}
