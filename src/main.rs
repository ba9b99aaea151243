//! Zero Mobile wallet bot - Main executable
//!
//! Entry point for the Telegram bot that provides the Zero Mobile wallet
//! dashboard: balances with USD values, send/receive flows, transaction
//! history, the ZeroAlpha points sub-app, and settings.
use anyhow::Context;
use dotenv::dotenv;
use log::{error, info};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::sync::Arc;
use teloxide::{dptree, Bot};
use zero_wallet_bot::{Router, RpcPool};

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Starting Zero Mobile wallet bot v{}", zero_wallet_bot::VERSION);

    // Load and validate environment variables
    let bot_token = env::var("TELEGRAM_BOT_TOKEN")
        .context("TELEGRAM_BOT_TOKEN must be set in environment variables")?;

    let database_url =
        env::var("DATABASE_URL").context("DATABASE_URL must be set in environment variables")?;

    // Create Telegram bot instance
    let bot = Bot::new(bot_token);

    // Setup database connection pool
    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .context("Failed to create database connection pool")?;
    let db_pool = Arc::new(db_pool);

    // Create a separate connection for migrations
    let db_pool_for_migration = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .context("Failed to create migration connection pool")?;

    // Run database migrations
    info!("Running database migrations...");
    if let Err(e) = sqlx::migrate!("./migrations")
        .run(&db_pool_for_migration)
        .await
    {
        error!("Failed to run migrations: {}", e);
        return Err(anyhow::Error::from(e));
    }
    info!("Migrations completed successfully");

    // Close migration connection
    db_pool_for_migration.close().await;

    // Initialize the RPC endpoint pool (rotated round-robin on failure)
    info!("Connecting to Solana network...");
    let rpc_pool = Arc::new(RpcPool::from_env().context("Failed to create RPC pool")?);
    info!("Active RPC endpoint: {}", rpc_pool.active_url());

    // Initialize the application components
    info!("Initializing bot application...");
    let (router, bot, service_container, storage) =
        zero_wallet_bot::create_application(bot, db_pool, rpc_pool);

    // Get the handler from the router
    let handler = router.setup_handlers();

    // Build dispatcher with dependency injections and control-C handling
    let mut dispatcher = teloxide::dispatching::Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![service_container, storage])
        .enable_ctrlc_handler()
        .build();

    info!("Bot is running! Press Ctrl+C to stop.");
    dispatcher.dispatch().await;

    Ok(())
}
