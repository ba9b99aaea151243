use chrono::Utc;
use log::info;
use sqlx::{postgres::PgQueryResult, Error as SqlxError, PgPool, Row};

use crate::entity::User;

// Check if user exists in database
pub async fn check_user_exists(pool: &PgPool, telegram_id: i64) -> Result<bool, SqlxError> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM users WHERE telegram_id = $1")
        .bind(telegram_id)
        .fetch_one(pool)
        .await?;

    let count: i64 = row.try_get("count")?;
    Ok(count > 0)
}

// Create new user in database
pub async fn create_user(
    pool: &PgPool,
    telegram_id: i64,
    username: Option<String>,
) -> Result<i32, SqlxError> {
    let row = sqlx::query(
        "INSERT INTO users (telegram_id, username, created_at) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(telegram_id)
    .bind(username)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    let id: i32 = row.try_get("id")?;
    info!("Created new user with ID: {}", id);

    Ok(id)
}

// Get user by telegram_id
pub async fn get_user_by_telegram_id(pool: &PgPool, telegram_id: i64) -> Result<User, SqlxError> {
    let row = sqlx::query("SELECT * FROM users WHERE telegram_id = $1")
        .bind(telegram_id)
        .fetch_one(pool)
        .await?;

    let user = User {
        id: row.try_get("id")?,
        telegram_id: row.try_get("telegram_id")?,
        username: row.try_get("username")?,
        solana_address: row.try_get("solana_address")?,
        encrypted_private_key: row.try_get("encrypted_private_key")?,
        mnemonic: row.try_get("mnemonic")?,
        theme: row.try_get("theme")?,
        alpha_email: row.try_get("alpha_email")?,
        created_at: row.try_get("created_at")?,
    };

    Ok(user)
}

// Save wallet information for a user
pub async fn save_wallet_info(
    pool: &PgPool,
    telegram_id: i64,
    address: &str,
    keypair: &str,
    mnemonic: &str,
) -> Result<PgQueryResult, SqlxError> {
    let result = sqlx::query("UPDATE users SET solana_address = $1, encrypted_private_key = $2, mnemonic = $3 WHERE telegram_id = $4")
        .bind(address)
        .bind(keypair)
        .bind(mnemonic)
        .bind(telegram_id)
        .execute(pool)
        .await?;

    info!(
        "Updated wallet info for user with Telegram ID: {}",
        telegram_id
    );

    Ok(result)
}

// Persist the theme preference (light/dark)
pub async fn update_theme(
    pool: &PgPool,
    telegram_id: i64,
    theme: &str,
) -> Result<PgQueryResult, SqlxError> {
    sqlx::query("UPDATE users SET theme = $1 WHERE telegram_id = $2")
        .bind(theme)
        .bind(telegram_id)
        .execute(pool)
        .await
}

// Cache (or clear) the verified ZeroAlpha login email
pub async fn set_alpha_email(
    pool: &PgPool,
    telegram_id: i64,
    email: Option<&str>,
) -> Result<PgQueryResult, SqlxError> {
    sqlx::query("UPDATE users SET alpha_email = $1 WHERE telegram_id = $2")
        .bind(email)
        .bind(telegram_id)
        .execute(pool)
        .await
}

// Record an outgoing transfer in the database
pub async fn record_transfer(
    pool: &PgPool,
    telegram_id: i64,
    recipient_address: &str,
    amount: f64,
    token_symbol: &str,
    tx_signature: &Option<String>,
    status: &str,
) -> Result<i32, SqlxError> {
    // Get user ID from telegram_id
    let user = get_user_by_telegram_id(pool, telegram_id).await?;

    let row = sqlx::query("INSERT INTO transfers (user_id, recipient_address, amount, token_symbol, tx_signature, timestamp, status) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id")
        .bind(user.id)
        .bind(recipient_address)
        .bind(amount)
        .bind(token_symbol)
        .bind(tx_signature.as_deref())
        .bind(Utc::now())
        .bind(status)
        .fetch_one(pool)
        .await?;

    let id: i32 = row.try_get("id")?;
    info!("Recorded transfer with ID: {}", id);

    Ok(id)
}
