use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::entity::{BotError, Token, TokenBalance};
use crate::interactor::db;
use crate::solana;
use crate::solana::client::RpcPool;
use crate::solana::jupiter::{PriceService, TokenRepository};
use crate::solana::tokens::constants::SOL_MINT;
use crate::solana::utils::sol_to_lamports;

#[async_trait]
pub trait BalanceInteractor: Send + Sync {
    /// Wallet address, one row per held token (SOL first), and the total
    /// portfolio value in USD.
    async fn get_wallet_balances(
        &self,
        telegram_id: i64,
    ) -> Result<(String, Vec<TokenBalance>, f64)>;
}

pub struct BalanceInteractorImpl {
    db_pool: Arc<PgPool>,
    rpc_pool: Arc<RpcPool>,
    price_service: Arc<dyn PriceService + Send + Sync>,
    token_repository: Arc<dyn TokenRepository + Send + Sync>,
}

impl BalanceInteractorImpl {
    pub fn new(
        db_pool: Arc<PgPool>,
        rpc_pool: Arc<RpcPool>,
        price_service: Arc<dyn PriceService + Send + Sync>,
        token_repository: Arc<dyn TokenRepository + Send + Sync>,
    ) -> Self {
        Self {
            db_pool,
            rpc_pool,
            price_service,
            token_repository,
        }
    }

    fn sol_metadata() -> Token {
        Token {
            address: SOL_MINT.to_string(),
            name: "Solana".to_string(),
            symbol: "SOL".to_string(),
            decimals: 9,
            logo_uri: Some(
                "https://raw.githubusercontent.com/solana-labs/token-list/main/assets/mainnet/So11111111111111111111111111111111111111112/logo.png"
                    .to_string(),
            ),
            tags: None,
        }
    }
}

#[async_trait]
impl BalanceInteractor for BalanceInteractorImpl {
    async fn get_wallet_balances(
        &self,
        telegram_id: i64,
    ) -> Result<(String, Vec<TokenBalance>, f64)> {
        let user = db::get_user_by_telegram_id(&self.db_pool, telegram_id).await?;

        let address = user.solana_address.ok_or(BotError::WalletNotFound)?;

        let sol_balance = solana::get_sol_balance(&self.rpc_pool, &address).await?;
        let mut token_rows = solana::get_token_balances(&self.rpc_pool, &address).await?;

        let metadata = self.token_repository.token_map().await;

        let mut mints: Vec<String> = Vec::with_capacity(token_rows.len() + 1);
        mints.push(SOL_MINT.to_string());
        mints.extend(token_rows.iter().map(|row| row.mint.clone()));

        let prices = self.price_service.get_usd_prices(&mints).await?;
        let price_of = |mint: &str| prices.get(mint).copied().unwrap_or(0.0);

        let sol_price = price_of(SOL_MINT);
        let mut balances = Vec::with_capacity(token_rows.len() + 1);
        balances.push(TokenBalance {
            mint: SOL_MINT.to_string(),
            balance: sol_balance,
            decimals: 9,
            amount: sol_to_lamports(sol_balance).to_string(),
            metadata: Some(
                metadata
                    .get(SOL_MINT)
                    .cloned()
                    .unwrap_or_else(Self::sol_metadata),
            ),
            price_usd: Some(sol_price),
            usd_value: Some(sol_balance * sol_price),
        });

        for row in token_rows.drain(..) {
            let price = price_of(&row.mint);
            let token = metadata
                .get(&row.mint)
                .cloned()
                .unwrap_or_else(|| Token::unknown(&row.mint, row.decimals));

            balances.push(TokenBalance {
                usd_value: Some(row.balance * price),
                price_usd: Some(price),
                metadata: Some(token),
                ..row
            });
        }

        let total_usd: f64 = balances
            .iter()
            .map(|balance| balance.usd_value.unwrap_or(0.0))
            .sum();

        Ok((address, balances, total_usd))
    }
}
