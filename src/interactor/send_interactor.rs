use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::error;
use sqlx::PgPool;
use std::sync::Arc;

use crate::interactor::db;
use crate::solana::client::RpcPool;
use crate::solana::jupiter::TokenRepository;
use crate::solana::tokens::constants::{ESTIMATED_SOL_FEE, SOL_MINT};
use crate::solana::utils::{lamports_to_sol, sol_to_lamports};
use crate::solana::{self, TransferParams};
use crate::utils;

pub struct TransferOutcome {
    pub recipient: String,
    pub amount: f64,
    pub token: String,
    pub signature: Option<String>,
    pub success: bool,
    pub error_message: Option<String>,
}

impl TransferOutcome {
    fn failure(recipient: &str, amount: f64, token: &str, message: impl Into<String>) -> Self {
        Self {
            recipient: recipient.to_string(),
            amount,
            token: token.to_string(),
            signature: None,
            success: false,
            error_message: Some(message.into()),
        }
    }
}

#[async_trait]
pub trait SendInteractor: Send + Sync {
    async fn validate_address(&self, address: &str) -> Result<bool>;
    async fn parse_amount_and_token(&self, amount_text: &str) -> Result<(f64, String)>;
    async fn send_transfer(
        &self,
        telegram_id: i64,
        recipient: &str,
        amount: f64,
        token: &str,
    ) -> Result<TransferOutcome>;
}

pub struct SendInteractorImpl {
    db_pool: Arc<PgPool>,
    rpc_pool: Arc<RpcPool>,
    token_repository: Arc<dyn TokenRepository + Send + Sync>,
}

impl SendInteractorImpl {
    pub fn new(
        db_pool: Arc<PgPool>,
        rpc_pool: Arc<RpcPool>,
        token_repository: Arc<dyn TokenRepository + Send + Sync>,
    ) -> Self {
        Self {
            db_pool,
            rpc_pool,
            token_repository,
        }
    }

    /// Map a user-entered symbol to (mint, decimals).
    async fn resolve_token(&self, token: &str) -> Option<(String, u8)> {
        if token.to_uppercase() == "SOL" {
            return Some((SOL_MINT.to_string(), 9));
        }

        self.token_repository
            .resolve_symbol(token)
            .await
            .map(|token| (token.address, token.decimals))
    }

    /// Balance check before any transaction is built.
    async fn has_sufficient_balance(
        &self,
        address: &str,
        mint: &str,
        amount: f64,
    ) -> Result<bool> {
        if mint == SOL_MINT {
            let balance = solana::get_sol_balance(&self.rpc_pool, address).await?;
            let required = sol_to_lamports(amount) + ESTIMATED_SOL_FEE;
            Ok(sol_to_lamports(balance) >= required)
        } else {
            let balance = solana::get_spl_token_balance(&self.rpc_pool, address, mint).await?;
            Ok(balance >= amount)
        }
    }
}

#[async_trait]
impl SendInteractor for SendInteractorImpl {
    async fn validate_address(&self, address: &str) -> Result<bool> {
        Ok(utils::validate_solana_address(address))
    }

    async fn parse_amount_and_token(&self, amount_text: &str) -> Result<(f64, String)> {
        match utils::parse_amount_and_token(amount_text) {
            Some((amount, token)) => Ok((amount, token.to_string())),
            None => Err(anyhow!(
                "Invalid amount format. Please enter in the format '0.5 SOL' or '100 USDC'"
            )),
        }
    }

    async fn send_transfer(
        &self,
        telegram_id: i64,
        recipient: &str,
        amount: f64,
        token: &str,
    ) -> Result<TransferOutcome> {
        // Get user wallet info
        let user = db::get_user_by_telegram_id(&self.db_pool, telegram_id).await?;

        let (sender_address, keypair_base58) =
            match (user.solana_address, user.encrypted_private_key) {
                (Some(address), Some(keypair)) => (address, keypair),
                _ => {
                    return Ok(TransferOutcome::failure(
                        recipient,
                        amount,
                        token,
                        "Wallet not found. Use /create_wallet to create a new wallet.",
                    ));
                }
            };

        let keypair = match solana::keypair_from_base58(&keypair_base58) {
            Ok(keypair) => keypair,
            Err(e) => {
                return Ok(TransferOutcome::failure(
                    recipient,
                    amount,
                    token,
                    format!("Error with private key: {}", e),
                ));
            }
        };

        let Some((mint, decimals)) = self.resolve_token(token).await else {
            return Ok(TransferOutcome::failure(
                recipient,
                amount,
                token,
                format!("Unknown token symbol: {}", token),
            ));
        };

        match self
            .has_sufficient_balance(&sender_address, &mint, amount)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                let message = if mint == SOL_MINT {
                    format!(
                        "Insufficient funds: sending {} SOL needs about {} SOL of fees on top",
                        amount,
                        lamports_to_sol(ESTIMATED_SOL_FEE)
                    )
                } else {
                    "Insufficient funds".to_string()
                };
                return Ok(TransferOutcome::failure(recipient, amount, token, message));
            }
            Err(e) => {
                return Ok(TransferOutcome::failure(recipient, amount, token, e.to_string()));
            }
        }

        // Build the unsigned transaction, then sign and submit it. The
        // builder reports failures as a value rather than an error.
        let built = solana::build_send_transaction(
            &self.rpc_pool,
            &TransferParams {
                from_wallet_address: sender_address.clone(),
                recipient_address: recipient.to_string(),
                token_mint: mint,
                amount,
                decimals,
            },
        )
        .await;

        let result = if built.success {
            solana::sign_and_submit(&self.rpc_pool, &keypair, &built.transaction).await
        } else {
            Err(anyhow!(built
                .error
                .unwrap_or_else(|| "Failed to build transaction".to_string())))
        };

        match result {
            Ok(signature) => {
                // Record transaction to database
                let _ = db::record_transfer(
                    &self.db_pool,
                    telegram_id,
                    recipient,
                    amount,
                    token,
                    &Some(signature.clone()),
                    "SUCCESS",
                )
                .await;

                Ok(TransferOutcome {
                    recipient: recipient.to_string(),
                    amount,
                    token: token.to_string(),
                    signature: Some(signature),
                    success: true,
                    error_message: None,
                })
            }
            Err(e) => {
                error!("Failed to send transfer: {}", e);

                // Record failed transaction
                let _ = db::record_transfer(
                    &self.db_pool,
                    telegram_id,
                    recipient,
                    amount,
                    token,
                    &None::<String>,
                    "FAILED",
                )
                .await;

                Ok(TransferOutcome::failure(recipient, amount, token, e.to_string()))
            }
        }
    }
}
