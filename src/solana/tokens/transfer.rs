use anyhow::{anyhow, Result};
use solana_sdk::{
    pubkey::Pubkey, system_instruction, transaction::Transaction as SolanaTransaction,
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account_idempotent,
};
use spl_token::{instruction as token_instruction, ID as TOKEN_PROGRAM_ID};

use crate::solana::client::RpcPool;
use crate::solana::tokens::constants::SOL_MINT;
use crate::solana::utils::{sol_to_lamports, to_base_units};
use crate::solana::wallet::parse_pubkey;

/// Parameters of an outgoing transfer, as collected by the send screen.
#[derive(Debug, Clone)]
pub struct TransferParams {
    pub from_wallet_address: String,
    pub recipient_address: String,
    pub token_mint: String,
    pub amount: f64,
    pub decimals: u8,
}

/// Outcome of building a transfer: the serialized unsigned transaction on
/// success, or an error string. Signing happens elsewhere.
#[derive(Debug, Clone)]
pub struct BuiltTransfer {
    pub transaction: Vec<u8>,
    pub success: bool,
    pub error: Option<String>,
}

impl BuiltTransfer {
    fn ok(transaction: Vec<u8>) -> Self {
        Self {
            transaction,
            success: true,
            error: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            transaction: Vec::new(),
            success: false,
            error: Some(message.into()),
        }
    }
}

/// Build an unsigned transfer transaction and serialize it.
///
/// Never returns an error through `Result`: every failure lands in the
/// returned value's `error` field. Amount and address validation happen
/// before any network call is made.
pub async fn build_send_transaction(rpc: &RpcPool, params: &TransferParams) -> BuiltTransfer {
    if params.amount <= 0.0 || !params.amount.is_finite() {
        return BuiltTransfer::failure("Amount must be greater than zero");
    }

    let sender = match parse_pubkey(&params.from_wallet_address) {
        Ok(pubkey) => pubkey,
        Err(_) => return BuiltTransfer::failure("Invalid sender address"),
    };

    let recipient = match parse_pubkey(&params.recipient_address) {
        Ok(pubkey) => pubkey,
        Err(_) => return BuiltTransfer::failure("Invalid recipient address"),
    };

    match build_transfer(rpc, sender, recipient, params).await {
        Ok(bytes) => BuiltTransfer::ok(bytes),
        Err(e) => BuiltTransfer::failure(e.to_string()),
    }
}

async fn build_transfer(
    rpc: &RpcPool,
    sender: Pubkey,
    recipient: Pubkey,
    params: &TransferParams,
) -> Result<Vec<u8>> {
    let instructions = if params.token_mint == SOL_MINT {
        vec![system_instruction::transfer(
            &sender,
            &recipient,
            sol_to_lamports(params.amount),
        )]
    } else {
        let mint = parse_pubkey(&params.token_mint).map_err(|_| anyhow!("Invalid token mint"))?;

        let sender_token_account = get_associated_token_address(&sender, &mint);
        let recipient_token_account = get_associated_token_address(&recipient, &mint);

        let mut instructions = Vec::new();

        // Create the recipient's associated token account when it does not
        // exist yet. The idempotent variant makes a stale check harmless.
        if rpc.client().get_account(&recipient_token_account).await.is_err() {
            instructions.push(create_associated_token_account_idempotent(
                &sender,
                &recipient,
                &mint,
                &TOKEN_PROGRAM_ID,
            ));
        }

        instructions.push(
            token_instruction::transfer(
                &TOKEN_PROGRAM_ID,
                &sender_token_account,
                &recipient_token_account,
                &sender,
                &[&sender],
                to_base_units(params.amount, params.decimals),
            )
            .map_err(|e| anyhow!("Failed to create token transfer instruction: {}", e))?,
        );

        instructions
    };

    let blockhash = rpc
        .with_failover(|client| async move {
            client
                .get_latest_blockhash()
                .await
                .map_err(|e| anyhow!("Failed to get recent blockhash: {}", e))
        })
        .await?;

    let mut transaction = SolanaTransaction::new_with_payer(&instructions, Some(&sender));
    transaction.message.recent_blockhash = blockhash;

    // Serialized without signatures; the wallet signer fills them in.
    bincode::serialize(&transaction).map_err(|e| anyhow!("Failed to serialize transaction: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solana::tokens::constants::USDC_MINT;

    fn pool() -> RpcPool {
        // Never reached by the rejection paths under test.
        RpcPool::from_urls(&["http://unreachable.invalid".to_string()]).unwrap()
    }

    fn params(recipient: &str, amount: f64) -> TransferParams {
        TransferParams {
            from_wallet_address: "So11111111111111111111111111111111111111112".to_string(),
            recipient_address: recipient.to_string(),
            token_mint: USDC_MINT.to_string(),
            amount,
            decimals: 6,
        }
    }

    #[tokio::test]
    async fn malformed_recipient_fails_without_panicking() {
        let result =
            build_send_transaction(&pool(), &params("definitely-not-an-address", 1.0)).await;

        assert!(!result.success);
        assert!(result.transaction.is_empty());
        let error = result.error.unwrap();
        assert!(!error.is_empty());
        assert_eq!(error, "Invalid recipient address");
    }

    #[tokio::test]
    async fn zero_amount_rejected_before_any_network_call() {
        let result = build_send_transaction(
            &pool(),
            &params("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", 0.0),
        )
        .await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Amount must be greater than zero"));
    }

    #[tokio::test]
    async fn negative_amount_rejected_before_any_network_call() {
        let result = build_send_transaction(
            &pool(),
            &params("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", -3.5),
        )
        .await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Amount must be greater than zero"));
    }
}
