use anyhow::{anyhow, Result};
use solana_sdk::{
    signature::Keypair, signer::Signer, transaction::Transaction as SolanaTransaction,
};

use crate::solana::client::RpcPool;

/// Sign a serialized unsigned transaction with the user keypair and submit
/// it through the failover pool. Returns the confirmed signature.
pub async fn sign_and_submit(
    rpc: &RpcPool,
    keypair: &Keypair,
    unsigned_transaction: &[u8],
) -> Result<String> {
    let mut transaction: SolanaTransaction = bincode::deserialize(unsigned_transaction)
        .map_err(|e| anyhow!("Failed to decode transaction: {}", e))?;

    let expected_signer = keypair.pubkey();
    if transaction.message.account_keys.first() != Some(&expected_signer) {
        return Err(anyhow!("Transaction fee payer does not match the wallet"));
    }

    let blockhash = transaction.message.recent_blockhash;
    transaction
        .try_sign(&[keypair], blockhash)
        .map_err(|e| anyhow!("Failed to sign transaction: {}", e))?;

    let signature = rpc
        .with_failover(|client| {
            let transaction = transaction.clone();
            async move {
                client
                    .send_and_confirm_transaction(&transaction)
                    .await
                    .map_err(|e| anyhow!("Failed to send transaction: {}", e))
            }
        })
        .await?;

    Ok(signature.to_string())
}
