use anyhow::{anyhow, Result};

use crate::solana::client::RpcPool;
use crate::solana::utils::lamports_to_sol;
use crate::solana::wallet::parse_pubkey;

/// Get SOL balance for an address, in SOL.
pub async fn get_sol_balance(rpc: &RpcPool, address: &str) -> Result<f64> {
    let pubkey = parse_pubkey(address)?;

    let lamports = rpc
        .with_failover(|client| async move {
            client
                .get_balance(&pubkey)
                .await
                .map_err(|e| anyhow!("Failed to get balance: {}", e))
        })
        .await?;

    Ok(lamports_to_sol(lamports))
}
