use anyhow::{anyhow, Result};
use log::warn;
use solana_account_decoder::parse_token::UiTokenAccount;
use solana_client::rpc_request::TokenAccountsFilter;
use solana_client::rpc_response::RpcKeyedAccount;

use crate::entity::TokenBalance;
use crate::solana::client::RpcPool;
use crate::solana::wallet::parse_pubkey;

/// List SPL token balances for an owner. Rows carry the raw mint, amount
/// and decimals only; metadata and USD prices are layered on by the
/// balance interactor. Zero balances are dropped.
pub async fn get_token_balances(rpc: &RpcPool, address: &str) -> Result<Vec<TokenBalance>> {
    let owner = parse_pubkey(address)?;

    let token_accounts: Vec<RpcKeyedAccount> = rpc
        .with_failover(|client| async move {
            client
                .get_token_accounts_by_owner(&owner, TokenAccountsFilter::ProgramId(spl_token::ID))
                .await
                .map_err(|e| anyhow!("Failed to get token accounts: {}", e))
        })
        .await?;

    let mut balances: Vec<TokenBalance> = Vec::new();
    let client = rpc.client();

    for keyed_account in token_accounts {
        let account_pubkey = parse_pubkey(&keyed_account.pubkey)?;

        // A single unreadable account is skipped rather than failing the
        // whole refresh.
        let token_account: UiTokenAccount = match client.get_token_account(&account_pubkey).await {
            Ok(Some(account)) => account,
            Ok(None) => continue,
            Err(e) => {
                warn!("Failed to read token account {}: {}", keyed_account.pubkey, e);
                continue;
            }
        };

        let ui_amount = token_account.token_amount.ui_amount.unwrap_or(0.0);
        if ui_amount <= 0.0 {
            continue;
        }

        balances.push(TokenBalance {
            mint: token_account.mint.clone(),
            balance: ui_amount,
            decimals: token_account.token_amount.decimals,
            amount: token_account.token_amount.amount.clone(),
            metadata: None,
            price_usd: None,
            usd_value: None,
        });
    }

    Ok(balances)
}

/// Balance of one SPL token, by mint. Returns 0 when the owner holds none.
pub async fn get_spl_token_balance(rpc: &RpcPool, address: &str, mint: &str) -> Result<f64> {
    let balances = get_token_balances(rpc, address).await?;

    Ok(balances
        .iter()
        .find(|balance| balance.mint == mint)
        .map(|balance| balance.balance)
        .unwrap_or(0.0))
}
