use anyhow::{anyhow, Result};
use chrono::Utc;
use log::warn;
use serde_json::Value;
use solana_client::rpc_client::GetConfirmedSignaturesForAddress2Config;
use solana_client::rpc_config::RpcTransactionConfig;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::Signature;
use solana_transaction_status::option_serializer::OptionSerializer;
use solana_transaction_status::{
    EncodedTransaction, EncodedTransactionWithStatusMeta, UiInstruction, UiMessage,
    UiParsedInstruction, UiParsedMessage, UiTransactionEncoding, UiTransactionStatusMeta,
};
use std::str::FromStr;

use crate::entity::{ActivityKind, ActivityRecord, ActivityStatus};
use crate::solana::client::RpcPool;
use crate::solana::tokens::constants::SWAP_PROGRAM_IDS;
use crate::solana::utils::lamports_to_sol;
use crate::solana::wallet::parse_pubkey;

/// Number of recent transactions shown on the history screen.
pub const HISTORY_LIMIT: usize = 5;

/// Fetch and classify the most recent transactions for a wallet.
///
/// An address with no prior signatures yields an empty list. A failure
/// fetching a single transaction is logged and the entry skipped; only the
/// signature listing itself is allowed to fail the call.
pub async fn get_recent_activity(rpc: &RpcPool, address: &str) -> Result<Vec<ActivityRecord>> {
    let pubkey = parse_pubkey(address)?;

    let signatures = rpc
        .with_failover(|client| async move {
            client
                .get_signatures_for_address_with_config(
                    &pubkey,
                    GetConfirmedSignaturesForAddress2Config {
                        before: None,
                        until: None,
                        limit: Some(HISTORY_LIMIT),
                        commitment: Some(CommitmentConfig::confirmed()),
                    },
                )
                .await
                .map_err(|e| anyhow!("Failed to fetch signatures: {}", e))
        })
        .await?;

    if signatures.is_empty() {
        return Ok(Vec::new());
    }

    let client = rpc.client();
    let mut records = Vec::with_capacity(signatures.len());

    for sig_info in &signatures {
        let signature = match Signature::from_str(&sig_info.signature) {
            Ok(signature) => signature,
            Err(e) => {
                warn!("Skipping malformed signature {}: {}", sig_info.signature, e);
                continue;
            }
        };

        let transaction = match client
            .get_transaction_with_config(
                &signature,
                RpcTransactionConfig {
                    encoding: Some(UiTransactionEncoding::JsonParsed),
                    commitment: Some(CommitmentConfig::confirmed()),
                    max_supported_transaction_version: Some(0),
                },
            )
            .await
        {
            Ok(transaction) => transaction,
            Err(e) => {
                warn!("Failed to fetch transaction {}: {}", sig_info.signature, e);
                continue;
            }
        };

        let timestamp = sig_info
            .block_time
            .or(transaction.block_time)
            .unwrap_or_else(|| Utc::now().timestamp());

        records.push(classify_transaction(
            address,
            &sig_info.signature,
            timestamp,
            &transaction.transaction,
        ));
    }

    Ok(records)
}

/// Classify a parsed transaction relative to the wallet.
///
/// Swap detection wins over everything else: when one of the known DEX
/// program IDs appears among the account keys the record stays `Swap` no
/// matter what the balance deltas say. Otherwise the wallet's lamport
/// delta decides send/receive, refined by any parsed transfer
/// instructions. A transaction with a zero delta and no transfer
/// instruction stays `Unknown`.
pub fn classify_transaction(
    wallet: &str,
    signature: &str,
    timestamp: i64,
    tx: &EncodedTransactionWithStatusMeta,
) -> ActivityRecord {
    let meta = tx.meta.as_ref();

    let status = match meta {
        Some(meta) if meta.err.is_some() => ActivityStatus::Failed,
        _ => ActivityStatus::Success,
    };

    let mut record = ActivityRecord::new(signature, timestamp, status);

    let fee_lamports = meta.map(|m| m.fee).unwrap_or(0);
    if fee_lamports > 0 {
        record.fee = Some(lamports_to_sol(fee_lamports));
    }

    let message = match &tx.transaction {
        EncodedTransaction::Json(ui_tx) => match &ui_tx.message {
            UiMessage::Parsed(parsed) => parsed,
            UiMessage::Raw(_) => return record,
        },
        _ => return record,
    };

    let is_swap = message
        .account_keys
        .iter()
        .any(|key| SWAP_PROGRAM_IDS.contains(&key.pubkey.as_str()));

    if is_swap {
        record.kind = ActivityKind::Swap;
        record.token_symbol = Some("Token".to_string());
        return record;
    }

    classify_by_lamport_delta(wallet, message, meta, &mut record);
    classify_by_instructions(wallet, message, meta, &mut record);

    record
}

fn classify_by_lamport_delta(
    wallet: &str,
    message: &UiParsedMessage,
    meta: Option<&UiTransactionStatusMeta>,
    record: &mut ActivityRecord,
) {
    let Some(meta) = meta else { return };
    let Some(wallet_index) = message
        .account_keys
        .iter()
        .position(|key| key.pubkey == wallet)
    else {
        return;
    };

    let pre = meta.pre_balances.get(wallet_index).copied().unwrap_or(0);
    let post = meta.post_balances.get(wallet_index).copied().unwrap_or(0);

    if post > pre {
        record.kind = ActivityKind::Receive;
        record.amount = Some(lamports_to_sol(post - pre));
        record.token_symbol = Some("SOL".to_string());
    } else if post < pre {
        record.kind = ActivityKind::Send;
        let fee = record.fee.unwrap_or(0.0);
        record.amount = Some(lamports_to_sol(pre - post) - fee);
        record.token_symbol = Some("SOL".to_string());
    }
}

fn classify_by_instructions(
    wallet: &str,
    message: &UiParsedMessage,
    meta: Option<&UiTransactionStatusMeta>,
    record: &mut ActivityRecord,
) {
    for instruction in &message.instructions {
        let UiInstruction::Parsed(UiParsedInstruction::Parsed(parsed)) = instruction else {
            continue;
        };

        let Some(kind) = parsed.parsed.get("type").and_then(Value::as_str) else {
            continue;
        };
        let Some(info) = parsed.parsed.get("info") else {
            continue;
        };

        match kind {
            "transfer" => {
                if let Some(mint) = info.get("mint").and_then(Value::as_str) {
                    // SPL token transfer
                    record.token_mint = Some(mint.to_string());
                    record.amount = parsed_token_amount(info);

                    let authority = info.get("authority").and_then(Value::as_str);
                    let source = info.get("source").and_then(Value::as_str);
                    let destination = info.get("destination").and_then(Value::as_str);

                    if authority == Some(wallet) || source == Some(wallet) {
                        record.kind = ActivityKind::Send;
                    } else if destination == Some(wallet)
                        || wallet_received_mint(meta, wallet, mint)
                    {
                        record.kind = ActivityKind::Receive;
                    }
                } else if let Some(lamports) = info.get("lamports").and_then(Value::as_u64) {
                    // System-program SOL transfer
                    record.amount = Some(lamports_to_sol(lamports));
                    record.token_symbol = Some("SOL".to_string());

                    if info.get("source").and_then(Value::as_str) == Some(wallet) {
                        record.kind = ActivityKind::Send;
                    } else if info.get("destination").and_then(Value::as_str) == Some(wallet) {
                        record.kind = ActivityKind::Receive;
                    }
                }
            }
            "transferChecked" => {
                if let Some(mint) = info.get("mint").and_then(Value::as_str) {
                    record.token_mint = Some(mint.to_string());
                }
                record.amount = Some(parsed_token_amount(info).unwrap_or(0.0));

                let authority = info.get("authority").and_then(Value::as_str);
                let mint = info.get("mint").and_then(Value::as_str).unwrap_or("");

                if authority == Some(wallet) {
                    record.kind = ActivityKind::Send;
                } else if wallet_received_mint(meta, wallet, mint) {
                    record.kind = ActivityKind::Receive;
                }
            }
            _ => {}
        }
    }
}

/// Token amount from a parsed instruction, preferring the UI amount and
/// falling back to the raw amount scaled by the instruction's decimals.
fn parsed_token_amount(info: &Value) -> Option<f64> {
    let token_amount = info.get("tokenAmount");

    if let Some(ui) = token_amount
        .and_then(|ta| ta.get("uiAmount"))
        .and_then(Value::as_f64)
    {
        return Some(ui);
    }

    if let Some(ui) = token_amount
        .and_then(|ta| ta.get("uiAmount"))
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<f64>().ok())
    {
        return Some(ui);
    }

    let raw: f64 = info.get("amount")?.as_str()?.parse().ok()?;
    let decimals = info.get("decimals").and_then(Value::as_u64).unwrap_or(9);
    Some(raw / 10_f64.powi(decimals as i32))
}

/// Whether the wallet owns a post-transaction token balance for the mint.
fn wallet_received_mint(
    meta: Option<&UiTransactionStatusMeta>,
    wallet: &str,
    mint: &str,
) -> bool {
    let Some(meta) = meta else { return false };
    let OptionSerializer::Some(balances) = &meta.post_token_balances else {
        return false;
    };

    balances.iter().any(|balance| {
        balance.mint == mint
            && matches!(&balance.owner, OptionSerializer::Some(owner) if owner == wallet)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const WALLET: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";
    const OTHER: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";
    const MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

    fn account(pubkey: &str) -> Value {
        json!({ "pubkey": pubkey, "signer": false, "writable": true, "source": "transaction" })
    }

    fn fixture(
        account_keys: Vec<Value>,
        instructions: Vec<Value>,
        meta: Value,
    ) -> EncodedTransactionWithStatusMeta {
        serde_json::from_value(json!({
            "transaction": {
                "signatures": ["5VERYLongBase58SignatureValue1111111111111111111111111111111111"],
                "message": {
                    "accountKeys": account_keys,
                    "recentBlockhash": "EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N",
                    "instructions": instructions
                }
            },
            "meta": meta
        }))
        .unwrap()
    }

    fn meta(fee: u64, pre: Vec<u64>, post: Vec<u64>) -> Value {
        json!({
            "err": null,
            "status": { "Ok": null },
            "fee": fee,
            "preBalances": pre,
            "postBalances": post,
            "innerInstructions": [],
            "logMessages": [],
            "preTokenBalances": [],
            "postTokenBalances": [],
            "rewards": []
        })
    }

    #[test]
    fn zero_delta_without_transfers_is_unknown() {
        let tx = fixture(
            vec![account(WALLET), account(OTHER)],
            vec![],
            meta(5000, vec![1_000_000, 0], vec![1_000_000, 0]),
        );

        let record = classify_transaction(WALLET, "sig", 1_700_000_000, &tx);

        assert_eq!(record.kind, ActivityKind::Unknown);
        assert_eq!(record.amount, None);
        assert_eq!(record.status, ActivityStatus::Success);
    }

    #[test]
    fn dex_program_in_account_keys_is_swap_regardless_of_deltas() {
        let tx = fixture(
            vec![
                account(WALLET),
                account("JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4"),
            ],
            vec![],
            // A large negative delta that would otherwise read as a send.
            meta(5000, vec![2_000_000_000, 0], vec![500_000_000, 0]),
        );

        let record = classify_transaction(WALLET, "sig", 1_700_000_000, &tx);

        assert_eq!(record.kind, ActivityKind::Swap);
        assert_eq!(record.token_symbol.as_deref(), Some("Token"));
    }

    #[test]
    fn positive_lamport_delta_is_receive() {
        let tx = fixture(
            vec![account(OTHER), account(WALLET)],
            vec![],
            meta(
                5000,
                vec![2_000_000_000, 1_000_000_000],
                vec![1_499_995_000, 1_500_000_000],
            ),
        );

        let record = classify_transaction(WALLET, "sig", 1_700_000_000, &tx);

        assert_eq!(record.kind, ActivityKind::Receive);
        assert_eq!(record.amount, Some(0.5));
        assert_eq!(record.token_symbol.as_deref(), Some("SOL"));
    }

    #[test]
    fn negative_lamport_delta_is_send_net_of_fee() {
        let tx = fixture(
            vec![account(WALLET), account(OTHER)],
            vec![],
            meta(
                5000,
                vec![2_000_000_000, 0],
                vec![1_499_995_000, 500_000_000],
            ),
        );

        let record = classify_transaction(WALLET, "sig", 1_700_000_000, &tx);

        assert_eq!(record.kind, ActivityKind::Send);
        // 0.500005 SOL left the account; 0.000005 of it was the fee.
        let amount = record.amount.unwrap();
        assert!((amount - 0.5).abs() < 1e-9);
        assert_eq!(record.fee, Some(0.000005));
    }

    #[test]
    fn failed_transaction_keeps_failed_status() {
        let mut failed_meta = meta(5000, vec![1_000_000, 0], vec![995_000, 0]);
        failed_meta["err"] = json!({ "InstructionError": [0, { "Custom": 1 }] });
        failed_meta["status"] = json!({ "Err": { "InstructionError": [0, { "Custom": 1 }] } });

        let tx = fixture(vec![account(WALLET), account(OTHER)], vec![], failed_meta);

        let record = classify_transaction(WALLET, "sig", 1_700_000_000, &tx);

        assert_eq!(record.status, ActivityStatus::Failed);
    }

    #[test]
    fn transfer_checked_to_wallet_is_receive_with_mint() {
        let mut tx_meta = meta(5000, vec![1_000_000, 0], vec![1_000_000, 0]);
        tx_meta["postTokenBalances"] = json!([{
            "accountIndex": 1,
            "mint": MINT,
            "owner": WALLET,
            "programId": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
            "uiTokenAmount": {
                "uiAmount": 25.0,
                "decimals": 6,
                "amount": "25000000",
                "uiAmountString": "25"
            }
        }]);

        let instruction = json!({
            "program": "spl-token",
            "programId": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
            "parsed": {
                "type": "transferChecked",
                "info": {
                    "authority": OTHER,
                    "source": "SomeSourceTokenAccount11111111111111111111",
                    "destination": "SomeDestTokenAccount111111111111111111111",
                    "mint": MINT,
                    "tokenAmount": {
                        "uiAmount": 25.0,
                        "decimals": 6,
                        "amount": "25000000",
                        "uiAmountString": "25"
                    }
                }
            }
        });

        let tx = fixture(
            vec![account(WALLET), account(OTHER)],
            vec![instruction],
            tx_meta,
        );

        let record = classify_transaction(WALLET, "sig", 1_700_000_000, &tx);

        assert_eq!(record.kind, ActivityKind::Receive);
        assert_eq!(record.token_mint.as_deref(), Some(MINT));
        assert_eq!(record.amount, Some(25.0));
    }

    #[test]
    fn transfer_checked_by_wallet_authority_is_send() {
        let instruction = json!({
            "program": "spl-token",
            "programId": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA",
            "parsed": {
                "type": "transferChecked",
                "info": {
                    "authority": WALLET,
                    "source": "SomeSourceTokenAccount11111111111111111111",
                    "destination": "SomeDestTokenAccount111111111111111111111",
                    "mint": MINT,
                    "tokenAmount": {
                        "uiAmount": 10.5,
                        "decimals": 6,
                        "amount": "10500000",
                        "uiAmountString": "10.5"
                    }
                }
            }
        });

        let tx = fixture(
            vec![account(WALLET), account(OTHER)],
            vec![instruction],
            meta(5000, vec![1_000_000, 0], vec![1_000_000, 0]),
        );

        let record = classify_transaction(WALLET, "sig", 1_700_000_000, &tx);

        assert_eq!(record.kind, ActivityKind::Send);
        assert_eq!(record.amount, Some(10.5));
        assert_eq!(record.token_mint.as_deref(), Some(MINT));
    }

    #[test]
    fn system_transfer_instruction_refines_sol_amount() {
        let instruction = json!({
            "program": "system",
            "programId": "11111111111111111111111111111111",
            "parsed": {
                "type": "transfer",
                "info": {
                    "source": WALLET,
                    "destination": OTHER,
                    "lamports": 750_000_000u64
                }
            }
        });

        let tx = fixture(
            vec![account(WALLET), account(OTHER)],
            vec![instruction],
            meta(
                5000,
                vec![2_000_000_000, 0],
                vec![1_249_995_000, 750_000_000],
            ),
        );

        let record = classify_transaction(WALLET, "sig", 1_700_000_000, &tx);

        assert_eq!(record.kind, ActivityKind::Send);
        assert_eq!(record.amount, Some(0.75));
        assert_eq!(record.token_symbol.as_deref(), Some("SOL"));
    }

    #[test]
    fn missing_meta_defaults_to_unknown_success() {
        let tx = fixture(vec![account(WALLET)], vec![], json!(null));

        let record = classify_transaction(WALLET, "sig", 1_700_000_000, &tx);

        assert_eq!(record.kind, ActivityKind::Unknown);
        assert_eq!(record.status, ActivityStatus::Success);
        assert_eq!(record.fee, None);
    }
}
