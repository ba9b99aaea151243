use anyhow::{anyhow, Result};
use bip39::{Language, Mnemonic};
use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::{rng, RngCore};
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use std::str::FromStr;

/// Freshly generated embedded wallet.
pub struct NewWallet {
    pub mnemonic: String,
    pub keypair_base58: String,
    pub address: String,
}

/// Generate a new wallet with a 12-word BIP39 mnemonic.
pub fn generate_wallet() -> Result<NewWallet> {
    // 16 bytes (128 bits) of entropy is enough for a 12-word mnemonic.
    let mut entropy = [0u8; 16];
    rng().fill_bytes(&mut entropy);

    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)
        .map_err(|e| anyhow!("Failed to create mnemonic: {}", e))?;

    // The first 32 bytes of the 64-byte seed become the Ed25519 private
    // key; the remainder is chain code Solana does not use.
    let seed = mnemonic.to_seed("");

    let signing_key = SigningKey::try_from(&seed[..32])
        .map_err(|e| anyhow!("Failed to create ed25519 signing key: {}", e))?;
    let verifying_key = VerifyingKey::from(&signing_key);

    // Solana keypairs are 32 private + 32 public bytes.
    let mut ed25519_bytes = [0u8; 64];
    ed25519_bytes[..32].copy_from_slice(&signing_key.to_bytes());
    ed25519_bytes[32..].copy_from_slice(&verifying_key.to_bytes());

    let keypair = Keypair::from_bytes(&ed25519_bytes)
        .map_err(|e| anyhow!("Failed to create Solana keypair: {}", e))?;

    let address = keypair.pubkey().to_string();
    let keypair_base58 = keypair_to_base58(&keypair);

    Ok(NewWallet {
        mnemonic: mnemonic.to_string(),
        keypair_base58,
        address,
    })
}

/// Serialize Keypair (64 bytes) to base58.
pub fn keypair_to_base58(keypair: &Keypair) -> String {
    bs58::encode(keypair.to_bytes()).into_string()
}

/// Restore Keypair from base58 string (64 bytes).
pub fn keypair_from_base58(keypair_base58: &str) -> Result<Keypair> {
    let keypair_bytes = bs58::decode(keypair_base58)
        .into_vec()
        .map_err(|e| anyhow!("Failed to decode base58 keypair: {}", e))?;

    if keypair_bytes.len() != 64 {
        return Err(anyhow!("Invalid keypair length: {}", keypair_bytes.len()));
    }

    let keypair = Keypair::from_bytes(&keypair_bytes)
        .map_err(|e| anyhow!("Failed to create keypair from bytes: {}", e))?;

    Ok(keypair)
}

/// Convert base58 string to Solana `Pubkey`.
pub fn parse_pubkey(address: &str) -> Result<Pubkey> {
    Pubkey::from_str(address).map_err(|e| anyhow!("Invalid Solana address: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_wallet_round_trips_through_base58() {
        let wallet = generate_wallet().unwrap();
        assert_eq!(wallet.mnemonic.split_whitespace().count(), 12);

        let keypair = keypair_from_base58(&wallet.keypair_base58).unwrap();
        assert_eq!(keypair.pubkey().to_string(), wallet.address);
    }

    #[test]
    fn rejects_truncated_keypair() {
        let encoded = bs58::encode([7u8; 32]).into_string();
        assert!(keypair_from_base58(&encoded).is_err());
    }
}
