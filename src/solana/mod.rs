// Re-export everything from submodules
pub mod client;
pub mod history;
pub mod jupiter;
pub mod tokens;
pub mod utils;
pub mod wallet;

// Re-export commonly used items
pub use client::{RpcPool, DEFAULT_RPC_URLS};
pub use history::{classify_transaction, get_recent_activity, HISTORY_LIMIT};
pub use tokens::constants::{SOL_MINT, USDC_MINT};
pub use tokens::native::get_sol_balance;
pub use tokens::spl::{get_spl_token_balance, get_token_balances};
pub use tokens::transaction::sign_and_submit;
pub use tokens::transfer::{build_send_transaction, BuiltTransfer, TransferParams};
pub use wallet::{generate_wallet, keypair_from_base58, parse_pubkey, NewWallet};
