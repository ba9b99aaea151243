use anyhow::{anyhow, Result};
use log::warn;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use std::env;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Public mainnet endpoints used when SOLANA_RPC_URLS is not set.
pub const DEFAULT_RPC_URLS: [&str; 3] = [
    "https://mainnet.helius-rpc.com",
    "https://api.mainnet-beta.solana.com",
    "https://solana-mainnet.g.allthatnode.com/full/mainnet",
];

/// A fixed list of RPC endpoints walked round-robin on failure.
///
/// The active index lives inside the pool value, which is created once at
/// startup and passed explicitly wherever ledger access is needed. There is
/// no backoff between endpoints: a failed call moves straight to the next
/// one, and after every endpoint has been tried once the last error is
/// returned to the caller.
pub struct RpcPool {
    clients: Vec<Arc<RpcClient>>,
    urls: Vec<String>,
    active: AtomicUsize,
}

impl RpcPool {
    pub fn from_urls(urls: &[String]) -> Result<Self> {
        if urls.is_empty() {
            return Err(anyhow!("At least one RPC URL is required"));
        }

        let clients = urls
            .iter()
            .map(|url| {
                Arc::new(RpcClient::new_with_commitment(
                    url.clone(),
                    CommitmentConfig::confirmed(),
                ))
            })
            .collect();

        Ok(Self {
            clients,
            urls: urls.to_vec(),
            active: AtomicUsize::new(0),
        })
    }

    /// Read the endpoint list from SOLANA_RPC_URLS (comma-separated),
    /// falling back to the built-in mainnet list.
    pub fn from_env() -> Result<Self> {
        let urls: Vec<String> = match env::var("SOLANA_RPC_URLS") {
            Ok(value) => value
                .split(',')
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty())
                .collect(),
            Err(_) => DEFAULT_RPC_URLS.iter().map(|url| url.to_string()).collect(),
        };

        Self::from_urls(&urls)
    }

    pub fn endpoint_count(&self) -> usize {
        self.clients.len()
    }

    /// The currently active client.
    pub fn client(&self) -> Arc<RpcClient> {
        self.clients[self.active.load(Ordering::Relaxed) % self.clients.len()].clone()
    }

    /// The URL of the currently active endpoint.
    pub fn active_url(&self) -> &str {
        &self.urls[self.active.load(Ordering::Relaxed) % self.urls.len()]
    }

    /// Advance to the next endpoint in fixed round-robin order and return
    /// its client.
    pub fn rotate(&self) -> Arc<RpcClient> {
        let next = (self.active.load(Ordering::Relaxed) + 1) % self.clients.len();
        self.active.store(next, Ordering::Relaxed);
        warn!("Switched to fallback RPC: {}", self.urls[next]);
        self.clients[next].clone()
    }

    /// Run `op` against the active endpoint, rotating on failure until every
    /// endpoint has been tried once. Retries never exceed
    /// `endpoint_count() - 1`.
    pub async fn with_failover<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut(Arc<RpcClient>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut client = self.client();
        let mut last_error = None;

        for attempt in 0..self.clients.len() {
            match op(client).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(
                        "RPC call failed on {} (attempt {}): {}",
                        self.active_url(),
                        attempt + 1,
                        e
                    );
                    last_error = Some(e);
                }
            }

            client = self.rotate();
        }

        Err(last_error.unwrap_or_else(|| anyhow!("No RPC endpoints configured")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn pool() -> RpcPool {
        RpcPool::from_urls(&[
            "http://one.invalid".to_string(),
            "http://two.invalid".to_string(),
            "http://three.invalid".to_string(),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_empty_url_list() {
        assert!(RpcPool::from_urls(&[]).is_err());
    }

    #[test]
    fn rotates_in_fixed_round_robin_order() {
        let pool = pool();
        assert_eq!(pool.active_url(), "http://one.invalid");

        pool.rotate();
        assert_eq!(pool.active_url(), "http://two.invalid");
        pool.rotate();
        assert_eq!(pool.active_url(), "http://three.invalid");
        pool.rotate();
        assert_eq!(pool.active_url(), "http://one.invalid");
    }

    #[tokio::test]
    async fn failover_tries_each_endpoint_once() {
        let pool = pool();
        let attempts = AtomicUsize::new(0);

        let result: Result<()> = pool
            .with_failover(|_client| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err(anyhow!("unreachable endpoint")) }
            })
            .await;

        assert!(result.is_err());
        // One attempt per endpoint: the first call plus at most
        // endpoint_count() - 1 retries.
        assert_eq!(attempts.load(Ordering::SeqCst), pool.endpoint_count());
    }

    #[tokio::test]
    async fn failover_stops_after_first_success() {
        let pool = pool();
        let attempts = AtomicUsize::new(0);

        let result = pool
            .with_failover(|_client| {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(anyhow!("transient"))
                    } else {
                        Ok(42u64)
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(result, 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        // The pool stays on the endpoint that answered.
        assert_eq!(pool.active_url(), "http://two.invalid");
    }
}
