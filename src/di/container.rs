use std::sync::Arc;

use sqlx::PgPool;

use crate::services::ZeroBackendClient;
use crate::solana::client::RpcPool;
use crate::solana::jupiter::config::Config as JupiterConfig;
use crate::solana::jupiter::portfolio_service::{JupiterPortfolioService, PortfolioService};
use crate::solana::jupiter::price_service::{AggregatePriceService, PriceService};
use crate::solana::jupiter::token_repository::{JupiterTokenRepository, TokenRepository};

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    // Core services
    db_pool: Arc<PgPool>,
    rpc_pool: Arc<RpcPool>,

    // Market data services
    token_repository: Arc<dyn TokenRepository + Send + Sync>,
    price_service: Arc<dyn PriceService + Send + Sync>,
    portfolio_service: Arc<dyn PortfolioService + Send + Sync>,

    // ZeroAlpha backend
    zero_backend: Arc<ZeroBackendClient>,

    // Configuration
    jupiter_config: JupiterConfig,
}

impl ServiceContainer {
    /// Create a new service container with essential dependencies
    pub fn new(db_pool: Arc<PgPool>, rpc_pool: Arc<RpcPool>) -> Self {
        let jupiter_config = JupiterConfig::from_env();

        let token_repository = Arc::new(JupiterTokenRepository::new(jupiter_config.clone()))
            as Arc<dyn TokenRepository + Send + Sync>;

        let price_service = Arc::new(AggregatePriceService::new(jupiter_config.clone()))
            as Arc<dyn PriceService + Send + Sync>;

        let portfolio_service = Arc::new(JupiterPortfolioService::new(jupiter_config.clone()))
            as Arc<dyn PortfolioService + Send + Sync>;

        let zero_backend = Arc::new(ZeroBackendClient::from_env());

        Self {
            db_pool,
            rpc_pool,
            token_repository,
            price_service,
            portfolio_service,
            zero_backend,
            jupiter_config,
        }
    }

    // Accessor methods

    pub fn db_pool(&self) -> Arc<PgPool> {
        self.db_pool.clone()
    }

    pub fn rpc_pool(&self) -> Arc<RpcPool> {
        self.rpc_pool.clone()
    }

    pub fn token_repository(&self) -> Arc<dyn TokenRepository + Send + Sync> {
        self.token_repository.clone()
    }

    pub fn price_service(&self) -> Arc<dyn PriceService + Send + Sync> {
        self.price_service.clone()
    }

    pub fn portfolio_service(&self) -> Arc<dyn PortfolioService + Send + Sync> {
        self.portfolio_service.clone()
    }

    pub fn zero_backend(&self) -> Arc<ZeroBackendClient> {
        self.zero_backend.clone()
    }

    pub fn jupiter_config(&self) -> JupiterConfig {
        self.jupiter_config.clone()
    }
}
