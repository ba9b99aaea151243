pub mod config;
pub mod models;
pub mod portfolio_service;
pub mod price_service;
pub mod token_repository;

pub use config::Config;
pub use models::{PortfolioPosition, PortfolioPositions, StakedJup};
pub use portfolio_service::{JupiterPortfolioService, PortfolioService};
pub use price_service::{AggregatePriceService, PriceService};
pub use token_repository::{JupiterTokenRepository, TokenRepository};
