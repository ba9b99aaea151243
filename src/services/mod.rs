pub mod zero_backend;

pub use zero_backend::{AccountsResponse, ZeroBackendClient};
