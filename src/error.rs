use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Input rejected by boundary validation
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A position write was rejected by the backend
    #[error("Failed to reorder")]
    Reorder,

    /// Row store read or write failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
