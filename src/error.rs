//! Error handling module
//!
//! Crate-level error umbrella over the domain, store, and configuration
//! failure channels.

use crate::config::ConfigError;
use crate::domain::DomainError;
use crate::store::StoreError;

/// Crate-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Crate-level error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Business rule violations
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Persistence-port failures
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Check if the caller can correct the request and retry.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::Domain(e) if e.is_client_error())
    }
}
