//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;

use crate::aggregate::ReversalPolicy;

/// Ledger configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (development, production)
    pub environment: String,

    /// Days a completed transaction stays revertible
    pub reversal_window_days: i64,

    /// Bank code used when generating new account numbers
    pub default_bank_code: String,

    /// Branch code used when generating new account numbers
    pub default_branch_code: String,
}

impl Config {
    /// Load configuration from the environment, reading `.env` if present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let reversal_window_days = env::var("REVERSAL_WINDOW_DAYS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("REVERSAL_WINDOW_DAYS"))?;

        let default_bank_code =
            env::var("DEFAULT_BANK_CODE").unwrap_or_else(|_| "017".to_string());

        let default_branch_code =
            env::var("DEFAULT_BRANCH_CODE").unwrap_or_else(|_| "0001".to_string());

        Ok(Self {
            environment,
            reversal_window_days,
            default_bank_code,
            default_branch_code,
        })
    }

    /// The reversal policy configured for this deployment.
    pub fn reversal_policy(&self) -> ReversalPolicy {
        ReversalPolicy::days(self.reversal_window_days)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
