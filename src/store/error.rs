//! Store Errors
//!
//! Failure channel for the repository ports.

use thiserror::Error;

/// Errors a store implementation may surface.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying backend failed (connection, I/O, serialization)
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Concurrent modification detected by the backend
    #[error("Conflict while persisting {0}")]
    Conflict(String),
}

impl StoreError {
    /// Check if retrying against fresh state may help.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_is_retryable() {
        assert!(StoreError::Conflict("ARG...".to_string()).is_retryable());
        assert!(!StoreError::Backend("disk".to_string()).is_retryable());
    }
}
