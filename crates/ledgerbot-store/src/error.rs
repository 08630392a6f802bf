//! Error types for ledgerbot-store

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreErrorCode {
    /// Ledger entry not found
    EntryNotFound,
    /// Table missing from the store
    TabNotFound,
    /// Backend failure
    Backend,
}

impl std::fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreErrorCode::EntryNotFound => write!(f, "ENTRY_NOT_FOUND"),
            StoreErrorCode::TabNotFound => write!(f, "TAB_NOT_FOUND"),
            StoreErrorCode::Backend => write!(f, "BACKEND"),
        }
    }
}

/// Main error type for ledgerbot-store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Entry not found: {id}")]
    EntryNotFound { id: u64 },

    #[error("Table not found: {name}")]
    TabNotFound { name: String },

    #[error("Store backend error: {message}")]
    Backend { message: String },
}

impl StoreError {
    /// Get the error code
    pub fn code(&self) -> StoreErrorCode {
        match self {
            StoreError::EntryNotFound { .. } => StoreErrorCode::EntryNotFound,
            StoreError::TabNotFound { .. } => StoreErrorCode::TabNotFound,
            StoreError::Backend { .. } => StoreErrorCode::Backend,
        }
    }
}

/// Result type with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
