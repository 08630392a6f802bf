//! Error types for ledgerbot-core

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Amount failed validation
    InvalidAmount,
    /// Unknown report period token
    InvalidPeriod,
    /// Unknown entry kind token
    InvalidKind,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::InvalidAmount => write!(f, "INVALID_AMOUNT"),
            ErrorCode::InvalidPeriod => write!(f, "INVALID_PERIOD"),
            ErrorCode::InvalidKind => write!(f, "INVALID_KIND"),
        }
    }
}

/// Main error type for ledgerbot-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid amount: {input}")]
    InvalidAmount { input: String },

    #[error("Invalid report period: {input}")]
    InvalidPeriod { input: String },

    #[error("Invalid entry kind: {input}")]
    InvalidKind { input: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::InvalidAmount { .. } => ErrorCode::InvalidAmount,
            CoreError::InvalidPeriod { .. } => ErrorCode::InvalidPeriod,
            CoreError::InvalidKind { .. } => ErrorCode::InvalidKind,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;
