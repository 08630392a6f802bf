//! Error types for ledgerbot-bot

use thiserror::Error;

use ledgerbot_core::CoreError;
use ledgerbot_store::StoreError;

/// Main error type for ledgerbot-bot
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Delivery failed: {message}")]
    Delivery { message: String },
}

/// Result type with BotError
pub type BotResult<T> = Result<T, BotError>;
