use thiserror::Error;

use super::models::AccountId;

/// Account store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("account {0} not found")]
    NotFound(AccountId),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Non-database backend failure (in-memory store, injected faults)
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("balance out of range for account {0}")]
    OutOfRange(AccountId),

    #[error("no transaction in progress")]
    NoTransaction,

    #[error("transaction already in progress")]
    TransactionInProgress,
}
