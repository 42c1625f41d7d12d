//! Transfer Error Types
//!
//! The `Display` text of each variant is exactly what lands in a report's
//! `error` field.

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::account::{AccountId, Balance, StoreError};

/// Transfer error types
#[derive(Error, Debug)]
pub enum TransferError {
    /// Non-positive amount. Rejected before any store access.
    #[error("InvalidAmount({0})")]
    InvalidAmount(Balance),

    /// A statement targeted a row that does not exist
    #[error("AccountNotFound({0})")]
    AccountNotFound(AccountId),

    /// Connectivity or query failure unrelated to business rules
    #[error("system error: {0}")]
    Store(StoreError),
}

/// Coarse classification carried next to the error text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidInput,
    AccountNotFound,
    StoreFault,
}

impl TransferError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAmount(_) => ErrorKind::InvalidInput,
            Self::AccountNotFound(_) => ErrorKind::AccountNotFound,
            Self::Store(_) => ErrorKind::StoreFault,
        }
    }
}

impl From<StoreError> for TransferError {
    fn from(err: StoreError) -> Self {
        match err {
            // Row vanished between the existence probe and the read
            StoreError::NotFound(id) => Self::AccountNotFound(id),
            other => Self::Store(other),
        }
    }
}
