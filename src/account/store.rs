//! Account store capability
//!
//! The engine never holds a pool. It is handed an [`AccountStore`] and asks it
//! for one [`AccountSession`] per call; the session owns a single exclusive
//! connection and releases it when dropped, on every exit path.

use async_trait::async_trait;

use super::error::StoreError;
use super::models::{Account, AccountId, Balance};

/// Source of scoped sessions (a connection pool in production)
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Check out one exclusive session. Failing here is the only store error
    /// callers cannot recover from locally.
    async fn acquire(&self) -> Result<Box<dyn AccountSession>, StoreError>;
}

/// One exclusive connection to the account store.
///
/// Outside of `begin`/`commit` every mutating call is committed on its own.
#[async_trait]
pub trait AccountSession: Send {
    /// All accounts, ordered by id ascending
    async fn get_all(&mut self) -> Result<Vec<Account>, StoreError>;

    async fn exists(&mut self, id: AccountId) -> Result<bool, StoreError>;

    /// Fails with [`StoreError::NotFound`] when the row is absent
    async fn get_balance(&mut self, id: AccountId) -> Result<Balance, StoreError>;

    /// Add `delta` to the balance of `id`. Returns rows affected; a missing
    /// row yields `Ok(0)`, not an error.
    async fn apply_delta(&mut self, id: AccountId, delta: Balance) -> Result<u64, StoreError>;

    /// Delete every account and recreate [`BASELINE`](super::models::BASELINE),
    /// always atomically regardless of the caller's mode.
    async fn reset_all(&mut self) -> Result<(), StoreError>;

    async fn begin(&mut self) -> Result<(), StoreError>;

    async fn commit(&mut self) -> Result<(), StoreError>;

    async fn rollback(&mut self) -> Result<(), StoreError>;
}
