//! Account store
//!
//! Accounts (id → integer balance) behind the [`AccountStore`] capability,
//! with a PostgreSQL backend and an in-memory backend.

pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

// Re-export commonly used types
pub use error::StoreError;
pub use memory::{FaultPoint, MemoryAccountStore};
pub use models::{Account, AccountId, BASELINE, Balance};
pub use postgres::PgAccountStore;
pub use store::{AccountSession, AccountStore};
