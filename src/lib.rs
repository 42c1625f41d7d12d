//! tx_demo - Transactional vs. non-transactional transfers
//!
//! Moves money between two ledger accounts either inside one database
//! transaction or as independent statements, and reports exactly what each
//! statement did so the difference is observable.
//!
//! # Modules
//!
//! - [`account`] - Account model and the [`AccountStore`] capability (PostgreSQL, in-memory)
//! - [`transfer`] - Transfer Engine and its execution decision table
//! - [`gateway`] - HTTP routes (`/transfer`, `/reset`, `/accounts`, `/health`)
//! - [`config`] - YAML + environment configuration
//! - [`logging`] - tracing subscriber setup
//! - [`db`] - PostgreSQL connection pool

pub mod account;
pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod transfer;

// Convenient re-exports at crate root
pub use account::{
    Account, AccountId, AccountSession, AccountStore, Balance, MemoryAccountStore, PgAccountStore,
    StoreError,
};
pub use config::AppConfig;
pub use transfer::{TransferEngine, TransferError, TransferReport, TransferRequest};
