//! Transfer Engine
//!
//! Moves an integer amount between two accounts in one of two modes:
//!
//! - **Atomic**: withdraw then deposit inside one transaction; a missing row
//!   on either side rolls both back.
//! - **Non-atomic**: each update commits on its own, in an order chosen by
//!   which precondition fails (see [`plan`]). Partial effects stay.
//!
//! Neither mode checks that the source can afford the transfer; balances may
//! go negative.

pub mod engine;
pub mod error;
pub mod plan;
pub mod types;


// Re-exports for convenience
pub use engine::TransferEngine;
pub use error::{ErrorKind, TransferError};
pub use plan::{Scenario, Step};
pub use types::{Statement, StatementKind, TransferReport, TransferRequest};
