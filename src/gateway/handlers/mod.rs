pub mod accounts;
pub mod health;
pub mod transfer;

pub use accounts::{list_accounts, reset_accounts};
pub use health::{HealthResponse, health_check};
pub use transfer::create_transfer;
