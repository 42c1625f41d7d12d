//! Gateway types module
//!
//! ## Input Types
//! - [`TransferBody`]: `POST /transfer` request body
//!
//! ## Output Types
//! - [`TransferReportResponse`]: Transfer report as returned to clients
//! - [`ResetResponse`]: `POST /reset` result
//! - [`ErrorResponse`]: Body of every rejected request
//!
//! ## Submodules
//! - [`transfer`]: Transfer request/report DTOs
//! - [`response`]: Response types and error codes

pub mod response;
pub mod transfer;

// Re-export commonly used types at module root
pub use response::{ErrorResponse, ResetResponse, error_codes};
pub use transfer::{StepView, TransferBody, TransferReportResponse};
