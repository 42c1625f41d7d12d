//! Response types and error codes
//!
//! - `ErrorResponse`: Body of every rejected request
//! - `ResetResponse`: Result of `POST /reset`
//! - `error_codes`: Standard error code constants

use serde::Serialize;
use utoipa::ToSchema;

use crate::account::Account;

// ============================================================================
// Error Response
// ============================================================================

/// Body returned with any 4xx/5xx status
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Numeric error code, see [`error_codes`]
    #[schema(example = 1001)]
    pub code: i32,
    /// Short machine-readable name
    #[schema(example = "INVALID_PARAMETER")]
    pub error: String,
    /// Human-readable detail
    #[schema(example = "Invalid input parameters")]
    pub message: String,
}

// ============================================================================
// Reset
// ============================================================================

/// Result of restoring the baseline accounts
#[derive(Debug, Serialize, ToSchema)]
pub struct ResetResponse {
    pub success: bool,
    #[schema(example = "Account balances have been reset")]
    pub message: String,
    /// Accounts after the reset (success only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<Account>>,
    /// Failure detail (failure only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResetResponse {
    pub fn ok(accounts: Vec<Account>) -> Self {
        Self {
            success: true,
            message: "Account balances have been reset".to_string(),
            accounts: Some(accounts),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: "Failed to reset accounts".to_string(),
            accounts: None,
            error: Some(error.into()),
        }
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}
