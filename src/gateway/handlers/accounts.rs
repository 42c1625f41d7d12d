//! Account handlers: listing and baseline reset

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use super::super::error::ApiError;
use super::super::state::AppState;
use super::super::types::{ErrorResponse, ResetResponse};
use crate::account::Account;

/// Restore the baseline accounts
///
/// POST /reset
#[utoipa::path(
    post,
    path = "/reset",
    responses(
        (status = 200, description = "Accounts reset", body = ResetResponse),
        (status = 500, description = "Reset failed", body = ResetResponse)
    ),
    tag = "Accounts"
)]
pub async fn reset_accounts(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ResetResponse>) {
    match state.engine.reset().await {
        Ok(accounts) => (StatusCode::OK, Json(ResetResponse::ok(accounts))),
        Err(e) => {
            tracing::error!(error = %e, "Reset failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ResetResponse::failed(e.to_string())),
            )
        }
    }
}

/// Current balances
///
/// GET /accounts
#[utoipa::path(
    get,
    path = "/accounts",
    responses(
        (status = 200, description = "All accounts ordered by id", body = Vec<Account>),
        (status = 503, description = "Account store unavailable", body = ErrorResponse)
    ),
    tag = "Accounts"
)]
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Account>>, ApiError> {
    let accounts = state.engine.accounts().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list accounts");
        ApiError::service_unavailable(e.to_string())
    })?;
    Ok(Json(accounts))
}
