//! Transfer handler

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};

use super::super::error::ApiError;
use super::super::state::AppState;
use super::super::types::{ErrorResponse, TransferBody, TransferReportResponse};

/// Execute a transfer
///
/// POST /transfer
///
/// Business failures (missing accounts, store faults mid-transfer) still
/// return 200; the report's `error` field carries them.
#[utoipa::path(
    post,
    path = "/transfer",
    request_body = TransferBody,
    responses(
        (status = 200, description = "Transfer attempted, see `error` for the outcome", body = TransferReportResponse),
        (status = 400, description = "Malformed body or non-positive amount", body = ErrorResponse),
        (status = 500, description = "Account store unavailable", body = ErrorResponse)
    ),
    tag = "Transfer"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TransferBody>, JsonRejection>,
) -> Result<Json<TransferReportResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| {
        tracing::warn!(error = %e, "Rejected transfer request body");
        ApiError::bad_request("Invalid input parameters")
    })?;

    if body.amount <= 0 {
        return Err(ApiError::bad_request("Invalid input parameters"));
    }

    let report = state.engine.transfer(body.into()).await.map_err(|e| {
        tracing::error!(error = %e, "Transfer could not run");
        ApiError::from(e)
    })?;

    Ok(Json(report.into()))
}
