//! Health check handler

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use utoipa::ToSchema;

use super::super::state::AppState;

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    /// Account store backend
    #[schema(example = "postgres")]
    pub store: String,
    /// Git revision the binary was built from
    pub build: String,
}

/// Health check endpoint
///
/// Opens a session and reads the accounts table.
///
/// - Healthy: 200 OK + `{status: "ok"}`
/// - Unhealthy: 503 Service Unavailable + `{status: "unavailable"}`
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Account store unreachable", body = HealthResponse)
    ),
    tag = "System"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (code, status) = match state.engine.accounts().await {
        Ok(_) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::error!("[HEALTH] Account store check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            store: state.store_name().to_string(),
            build: env!("GIT_HASH").to_string(),
        }),
    )
}
