//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:3000/docs`
//! - OpenAPI JSON: `http://localhost:3000/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::account::Account;
use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{
    ErrorResponse, ResetResponse, StepView, TransferBody, TransferReportResponse,
};
use crate::transfer::{ErrorKind, Scenario, StatementKind};

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Transaction Demo API",
        version = "0.1.0",
        description = "Runs the same fund transfer with and without a database transaction and reports what each statement did.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::transfer::create_transfer,
        crate::gateway::handlers::accounts::reset_accounts,
        crate::gateway::handlers::accounts::list_accounts,
        crate::gateway::handlers::health::health_check,
    ),
    components(
        schemas(
            Account,
            TransferBody,
            TransferReportResponse,
            StepView,
            StatementKind,
            Scenario,
            ErrorKind,
            ResetResponse,
            ErrorResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "Transfer", description = "Atomic and non-atomic transfers"),
        (name = "Accounts", description = "Account listing and baseline reset"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/transfer", "/reset", "/accounts", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_openapi_serializes() {
        let json = ApiDoc::openapi().to_json().expect("Failed to serialize OpenAPI");
        assert!(json.contains("TransferReportResponse"));
    }
}
