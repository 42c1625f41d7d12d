pub mod error;
pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;
pub use state::AppState;

/// Build the application router
///
/// Every route is served both at the root and under `/api`.
pub fn create_app(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/transfer", post(handlers::create_transfer))
        .route("/reset", post(handlers::reset_accounts))
        .route("/accounts", get(handlers::list_accounts))
        .route("/health", get(handlers::health_check));

    Router::new()
        .merge(api_routes.clone())
        .nest("/api", api_routes)
        .with_state(state)
        // OpenAPI / Swagger UI (stateless, added after with_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Start HTTP Gateway server
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> std::io::Result<()> {
    let app = create_app(state);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        tracing::error!(
            "Failed to bind to {}: {} (port {} may already be in use)",
            addr,
            e,
            port
        );
        e
    })?;

    println!("🚀 Gateway listening on http://{}", addr);
    println!("📖 API Docs: http://{}/docs", addr);
    tracing::info!(%addr, "Gateway started");

    axum::serve(listener, app).await
}
