//! tx_demo - transfer demo server
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────────┐
//! │  Config  │───▶│  Store   │───▶│  Engine  │───▶│ HTTP Gateway │
//! │  (YAML)  │    │ (PG/mem) │    │          │    │   (axum)     │
//! └──────────┘    └──────────┘    └──────────┘    └──────────────┘
//! ```
//!
//! Flags: `--env <name>` (config/<name>.yaml), `--port <n>`, `--memory`.

use std::sync::Arc;

use anyhow::Context;
use tx_demo::account::{AccountStore, MemoryAccountStore, PgAccountStore};
use tx_demo::config::{AppConfig, StoreBackend};
use tx_demo::db::Database;
use tx_demo::gateway::{self, AppState};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

fn use_memory_store() -> bool {
    std::env::args().any(|a| a == "--memory")
}

async fn build_store(app_config: &AppConfig) -> anyhow::Result<Arc<dyn AccountStore>> {
    let backend = if use_memory_store() {
        StoreBackend::Memory
    } else {
        app_config.store
    };

    match backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory account store");
            Ok(Arc::new(MemoryAccountStore::with_baseline()))
        }
        StoreBackend::Postgres => {
            tracing::info!(config = ?app_config.database, "Connecting to PostgreSQL");
            let db = Database::connect(&app_config.database)
                .await
                .context("Failed to connect to PostgreSQL")?;
            let store = PgAccountStore::new(db.pool().clone());
            store
                .ensure_schema()
                .await
                .context("Failed to initialize accounts table")?;
            Ok(Arc::new(store))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = tx_demo::logging::init_logging(&app_config);

    tracing::info!("Starting tx_demo in {} mode (build {})", env, env!("GIT_HASH"));

    let store = build_store(&app_config).await?;
    let state = Arc::new(AppState::new(store));

    let port = get_port_override().unwrap_or(app_config.gateway.port);
    gateway::run_server(&app_config.gateway.host, port, state)
        .await
        .context("Gateway server error")?;
    Ok(())
}
