use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config yaml {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    pub database: DatabaseConfig,
    /// Which account store backs the engine
    pub store: StoreBackend,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

/// PostgreSQL connection settings.
///
/// Every field can be overridden from the environment (`DB_HOST`, `DB_USER`,
/// `DB_PASS`, `DB_NAME`, `DB_PORT`).
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "tx_demo.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
            gateway: GatewayConfig::default(),
            database: DatabaseConfig::default(),
            store: StoreBackend::Postgres,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            user: "user".to_string(),
            password: "password".to_string(),
            database: "tx_demo".to_string(),
            port: 5432,
            max_connections: 10,
            acquire_timeout_secs: 5,
        }
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("port", &self.port)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

impl DatabaseConfig {
    /// Apply `DB_*` overrides through `lookup` (normally `std::env::var`).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("DB_HOST") {
            self.host = v;
        }
        if let Some(v) = lookup("DB_USER") {
            self.user = v;
        }
        if let Some(v) = lookup("DB_PASS") {
            self.password = v;
        }
        if let Some(v) = lookup("DB_NAME") {
            self.database = v;
        }
        if let Some(v) = lookup("DB_PORT") {
            self.port = v.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "DB_PORT",
                value: v,
            })?;
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load `config/<env>.yaml`, falling back to defaults when the file is
    /// absent, then apply environment overrides.
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        let config_path = format!("config/{}.yaml", env);
        let mut config = if Path::new(&config_path).exists() {
            let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                path: config_path.clone(),
                source,
            })?;
            Self::from_yaml(&config_path, &content)?
        } else {
            Self::default()
        };

        config.database.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_yaml(path: &str, content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_local_dev_setup() {
        let config = AppConfig::default();
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.user, "user");
        assert_eq!(config.database.password, "password");
        assert_eq!(config.database.database, "tx_demo");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.store, StoreBackend::Postgres);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "log_level: debug\ngateway:\n  port: 8080\nstore: memory\n";
        let config = AppConfig::from_yaml("inline", yaml).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.gateway.host, "0.0.0.0");
        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.database.database, "tx_demo");
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let err = AppConfig::from_yaml("inline", "gateway: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("DB_HOST", "db.internal"),
            ("DB_PASS", "s3cret"),
            ("DB_PORT", "6543"),
        ]
        .into_iter()
        .collect();

        let mut db = DatabaseConfig::default();
        db.apply_env(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(db.host, "db.internal");
        assert_eq!(db.user, "user");
        assert_eq!(db.password, "s3cret");
        assert_eq!(db.port, 6543);
    }

    #[test]
    fn test_env_bad_port() {
        let mut db = DatabaseConfig::default();
        let err = db
            .apply_env(|k| (k == "DB_PORT").then(|| "not-a-port".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: "DB_PORT", .. }));
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", DatabaseConfig::default());
        assert!(!rendered.contains("\"password\""));
        assert!(rendered.contains("***"));
    }
}
