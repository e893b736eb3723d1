//! API configuration
//!
//! Values are read from `API_`-prefixed environment variables (for example
//! `API_PORT=9090` or `API_STORAGE=memory`). Unset values fall back to
//! [`ApiConfig::default`].

use serde::{Deserialize, Serialize};

/// Storage adapter backing the customer service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// PostgreSQL via `infra_db`
    #[default]
    Postgres,
    /// Process-local tables; contents are lost on shutdown
    Memory,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Storage backend
    pub storage: StorageBackend,
    /// Maximum number of pooled database connections
    pub max_connections: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/customers".to_string(),
            log_level: "info".to_string(),
            storage: StorageBackend::Postgres,
            max_connections: 10,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
