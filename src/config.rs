//! Environment-driven runtime configuration.
//!
//! Every knob has a sensible development default; production deployments
//! override through environment variables. Unparseable values fail startup
//! with a `Configuration` error rather than limping along on a default.

use crate::error::{Result, TaskTreeError};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string (`DATABASE_URL`).
    pub database_url: String,
    /// Socket address the HTTP server binds (`TASKTREE_BIND_ADDRESS`).
    pub bind_address: String,
    /// Deployment environment name (`TASKTREE_ENV`, falling back to
    /// `APP_ENV`). Controls log formatting and error-detail exposure.
    pub environment: String,
    /// Maximum pooled database connections (`TASKTREE_MAX_CONNECTIONS`).
    pub max_connections: u32,
    /// Pool acquire timeout in milliseconds (`TASKTREE_ACQUIRE_TIMEOUT_MS`).
    pub acquire_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "postgresql://localhost/tasktree_development".to_string(),
            bind_address: "0.0.0.0:3000".to_string(),
            environment: "development".to_string(),
            max_connections: 10,
            acquire_timeout_ms: 5_000,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(db_url) = std::env::var("DATABASE_URL") {
            config.database_url = db_url;
        }

        if let Ok(bind_address) = std::env::var("TASKTREE_BIND_ADDRESS") {
            config.bind_address = bind_address;
        }

        if let Ok(environment) = std::env::var("TASKTREE_ENV").or_else(|_| std::env::var("APP_ENV"))
        {
            config.environment = environment;
        }

        if let Ok(max_connections) = std::env::var("TASKTREE_MAX_CONNECTIONS") {
            config.max_connections = max_connections.parse().map_err(|e| {
                TaskTreeError::Configuration(format!("Invalid max_connections: {e}"))
            })?;
        }

        if let Ok(acquire_timeout) = std::env::var("TASKTREE_ACQUIRE_TIMEOUT_MS") {
            config.acquire_timeout_ms = acquire_timeout.parse().map_err(|e| {
                TaskTreeError::Configuration(format!("Invalid acquire_timeout_ms: {e}"))
            })?;
        }

        Ok(config)
    }

    /// Whether error responses should hide internal fault detail.
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
