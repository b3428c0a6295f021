//! # Web API Application State
//!
//! Shared state for the web API: runtime configuration, the database pool,
//! and the two domain services.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::config::AppConfig;
use crate::error::TaskTreeError;
use crate::services::{ProjectAggregate, TaskLifecycle};
use crate::web::response_types::ApiError;

/// Shared application state for the web API
///
/// Cloned per request; the services share the one pool.
#[derive(Clone)]
pub struct AppState {
    /// Runtime configuration
    pub config: Arc<AppConfig>,

    /// Shared database pool
    pub pool: PgPool,

    /// Task mutation service
    pub task_lifecycle: Arc<TaskLifecycle>,

    /// Project read/write service
    pub project_aggregate: Arc<ProjectAggregate>,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        info!(environment = %config.environment, "Creating web application state");
        Self {
            config: Arc::new(config),
            task_lifecycle: Arc::new(TaskLifecycle::new(pool.clone())),
            project_aggregate: Arc::new(ProjectAggregate::new(pool.clone())),
            pool,
        }
    }

    /// Whether server errors should carry a diagnostic detail string;
    /// production deployments suppress it.
    pub fn expose_error_detail(&self) -> bool {
        !self.config.is_production()
    }

    /// Map a service error onto the HTTP surface with this deployment's
    /// detail policy.
    pub fn api_error(&self, error: TaskTreeError) -> ApiError {
        ApiError::from_service_error(error, self.expose_error_detail())
    }
}
