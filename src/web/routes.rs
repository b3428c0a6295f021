//! # Web API Routes
//!
//! Route tables for the project, task, and health endpoints, composed into
//! the application router by [`crate::web::create_app`].

use axum::routing::{get, patch};
use axum::Router;

use crate::web::handlers;
use crate::web::state::AppState;

/// Health endpoints: basic, readiness, and liveness probes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::basic_health))
        .route("/health/ready", get(handlers::health::readiness_probe))
        .route("/health/live", get(handlers::health::liveness_probe))
}

/// Project CRUD, aggregate reads, and cascading delete
pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/projects",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route(
            "/v1/projects/{id}",
            get(handlers::projects::get_project)
                .patch(handlers::projects::update_project)
                .delete(handlers::projects::delete_project),
        )
        .route(
            "/v1/projects/{id}/tasks",
            get(handlers::projects::list_project_tasks),
        )
}

/// Task lifecycle routes across all hierarchy levels
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/tasks",
            get(handlers::tasks::list_tasks).post(handlers::tasks::create_task),
        )
        .route(
            "/v1/tasks/{id}",
            patch(handlers::tasks::update_task).delete(handlers::tasks::delete_task),
        )
}
