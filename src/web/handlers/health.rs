//! # Health Check Handlers
//!
//! Liveness and readiness probes suitable for container orchestration;
//! readiness verifies database connectivity before reporting healthy.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, error};

use crate::web::state::AppState;

/// Basic health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
}

/// Readiness probe response with per-subsystem checks
#[derive(Serialize)]
pub struct DetailedHealthResponse {
    status: String,
    timestamp: String,
    checks: HashMap<String, HealthCheck>,
    info: HealthInfo,
}

/// Individual health check result
#[derive(Serialize)]
pub struct HealthCheck {
    status: String,
    message: Option<String>,
    duration_ms: u64,
}

/// System information for the readiness probe
#[derive(Serialize)]
pub struct HealthInfo {
    version: String,
    environment: String,
    database_pool_size: u32,
}

/// Basic health check endpoint: GET /health
///
/// Reports ok whenever the process is serving requests. Does not consult
/// any dependency, so it stays green during a database outage.
pub async fn basic_health(_state: State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Kubernetes liveness probe: GET /health/live
///
/// Indicates whether the process is responsive. Does not touch the database,
/// so a database outage never triggers a restart loop.
pub async fn liveness_probe(_state: State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "alive".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Kubernetes readiness probe: GET /health/ready
///
/// Reports whether traffic should be routed here. Runs a database probe
/// and answers 503 until it succeeds.
pub async fn readiness_probe(State(state): State<AppState>) -> impl IntoResponse {
    debug!("Performing readiness probe");

    let mut checks = HashMap::new();

    let db_check = check_database_health(&state).await;
    let overall_healthy = db_check.status == "healthy";
    checks.insert("database".to_string(), db_check);

    let response = DetailedHealthResponse {
        status: if overall_healthy {
            "ready"
        } else {
            "not_ready"
        }
        .to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        checks,
        info: create_health_info(&state),
    };

    let status_code = if overall_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

async fn check_database_health(state: &AppState) -> HealthCheck {
    let start = std::time::Instant::now();

    match sqlx::query("SELECT 1").fetch_one(&state.pool).await {
        Ok(_) => HealthCheck {
            status: "healthy".to_string(),
            message: None,
            duration_ms: start.elapsed().as_millis() as u64,
        },
        Err(e) => {
            error!(error = %e, "Database health check failed");
            HealthCheck {
                status: "unhealthy".to_string(),
                message: Some(format!("Database connection failed: {e}")),
                duration_ms: start.elapsed().as_millis() as u64,
            }
        }
    }
}

fn create_health_info(state: &AppState) -> HealthInfo {
    HealthInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        database_pool_size: state.pool.size(),
    }
}
