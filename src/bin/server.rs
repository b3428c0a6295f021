//! # TaskTree Server
//!
//! Thin wrapper binary for running the project/task hierarchy API as a
//! standalone HTTP server. This is the production deployment target.
//!
//! ## Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin server
//!
//! # Run with a specific environment
//! TASKTREE_ENV=production DATABASE_URL=postgres://... cargo run --bin server
//! ```

use tokio::signal;
use tracing::info;

use tasktree_core::config::AppConfig;
use tasktree_core::database::{run_migrations, DatabaseConnection};
use tasktree_core::logging;
use tasktree_core::web::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    logging::init_logging(&config.environment);

    info!("🚀 Starting TaskTree server...");
    info!("   Version: {}", env!("CARGO_PKG_VERSION"));
    info!("   Environment: {}", config.environment);

    let database = DatabaseConnection::from_config(&config)
        .await
        .map_err(|e| format!("Failed to connect to database: {e}"))?;

    run_migrations(database.pool())
        .await
        .map_err(|e| format!("Failed to run migrations: {e}"))?;

    let bind_address = config.bind_address.clone();
    let state = AppState::new(config, database.pool().clone());
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| format!("Failed to bind to {bind_address}: {e}"))?;

    info!("   Listening on {bind_address}");
    info!("   Ctrl+C stops the server gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database.close().await;
    info!("👋 Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
