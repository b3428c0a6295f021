//! # Structured Logging Module
//!
//! Environment-aware tracing setup: JSON output for production, compact
//! human-readable output everywhere else. `RUST_LOG` always wins over the
//! environment-derived default level.

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize the global tracing subscriber once.
///
/// Safe to call repeatedly (and from parallel tests): the `OnceLock` guard
/// plus `try_init` mean a subscriber installed elsewhere is left in place.
pub fn init_logging(environment: &str) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_log_level(environment)));

        let already_set = if environment == "production" {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .json()
                .try_init()
                .is_err()
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .compact()
                .try_init()
                .is_err()
        };

        if already_set {
            tracing::debug!("global tracing subscriber already installed, keeping it");
        }
    });
}

fn default_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}
