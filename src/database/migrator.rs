//! # Database Migration Support
//!
//! Embedded migrations for the `projects`/`tasks` schema.
//!
//! ## Usage
//!
//! ```rust,ignore
//! #[sqlx::test(migrator = "tasktree_core::database::migrator::MIGRATOR")]
//! async fn test_something(pool: PgPool) { /* ... */ }
//! ```

use sqlx::PgPool;
use tracing::info;

/// Migrator embedding everything under the root `migrations/` directory.
///
/// Used by the server at startup and by `#[sqlx::test]` to prepare
/// per-test databases.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Result type for migration operations
pub type MigrationResult<T> = Result<T, sqlx::migrate::MigrateError>;

/// Bring the connected database up to the current schema.
pub async fn run_migrations(pool: &PgPool) -> MigrationResult<()> {
    info!("Running database migrations");
    MIGRATOR.run(pool).await?;
    info!("Database migrations complete");
    Ok(())
}
