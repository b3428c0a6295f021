//! # Database Operations
//!
//! Connection management and schema migrations over SQLx/PostgreSQL.
//!
//! ## Key Components
//!
//! - [`connection`] - Pool construction sized from [`crate::config::AppConfig`]
//! - [`migrator`] - Embedded migrations for server startup and `#[sqlx::test]`
//!
//! Query execution itself lives with the models (`crate::models`); this
//! module only hands out pools and keeps the schema current.

pub mod connection;
pub mod migrator;

pub use connection::DatabaseConnection;
pub use migrator::{run_migrations, MIGRATOR};
