#![allow(clippy::doc_markdown)] // PostgreSQL, SQLx etc. in docs without backticks
#![allow(clippy::missing_errors_doc)] // Result-returning fns document errors selectively
#![allow(clippy::must_use_candidate)] // plain accessors skip must_use

//! # TaskTree Core
//!
//! REST backend for hierarchical project planning data: projects own tasks,
//! tasks own subtasks, subtasks own action items, and action items own
//! sub-action items. All four levels live in a single relational `tasks`
//! table and carry ancestor pointers (`level1_id`..`level4_id`) that make
//! subtree queries and cascading deletes single-table operations.
//!
//! ## Architecture
//!
//! - **Models** own the SQL: each struct maps a table and exposes its own
//!   query methods over `sqlx`, with transaction-scoped variants for
//!   multi-statement operations.
//! - **Services** own the rules: hierarchy validation, ancestor pointer
//!   derivation, estimate history, and the fixed-point descendant closure
//!   used by cascading deletes.
//! - **Web** owns the HTTP surface: axum handlers, route grouping, and the
//!   JSON error envelope.
//!
//! ## Module Organization
//!
//! - [`models`] - Data layer for projects and the flattened task hierarchy
//! - [`services`] - Lifecycle services enforcing the hierarchy rules
//! - [`hierarchy`] - Ancestor pointers, tree assembly, lenient field codecs
//! - [`database`] - Connection pooling and embedded migrations
//! - [`web`] - REST API handlers, routes, and response types
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tasktree_core::config::AppConfig;
//! use tasktree_core::database::DatabaseConnection;
//! use tasktree_core::web::{create_app, AppState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let database = DatabaseConnection::from_config(&config).await?;
//!
//! let state = AppState::new(config, database.pool().clone());
//! let app = create_app(state);
//! // Hand `app` to axum::serve with a bound TcpListener.
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! Unit tests run without a database. Database-backed tests use SQLx native
//! testing, each against a freshly migrated throwaway database:
//!
//! ```bash
//! cargo test --lib                # Unit tests
//! cargo test -- --ignored         # Database-backed tests (needs DATABASE_URL)
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod hierarchy;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;
pub mod web;

pub use error::{Result, TaskTreeError};
pub use models::{NewProject, NewTask, Project, ProjectPatch, Task, TaskPatch};
pub use services::{ProjectAggregate, ProjectWithTasks, ProjectWithTree, TaskLifecycle};
