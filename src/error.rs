//! Crate-wide error taxonomy.
//!
//! Validation failures are detected before any mutation and carry enough
//! context for the transport layer to produce a precise status. Store-level
//! faults are wrapped as [`TaskTreeError::Database`]; the enclosing
//! transaction rolls back and the fault propagates unretried. Decode faults
//! on persisted `est_prev_hours`/`info` text are deliberately *not* part of
//! this taxonomy: the hierarchy codec recovers them locally with empty
//! defaults so read paths stay available.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TaskTreeError {
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    #[error("Task not found: {0}")]
    TaskNotFound(Uuid),

    #[error("Parent task not found")]
    ParentNotFound,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl TaskTreeError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

pub type Result<T> = std::result::Result<T, TaskTreeError>;
