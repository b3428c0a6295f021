//! # Web API Error Responses
//!
//! Maps core errors onto HTTP status codes and a uniform JSON error envelope.
//! Uses thiserror for the error enum and Axum's IntoResponse for the conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::error::TaskTreeError;

/// Errors the web surface can return, each tied to an HTTP status
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("Internal server error")]
    Internal { detail: Option<String> },
}

impl ApiError {
    /// NotFound with the given message
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// BadRequest with the given message
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create an Internal error; `detail` is only ever emitted outside
    /// production.
    pub fn internal(detail: Option<String>) -> Self {
        Self::Internal { detail }
    }

    /// Map a service-layer error onto its HTTP surface.
    ///
    /// `expose_detail` decides whether store faults carry a diagnostic
    /// detail string in the body; production deployments suppress it.
    pub fn from_service_error(error: TaskTreeError, expose_detail: bool) -> Self {
        match error {
            TaskTreeError::ProjectNotFound(_)
            | TaskTreeError::TaskNotFound(_)
            | TaskTreeError::ParentNotFound => Self::NotFound {
                message: error.to_string(),
            },
            TaskTreeError::InvalidRequest(message) => Self::BadRequest { message },
            TaskTreeError::Configuration(_) | TaskTreeError::Database(_) => Self::Internal {
                detail: expose_detail.then(|| error.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_code, message, detail) = match &self {
            ApiError::NotFound { message } => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", message.as_str(), None)
            }

            ApiError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message.as_str(), None)
            }

            ApiError::Internal { detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error",
                detail.as_deref(),
            ),
        };

        let mut error_body = json!({
            "code": error_code,
            "message": message
        });
        if let Some(detail) = detail {
            error_body["detail"] = json!(detail);
        }

        (status_code, Json(json!({ "error": error_body }))).into_response()
    }
}

/// UUID parse failures surface as bad requests
impl From<uuid::Error> for ApiError {
    fn from(_: uuid::Error) -> Self {
        ApiError::bad_request("Invalid UUID format")
    }
}

/// Handler result alias
pub type ApiResult<T> = Result<T, ApiError>;
