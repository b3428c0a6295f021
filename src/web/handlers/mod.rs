//! # Web API Request Handlers
//!
//! HTTP request handlers grouped by resource, plus the small field-parsing
//! helpers the project and task handlers share.

pub mod health;
pub mod projects;
pub mod tasks;

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::utils::serde::parse_datetime;
use crate::web::response_types::{ApiError, ApiResult};

/// Unwraps a required request field, rejecting its absence with a named 400.
pub(crate) fn require<T>(value: Option<T>, field: &str) -> ApiResult<T> {
    value.ok_or_else(|| ApiError::bad_request(format!("Missing required field: {field}")))
}

/// Parses a UUID carried as a JSON string or path segment.
pub(crate) fn parse_uuid_field(raw: &str, field: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid {field} UUID format")))
}

/// Parses a wire-format datetime field.
pub(crate) fn parse_datetime_field(raw: &str, field: &str) -> ApiResult<NaiveDateTime> {
    parse_datetime(raw).map_err(|_| {
        ApiError::bad_request(format!(
            "Invalid {field} format, expected YYYY-MM-DD HH:MM:SS"
        ))
    })
}
