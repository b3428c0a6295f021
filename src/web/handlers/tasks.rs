//! # Task Handlers
//!
//! HTTP handlers for task creation, partial update, and cascading delete
//! across the four-level hierarchy.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::{parse_datetime_field, parse_uuid_field, require};
use crate::models::{NewTask, Task, TaskPatch};
use crate::web::response_types::{ApiError, ApiResult};
use crate::web::state::AppState;

/// Request payload for task creation.
///
/// Identifier and date fields arrive as strings and are parsed explicitly
/// so a malformed value surfaces a named 400 instead of a serde rejection.
/// `parent_id` is required for every level except the top one; the service
/// enforces that rule together with the level arithmetic.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub workspace_id: Option<String>,
    pub user_id: Option<String>,
    pub project_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub task_level: Option<i32>,
    pub parent_id: Option<String>,
    pub status: Option<String>,
    pub assignee1_id: Option<String>,
    pub assignee2_id: Option<String>,
    pub assignee3_id: Option<String>,
    pub est_hours: Option<f64>,
    pub act_hours: Option<f64>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub comments: Option<String>,
    pub task_type: Option<String>,
    pub info: Option<serde_json::Value>,
}

/// Response for a task-level cascading delete
#[derive(Debug, Serialize)]
pub struct TaskDeletionResponse {
    pub task_id: Uuid,
    pub deleted: u64,
}

/// List all tasks across projects: GET /v1/tasks
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state
        .task_lifecycle
        .list_tasks()
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(tasks))
}

/// Create a new task at any hierarchy level: POST /v1/tasks
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let name = require(request.name, "name")?;
    let task_level = require(request.task_level, "task_level")?;
    info!(task_name = %name, task_level, "Creating new task via web API");

    if name.is_empty() {
        return Err(ApiError::bad_request("Task name cannot be empty"));
    }

    let workspace_id =
        parse_uuid_field(&require(request.workspace_id, "workspace_id")?, "workspace_id")?;
    let user_id = parse_uuid_field(&require(request.user_id, "user_id")?, "user_id")?;
    let project_id =
        parse_uuid_field(&require(request.project_id, "project_id")?, "project_id")?;
    let parent_id = parse_optional_uuid(request.parent_id.as_deref(), "parent_id")?;
    let assignee1_id = parse_optional_uuid(request.assignee1_id.as_deref(), "assignee1_id")?;
    let assignee2_id = parse_optional_uuid(request.assignee2_id.as_deref(), "assignee2_id")?;
    let assignee3_id = parse_optional_uuid(request.assignee3_id.as_deref(), "assignee3_id")?;
    let due_date = request
        .due_date
        .as_deref()
        .map(|raw| parse_datetime_field(raw, "due_date"))
        .transpose()?;

    let new_task = NewTask {
        workspace_id,
        user_id,
        project_id,
        name,
        description: request.description,
        task_level,
        parent_id,
        status: request.status,
        assignee1_id,
        assignee2_id,
        assignee3_id,
        est_hours: request.est_hours,
        act_hours: request.act_hours,
        priority: request.priority,
        due_date,
        comments: request.comments,
        task_type: request.task_type,
        info: request.info,
    };

    let task = state
        .task_lifecycle
        .create_task(new_task)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Partially update a task: PATCH /v1/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    payload: Result<Json<TaskPatch>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let id = parse_uuid_field(&task_id, "task")?;
    let Json(patch) =
        payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    info!(task_id = %id, "Updating task via web API");

    let task = state
        .task_lifecycle
        .update_task(id, patch)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(task))
}

/// Delete a task and its whole subtree: DELETE /v1/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> ApiResult<Json<TaskDeletionResponse>> {
    let id = parse_uuid_field(&task_id, "task")?;

    let deleted = state
        .task_lifecycle
        .delete_task(id)
        .await
        .map_err(|e| state.api_error(e))?;

    info!(task_id = %id, deleted, "Deleted task subtree via web API");

    Ok(Json(TaskDeletionResponse {
        task_id: id,
        deleted,
    }))
}

fn parse_optional_uuid(raw: Option<&str>, field: &str) -> ApiResult<Option<Uuid>> {
    raw.map(|value| parse_uuid_field(value, field)).transpose()
}
