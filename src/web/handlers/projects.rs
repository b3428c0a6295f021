//! # Project Handlers
//!
//! HTTP handlers for project CRUD, the flat aggregate read, and the
//! project-level cascading delete.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::{parse_datetime_field, parse_uuid_field, require};
use crate::models::{NewProject, Project, ProjectPatch, Task};
use crate::services::{ProjectWithTasks, ProjectWithTree};
use crate::web::response_types::{ApiError, ApiResult};
use crate::web::state::AppState;

/// Request payload for project creation.
///
/// Identifier and date fields arrive as strings and are parsed explicitly
/// so a malformed value surfaces a named 400 instead of a serde rejection.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub workspace_id: Option<String>,
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub est_hours: Option<f64>,
    pub act_hours: Option<f64>,
}

/// Response for a project-level cascading delete
#[derive(Debug, Serialize)]
pub struct ProjectDeletionResponse {
    pub project_id: Uuid,
    pub deleted_tasks: u64,
}

/// List all projects: GET /v1/projects
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    let projects = state
        .project_aggregate
        .list_projects()
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(projects))
}

/// Create a new project: POST /v1/projects
pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let name = require(request.name, "name")?;
    info!(project_name = %name, "Creating new project via web API");

    if name.is_empty() {
        return Err(ApiError::bad_request("Project name cannot be empty"));
    }

    let workspace_id =
        parse_uuid_field(&require(request.workspace_id, "workspace_id")?, "workspace_id")?;
    let user_id = parse_uuid_field(&require(request.user_id, "user_id")?, "user_id")?;
    let start_date =
        parse_datetime_field(&require(request.start_date, "start_date")?, "start_date")?;
    let end_date = parse_datetime_field(&require(request.end_date, "end_date")?, "end_date")?;

    let new_project = NewProject {
        workspace_id,
        user_id,
        name,
        description: request.description,
        start_date,
        end_date,
        est_hours: request.est_hours,
        act_hours: request.act_hours,
    };

    let project = state
        .project_aggregate
        .create_project(new_project)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// Get a project with its flat task list: GET /v1/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<ProjectWithTasks>> {
    let id = parse_uuid_field(&project_id, "project")?;

    let aggregate = state
        .project_aggregate
        .get_project_with_tasks(id)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(aggregate))
}

/// List the tasks of a project: GET /v1/projects/{id}/tasks
pub async fn list_project_tasks(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<Vec<Task>>> {
    let id = parse_uuid_field(&project_id, "project")?;

    let tasks = state
        .project_aggregate
        .list_project_tasks(id)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(tasks))
}

/// Partially update a project: PATCH /v1/projects/{id}
///
/// Returns the updated project with its tasks assembled into a nested tree.
pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    payload: Result<Json<ProjectPatch>, JsonRejection>,
) -> ApiResult<Json<ProjectWithTree>> {
    let id = parse_uuid_field(&project_id, "project")?;
    let Json(patch) =
        payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    info!(project_id = %id, "Updating project via web API");

    let aggregate = state
        .project_aggregate
        .update_project(id, patch)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(aggregate))
}

/// Delete a project and all its tasks: DELETE /v1/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<ProjectDeletionResponse>> {
    let id = parse_uuid_field(&project_id, "project")?;

    let deleted_tasks = state
        .project_aggregate
        .delete_project(id)
        .await
        .map_err(|e| state.api_error(e))?;

    info!(project_id = %id, deleted_tasks, "Deleted project via web API");

    Ok(Json(ProjectDeletionResponse {
        project_id: id,
        deleted_tasks,
    }))
}
