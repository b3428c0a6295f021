//! Request-validation tests for the REST surface.
//!
//! Every request here is rejected before any database statement runs, so the
//! router is exercised over a lazily-connected pool with no PostgreSQL behind
//! it. Database-backed flows live in `lifecycle_integration_tests`.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use tasktree_core::config::AppConfig;
use tasktree_core::database::DatabaseConnection;
use tasktree_core::web::{create_app, AppState};

fn test_app() -> Router {
    let config = AppConfig::default();
    let database = DatabaseConnection::from_config_lazy(&config).expect("lazy pool");
    let state = AppState::new(config, database.pool().clone());
    create_app(state)
}

fn json_request(method: &str, uri: &str, body: Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?)
}

async fn send(request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let response = test_app().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn liveness_probe_works_without_a_database() -> anyhow::Result<()> {
    let request = Request::builder()
        .uri("/health/live")
        .body(Body::empty())?;
    let (status, body) = send(request).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
    Ok(())
}

#[tokio::test]
async fn basic_health_reports_ok() -> anyhow::Result<()> {
    let request = Request::builder().uri("/health").body(Body::empty())?;
    let (status, body) = send(request).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn project_creation_requires_a_name() -> anyhow::Result<()> {
    let (status, body) = send(json_request("POST", "/v1/projects", json!({}))?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(error_message(&body), "Missing required field: name");
    Ok(())
}

#[tokio::test]
async fn project_creation_names_each_missing_required_field() -> anyhow::Result<()> {
    for field in ["user_id", "name", "start_date", "end_date", "workspace_id"] {
        let mut payload = json!({
            "workspace_id": Uuid::now_v7().to_string(),
            "user_id": Uuid::now_v7().to_string(),
            "name": "Site relaunch",
            "start_date": "2025-03-01 09:00:00",
            "end_date": "2025-06-30 18:00:00",
        });
        payload
            .as_object_mut()
            .expect("object payload")
            .remove(field);

        let (status, body) = send(json_request("POST", "/v1/projects", payload)?).await?;

        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {field}");
        assert_eq!(
            error_message(&body),
            format!("Missing required field: {field}"),
        );
    }
    Ok(())
}

#[tokio::test]
async fn project_creation_rejects_a_malformed_workspace_id() -> anyhow::Result<()> {
    let payload = json!({
        "name": "Site relaunch",
        "workspace_id": "not-a-uuid",
    });
    let (status, body) = send(json_request("POST", "/v1/projects", payload)?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Invalid workspace_id UUID format");
    Ok(())
}

#[tokio::test]
async fn project_creation_rejects_a_malformed_start_date() -> anyhow::Result<()> {
    let payload = json!({
        "name": "Site relaunch",
        "workspace_id": Uuid::now_v7().to_string(),
        "user_id": Uuid::now_v7().to_string(),
        "start_date": "03/01/2025",
        "end_date": "2025-06-30 00:00:00",
    });
    let (status, body) = send(json_request("POST", "/v1/projects", payload)?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error_message(&body),
        "Invalid start_date format, expected YYYY-MM-DD HH:MM:SS"
    );
    Ok(())
}

#[tokio::test]
async fn project_creation_rejects_malformed_json() -> anyhow::Result<()> {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/projects")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let (status, body) = send(request).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    Ok(())
}

#[tokio::test]
async fn project_path_id_must_be_a_uuid() -> anyhow::Result<()> {
    let request = Request::builder()
        .uri("/v1/projects/not-a-uuid")
        .body(Body::empty())?;
    let (status, body) = send(request).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Invalid project UUID format");
    Ok(())
}

#[tokio::test]
async fn empty_project_patch_is_rejected() -> anyhow::Result<()> {
    let uri = format!("/v1/projects/{}", Uuid::now_v7());
    let (status, body) = send(json_request("PATCH", &uri, json!({}))?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Update payload cannot be empty");
    Ok(())
}

#[tokio::test]
async fn task_creation_requires_a_task_level() -> anyhow::Result<()> {
    let payload = json!({ "name": "Draft copy" });
    let (status, body) = send(json_request("POST", "/v1/tasks", payload)?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Missing required field: task_level");
    Ok(())
}

#[tokio::test]
async fn task_creation_rejects_an_empty_name() -> anyhow::Result<()> {
    let payload = json!({ "name": "", "task_level": 1 });
    let (status, body) = send(json_request("POST", "/v1/tasks", payload)?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Task name cannot be empty");
    Ok(())
}

#[tokio::test]
async fn task_creation_rejects_an_unsupported_level() -> anyhow::Result<()> {
    let payload = json!({
        "name": "Draft copy",
        "task_level": 0,
        "workspace_id": Uuid::now_v7().to_string(),
        "user_id": Uuid::now_v7().to_string(),
        "project_id": Uuid::now_v7().to_string(),
    });
    let (status, body) = send(json_request("POST", "/v1/tasks", payload)?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Unsupported task level: 0");
    Ok(())
}

#[tokio::test]
async fn root_task_cannot_carry_a_parent() -> anyhow::Result<()> {
    let payload = json!({
        "name": "Draft copy",
        "task_level": 1,
        "workspace_id": Uuid::now_v7().to_string(),
        "user_id": Uuid::now_v7().to_string(),
        "project_id": Uuid::now_v7().to_string(),
        "parent_id": Uuid::now_v7().to_string(),
    });
    let (status, body) = send(json_request("POST", "/v1/tasks", payload)?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "A level 1 task cannot have a parent");
    Ok(())
}

#[tokio::test]
async fn child_task_without_a_parent_reports_missing_parent() -> anyhow::Result<()> {
    let payload = json!({
        "name": "Draft copy",
        "task_level": 2,
        "workspace_id": Uuid::now_v7().to_string(),
        "user_id": Uuid::now_v7().to_string(),
        "project_id": Uuid::now_v7().to_string(),
    });
    let (status, body) = send(json_request("POST", "/v1/tasks", payload)?).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(error_message(&body), "Parent task not found");
    Ok(())
}

#[tokio::test]
async fn task_creation_rejects_a_malformed_parent_id() -> anyhow::Result<()> {
    let payload = json!({
        "name": "Draft copy",
        "task_level": 2,
        "workspace_id": Uuid::now_v7().to_string(),
        "user_id": Uuid::now_v7().to_string(),
        "project_id": Uuid::now_v7().to_string(),
        "parent_id": "nope",
    });
    let (status, body) = send(json_request("POST", "/v1/tasks", payload)?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Invalid parent_id UUID format");
    Ok(())
}

#[tokio::test]
async fn task_creation_rejects_a_type_mismatched_level() -> anyhow::Result<()> {
    let payload = json!({ "name": "Draft copy", "task_level": "two" });
    let (status, body) = send(json_request("POST", "/v1/tasks", payload)?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(error_message(&body).contains("task_level"));
    Ok(())
}

#[tokio::test]
async fn task_patch_rejects_malformed_json() -> anyhow::Result<()> {
    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/v1/tasks/{}", Uuid::now_v7()))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let (status, body) = send(request).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    Ok(())
}

#[tokio::test]
async fn task_path_id_must_be_a_uuid() -> anyhow::Result<()> {
    let request = Request::builder()
        .method("DELETE")
        .uri("/v1/tasks/abc")
        .body(Body::empty())?;
    let (status, body) = send(request).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Invalid task UUID format");
    Ok(())
}

#[tokio::test]
async fn unknown_routes_fall_through_to_404() -> anyhow::Result<()> {
    let request = Request::builder()
        .uri("/v1/widgets")
        .body(Body::empty())?;
    let (status, _body) = send(request).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
