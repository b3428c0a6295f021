//! # Project Aggregate Reader/Writer
//!
//! Composes projects with their tasks for single-entity reads and
//! post-update reads, and owns the project-level cascade delete. Plain CRUD
//! (create, list) delegates straight to the model layer.
//!
//! Two read shapes exist side by side: the plain read attaches tasks as a
//! flat list, while the update response carries the fully nested tree. Both
//! shapes are long-standing observable behavior and are kept as they are.

use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::{Result, TaskTreeError};
use crate::hierarchy::{build_tree, TaskNode};
use crate::models::{NewProject, Project, ProjectPatch, Task};
use crate::utils::serde::now_at_second_precision;

/// A project with its tasks attached as a flat list (plain read shape).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectWithTasks {
    #[serde(flatten)]
    pub project: Project,
    pub tasks: Vec<Task>,
}

/// A project with its tasks attached as the nested tree (update response
/// shape).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectWithTree {
    #[serde(flatten)]
    pub project: Project,
    pub tasks: Vec<TaskNode>,
}

/// Service for project reads, writes, and the project-level cascade.
#[derive(Debug, Clone)]
pub struct ProjectAggregate {
    pool: PgPool,
}

impl ProjectAggregate {
    /// Create a new ProjectAggregate
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a project.
    #[instrument(skip(self, new_project), fields(name = %new_project.name))]
    pub async fn create_project(&self, new_project: NewProject) -> Result<Project> {
        let project = Project::create(&self.pool, new_project).await?;
        info!(project_id = %project.project_id, "Created project");
        Ok(project)
    }

    /// List every project, oldest first.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(Project::list(&self.pool).await?)
    }

    /// Fetch one project with all of its tasks as a flat list.
    #[instrument(skip(self), fields(project_id = %id))]
    pub async fn get_project_with_tasks(&self, id: Uuid) -> Result<ProjectWithTasks> {
        let project = Project::find_by_id(&self.pool, id)
            .await?
            .ok_or(TaskTreeError::ProjectNotFound(id))?;
        let tasks = Task::list_by_project(&self.pool, id).await?;
        Ok(ProjectWithTasks { project, tasks })
    }

    /// List all tasks of one project as a flat list.
    pub async fn list_project_tasks(&self, id: Uuid) -> Result<Vec<Task>> {
        Ok(Task::list_by_project(&self.pool, id).await?)
    }

    /// Apply a partial update to a project and return it with the full
    /// nested task tree.
    #[instrument(skip(self, patch), fields(project_id = %id))]
    pub async fn update_project(&self, id: Uuid, patch: ProjectPatch) -> Result<ProjectWithTree> {
        if patch.is_empty() {
            return Err(TaskTreeError::invalid_request(
                "Update payload cannot be empty",
            ));
        }

        let mut tx = self.pool.begin().await?;
        let current = Project::find_by_id_with_transaction(&mut tx, id)
            .await?
            .ok_or(TaskTreeError::ProjectNotFound(id))?;

        let updated = apply_patch(current, &patch);
        let stored = Project::update_with_transaction(&mut tx, &updated).await?;
        let tasks = Task::list_by_project_with_transaction(&mut tx, id).await?;
        tx.commit().await?;

        debug!(project_id = %id, "Updated project");
        Ok(ProjectWithTree {
            project: stored,
            tasks: build_tree(&tasks, None, 1),
        })
    }

    /// Delete a project and every task it owns, all-or-nothing.
    ///
    /// Tasks go first, then the project row; when the project row turns out
    /// to be absent the transaction is dropped uncommitted, so the task
    /// deletions roll back too. Returns the number of tasks deleted.
    #[instrument(skip(self), fields(project_id = %id))]
    pub async fn delete_project(&self, id: Uuid) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let deleted_tasks = Task::delete_by_project_with_transaction(&mut tx, id).await?;
        let removed = Project::delete_with_transaction(&mut tx, id).await?;
        if removed == 0 {
            return Err(TaskTreeError::ProjectNotFound(id));
        }
        tx.commit().await?;

        info!(project_id = %id, deleted_tasks, "Deleted project");
        Ok(deleted_tasks)
    }
}

fn apply_patch(mut project: Project, patch: &ProjectPatch) -> Project {
    if let Some(name) = &patch.name {
        project.name = name.clone();
    }
    if let Some(description) = &patch.description {
        project.description = description.clone();
    }
    if let Some(start_date) = patch.start_date {
        project.start_date = start_date;
    }
    if let Some(end_date) = patch.end_date {
        project.end_date = end_date;
    }
    if let Some(est_hours) = patch.est_hours {
        project.est_hours = est_hours;
    }
    if let Some(act_hours) = patch.act_hours {
        project.act_hours = act_hours;
    }
    project.updated_at = now_at_second_precision();
    project
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::serde::parse_datetime;

    fn project_fixture() -> Project {
        Project {
            project_id: Uuid::now_v7(),
            workspace_id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            name: "Initial".to_string(),
            description: Some("before".to_string()),
            start_date: parse_datetime("2025-07-01 09:00:00").unwrap(),
            end_date: parse_datetime("2025-09-30 18:00:00").unwrap(),
            est_hours: 100.0,
            act_hours: 5.0,
            created_at: parse_datetime("2025-06-20 12:00:00").unwrap(),
            updated_at: parse_datetime("2025-06-20 12:00:00").unwrap(),
        }
    }

    #[test]
    fn patch_updates_present_fields_only() {
        let project = project_fixture();
        let patch = ProjectPatch {
            name: Some("Renamed".to_string()),
            est_hours: Some(140.0),
            ..ProjectPatch::default()
        };

        let updated = apply_patch(project.clone(), &patch);
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.est_hours, 140.0);
        assert_eq!(updated.description, project.description);
        assert_eq!(updated.start_date, project.start_date);
        assert!(updated.updated_at >= project.updated_at);
    }

    #[test]
    fn patch_clears_description_on_explicit_null() {
        let project = project_fixture();
        let patch = ProjectPatch {
            description: Some(None),
            ..ProjectPatch::default()
        };

        let updated = apply_patch(project, &patch);
        assert_eq!(updated.description, None);
    }

    #[test]
    fn flat_read_shape_embeds_project_fields_at_top_level() {
        let aggregate = ProjectWithTasks {
            project: project_fixture(),
            tasks: Vec::new(),
        };
        let json = serde_json::to_value(&aggregate).unwrap();

        assert_eq!(json["name"], "Initial");
        assert!(json["tasks"].as_array().unwrap().is_empty());
        assert!(json.get("project").is_none());
    }
}
