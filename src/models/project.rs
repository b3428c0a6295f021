//! # Project Model
//!
//! Top-level container that owns a four-level task hierarchy.
//!
//! ## Overview
//!
//! A `Project` groups every task row of one hierarchy under a single owner
//! and workspace. Deleting a project cascades over its tasks inside one
//! transaction; that orchestration lives in the service layer, this module
//! only maps rows.
//!
//! ## Database Schema
//!
//! Maps to the `projects` table:
//! - `project_id`: Primary key (UUID v7, generated before insert)
//! - `user_id` / `workspace_id`: Owning user and workspace (UUID)
//! - `start_date` / `end_date`: Schedule bounds (TIMESTAMP(0))
//! - `est_hours` / `act_hours`: Estimated and actual effort (DOUBLE PRECISION)

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::utils::serde::{datetime, datetime_option, double_option, now_at_second_precision};

/// A project row.
///
/// Timestamps serialize in the fixed `"YYYY-MM-DD HH:MM:SS"` wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub project_id: Uuid,
    pub workspace_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "datetime")]
    pub start_date: NaiveDateTime,
    #[serde(with = "datetime")]
    pub end_date: NaiveDateTime,
    pub est_hours: f64,
    pub act_hours: f64,
    #[serde(with = "datetime")]
    pub created_at: NaiveDateTime,
    #[serde(with = "datetime")]
    pub updated_at: NaiveDateTime,
}

/// New project for creation (without generated fields).
///
/// Required fields have already been validated by the transport layer;
/// optional effort fields default to zero.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub workspace_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub est_hours: Option<f64>,
    pub act_hours: Option<f64>,
}

/// Partial update for a project.
///
/// Absent fields are left untouched. `description` is nullable, so it uses
/// the double-`Option` pattern: `Some(None)` clears the column, `None`
/// leaves it alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, with = "datetime_option")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, with = "datetime_option")]
    pub end_date: Option<NaiveDateTime>,
    pub est_hours: Option<f64>,
    pub act_hours: Option<f64>,
}

impl ProjectPatch {
    /// True when no field is present, i.e. the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.est_hours.is_none()
            && self.act_hours.is_none()
    }
}

const PROJECT_COLUMNS: &str = "project_id, workspace_id, user_id, name, description, \
     start_date, end_date, est_hours, act_hours, created_at, updated_at";

impl Project {
    /// Insert a new project and return the stored row.
    pub async fn create(pool: &PgPool, new_project: NewProject) -> Result<Project, sqlx::Error> {
        let now = now_at_second_precision();
        let sql = format!(
            "INSERT INTO projects ({PROJECT_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&sql)
            .bind(Uuid::now_v7())
            .bind(new_project.workspace_id)
            .bind(new_project.user_id)
            .bind(&new_project.name)
            .bind(&new_project.description)
            .bind(new_project.start_date)
            .bind(new_project.end_date)
            .bind(new_project.est_hours.unwrap_or(0.0))
            .bind(new_project.act_hours.unwrap_or(0.0))
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE project_id = $1");
        sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by ID inside an open transaction.
    pub async fn find_by_id_with_transaction(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<Project>, sqlx::Error> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE project_id = $1");
        sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List all projects, oldest first; ids break same-second ties.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at ASC, project_id ASC"
        );
        sqlx::query_as::<_, Project>(&sql).fetch_all(pool).await
    }

    /// Write every mutable column of `project` back to its row.
    pub async fn update_with_transaction(
        tx: &mut Transaction<'_, Postgres>,
        project: &Project,
    ) -> Result<Project, sqlx::Error> {
        let sql = format!(
            "UPDATE projects
             SET name = $2, description = $3, start_date = $4, end_date = $5,
                 est_hours = $6, act_hours = $7, updated_at = $8
             WHERE project_id = $1
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&sql)
            .bind(project.project_id)
            .bind(&project.name)
            .bind(&project.description)
            .bind(project.start_date)
            .bind(project.end_date)
            .bind(project.est_hours)
            .bind(project.act_hours)
            .bind(project.updated_at)
            .fetch_one(&mut **tx)
            .await
    }

    /// Delete the project row, returning how many rows went away (0 or 1).
    pub async fn delete_with_transaction(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE project_id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
