//! # Task Model
//!
//! Flat storage model for the four-level task hierarchy.
//!
//! ## Overview
//!
//! Every node of a project's tree (task, subtask, action item, sub-action
//! item) is one row in a single `tasks` table. The row carries its depth in
//! `task_level`, its immediate parent in `parent_id`, and one ancestor
//! pointer per level (`level1_id`..`level4_id`): the slot for the row's own
//! level self-references, shallower slots name the ancestors, deeper slots
//! stay NULL. Children of a parent at level L are found by matching the
//! parent's id against candidate rows' `levelL_id`.
//!
//! ## Key Columns
//!
//! Maps to the `tasks` table:
//! - `task_id`: Primary key (UUID v7, generated before insert so the
//!   self-referencing pointer is written in the same INSERT)
//! - `task_level`: Depth 1..=4
//! - `level1_id`..`level4_id`: Per-level ancestor pointers (UUID, NULL above
//!   the row's own level)
//! - `est_prev_hours` / `info`: TEXT holding serialized JSON, decoded
//!   best-effort on read (malformed text reads as empty, never an error)
//! - `due_date`: Optional TIMESTAMP(0)
//!
//! Structural columns (`task_level`, `parent_id`, the pointer slots) are
//! written once at insert and never patched; partial updates touch content
//! fields only.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::hierarchy::fields::{
    decode_est_prev_hours, decode_info, encode_est_prev_hours, encode_info,
};
use crate::utils::serde::{datetime, datetime_double_option, datetime_option, double_option};

/// A fully decoded task at any level of the hierarchy.
///
/// `est_prev_hours` and `info` are the decoded forms of the persisted text
/// columns. Timestamps serialize in the fixed `"YYYY-MM-DD HH:MM:SS"` wire
/// form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: Uuid,
    pub workspace_id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub task_level: i32,
    pub status: String,
    pub parent_id: Option<Uuid>,
    pub level1_id: Option<Uuid>,
    pub level2_id: Option<Uuid>,
    pub level3_id: Option<Uuid>,
    pub level4_id: Option<Uuid>,
    pub assignee1_id: Option<Uuid>,
    pub assignee2_id: Option<Uuid>,
    pub assignee3_id: Option<Uuid>,
    pub est_hours: f64,
    pub act_hours: f64,
    pub est_prev_hours: Vec<f64>,
    pub is_exceeded: bool,
    pub priority: String,
    #[serde(default, with = "datetime_option")]
    pub due_date: Option<NaiveDateTime>,
    pub comments: String,
    pub task_type: String,
    pub info: serde_json::Value,
    #[serde(with = "datetime")]
    pub created_at: NaiveDateTime,
    #[serde(with = "datetime")]
    pub updated_at: NaiveDateTime,
}

/// Raw `tasks` row as stored: history and info still serialized text.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub task_id: Uuid,
    pub workspace_id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub task_level: i32,
    pub status: String,
    pub parent_id: Option<Uuid>,
    pub level1_id: Option<Uuid>,
    pub level2_id: Option<Uuid>,
    pub level3_id: Option<Uuid>,
    pub level4_id: Option<Uuid>,
    pub assignee1_id: Option<Uuid>,
    pub assignee2_id: Option<Uuid>,
    pub assignee3_id: Option<Uuid>,
    pub est_hours: f64,
    pub act_hours: f64,
    pub est_prev_hours: String,
    pub is_exceeded: bool,
    pub priority: String,
    pub due_date: Option<NaiveDateTime>,
    pub comments: String,
    pub task_type: String,
    pub info: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TaskRow {
    /// Decode the text columns into their domain forms. Malformed persisted
    /// text degrades to the empty value instead of failing the read.
    pub fn into_task(self) -> Task {
        Task {
            task_id: self.task_id,
            workspace_id: self.workspace_id,
            user_id: self.user_id,
            project_id: self.project_id,
            name: self.name,
            description: self.description,
            task_level: self.task_level,
            status: self.status,
            parent_id: self.parent_id,
            level1_id: self.level1_id,
            level2_id: self.level2_id,
            level3_id: self.level3_id,
            level4_id: self.level4_id,
            assignee1_id: self.assignee1_id,
            assignee2_id: self.assignee2_id,
            assignee3_id: self.assignee3_id,
            est_hours: self.est_hours,
            act_hours: self.act_hours,
            est_prev_hours: decode_est_prev_hours(&self.est_prev_hours),
            is_exceeded: self.is_exceeded,
            priority: self.priority,
            due_date: self.due_date,
            comments: self.comments,
            task_type: self.task_type,
            info: decode_info(&self.info),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// New task for creation (without generated fields).
///
/// Required fields have already been validated by the transport layer; the
/// service resolves the parent, generates the id, and computes ancestor
/// pointers before the INSERT.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub workspace_id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub task_level: i32,
    pub parent_id: Option<Uuid>,
    pub status: Option<String>,
    pub assignee1_id: Option<Uuid>,
    pub assignee2_id: Option<Uuid>,
    pub assignee3_id: Option<Uuid>,
    pub est_hours: Option<f64>,
    pub act_hours: Option<f64>,
    pub priority: Option<String>,
    pub due_date: Option<NaiveDateTime>,
    pub comments: Option<String>,
    pub task_type: Option<String>,
    pub info: Option<serde_json::Value>,
}

/// Partial update for a task: the allow-listed content fields only.
///
/// Structure (level, parent, ancestor pointers) and `info` are fixed at
/// creation. Nullable columns use the double-`Option` pattern so a JSON
/// `null` clears them while an absent field leaves them alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub assignee1_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    pub assignee2_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    pub assignee3_id: Option<Option<Uuid>>,
    pub est_hours: Option<f64>,
    pub act_hours: Option<f64>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "datetime_double_option")]
    pub due_date: Option<Option<NaiveDateTime>>,
    pub comments: Option<String>,
    pub task_type: Option<String>,
    pub is_exceeded: Option<bool>,
}

impl TaskPatch {
    /// True when no field is present, i.e. the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.assignee1_id.is_none()
            && self.assignee2_id.is_none()
            && self.assignee3_id.is_none()
            && self.est_hours.is_none()
            && self.act_hours.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.comments.is_none()
            && self.task_type.is_none()
            && self.is_exceeded.is_none()
    }
}

const TASK_COLUMNS: &str = "task_id, workspace_id, user_id, project_id, name, description, \
     task_level, status, parent_id, level1_id, level2_id, level3_id, level4_id, \
     assignee1_id, assignee2_id, assignee3_id, est_hours, act_hours, est_prev_hours, \
     is_exceeded, priority, due_date, comments, task_type, info, created_at, updated_at";

impl Task {
    /// The ancestor pointer stored for `level`, `None` outside `1..=4`.
    pub fn ancestor_id(&self, level: i32) -> Option<Uuid> {
        match level {
            1 => self.level1_id,
            2 => self.level2_id,
            3 => self.level3_id,
            4 => self.level4_id,
            _ => None,
        }
    }

    /// Insert a fully built task row inside an open transaction and return
    /// the stored, decoded task.
    pub async fn insert_with_transaction(
        tx: &mut Transaction<'_, Postgres>,
        task: &Task,
    ) -> Result<Task, sqlx::Error> {
        let sql = format!(
            "INSERT INTO tasks ({TASK_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                     $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27)
             RETURNING {TASK_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(task.task_id)
            .bind(task.workspace_id)
            .bind(task.user_id)
            .bind(task.project_id)
            .bind(&task.name)
            .bind(&task.description)
            .bind(task.task_level)
            .bind(&task.status)
            .bind(task.parent_id)
            .bind(task.level1_id)
            .bind(task.level2_id)
            .bind(task.level3_id)
            .bind(task.level4_id)
            .bind(task.assignee1_id)
            .bind(task.assignee2_id)
            .bind(task.assignee3_id)
            .bind(task.est_hours)
            .bind(task.act_hours)
            .bind(encode_est_prev_hours(&task.est_prev_hours))
            .bind(task.is_exceeded)
            .bind(&task.priority)
            .bind(task.due_date)
            .bind(&task.comments)
            .bind(&task.task_type)
            .bind(encode_info(&task.info))
            .bind(task.created_at)
            .bind(task.updated_at)
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.into_task())
    }

    /// Find a task by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Task>, sqlx::Error> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE task_id = $1");
        let row = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(TaskRow::into_task))
    }

    /// Find a task by ID inside an open transaction.
    pub async fn find_by_id_with_transaction(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<Task>, sqlx::Error> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE task_id = $1");
        let row = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(row.map(TaskRow::into_task))
    }

    /// List every task, oldest first; ids break same-second ties.
    pub async fn list(pool: &PgPool) -> Result<Vec<Task>, sqlx::Error> {
        let sql =
            format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at ASC, task_id ASC");
        let rows = sqlx::query_as::<_, TaskRow>(&sql).fetch_all(pool).await?;
        Ok(rows.into_iter().map(TaskRow::into_task).collect())
    }

    /// List all tasks of one project, oldest first; ids break same-second
    /// ties.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = $1
             ORDER BY created_at ASC, task_id ASC"
        );
        let rows = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(project_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(TaskRow::into_task).collect())
    }

    /// List all tasks of one project inside an open transaction. Used as the
    /// candidate set for descendant-closure deletes.
    pub async fn list_by_project_with_transaction(
        tx: &mut Transaction<'_, Postgres>,
        project_id: Uuid,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = $1
             ORDER BY created_at ASC, task_id ASC"
        );
        let rows = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(project_id)
            .fetch_all(&mut **tx)
            .await?;
        Ok(rows.into_iter().map(TaskRow::into_task).collect())
    }

    /// Write every patchable column of `task` back to its row and return the
    /// stored, decoded task.
    pub async fn update_with_transaction(
        tx: &mut Transaction<'_, Postgres>,
        task: &Task,
    ) -> Result<Task, sqlx::Error> {
        let sql = format!(
            "UPDATE tasks
             SET name = $2, description = $3, status = $4,
                 assignee1_id = $5, assignee2_id = $6, assignee3_id = $7,
                 est_hours = $8, act_hours = $9, est_prev_hours = $10,
                 is_exceeded = $11, priority = $12, due_date = $13,
                 comments = $14, task_type = $15, updated_at = $16
             WHERE task_id = $1
             RETURNING {TASK_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(task.task_id)
            .bind(&task.name)
            .bind(&task.description)
            .bind(&task.status)
            .bind(task.assignee1_id)
            .bind(task.assignee2_id)
            .bind(task.assignee3_id)
            .bind(task.est_hours)
            .bind(task.act_hours)
            .bind(encode_est_prev_hours(&task.est_prev_hours))
            .bind(task.is_exceeded)
            .bind(&task.priority)
            .bind(task.due_date)
            .bind(&task.comments)
            .bind(&task.task_type)
            .bind(task.updated_at)
            .fetch_one(&mut **tx)
            .await?;
        Ok(row.into_task())
    }

    /// Delete every row whose id is in `ids`, returning the deleted count.
    pub async fn delete_many_with_transaction(
        tx: &mut Transaction<'_, Postgres>,
        ids: &[Uuid],
    ) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM tasks WHERE task_id = ANY($1)")
            .bind(ids)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete every task of one project, returning the deleted count.
    pub async fn delete_by_project_with_transaction(
        tx: &mut Transaction<'_, Postgres>,
        project_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
