//! # Task Lifecycle Manager
//!
//! Creation, partial update, and cascading delete of tasks at every level of
//! the hierarchy. Each mutating operation runs inside a single transaction:
//! validation failures and store faults roll back, so no partial state is
//! observable outside a committed transaction.

use std::collections::HashSet;

use sqlx::PgPool;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::{Result, TaskTreeError};
use crate::hierarchy::{AncestorPointers, MAX_LEVEL, MIN_LEVEL};
use crate::models::{NewTask, Project, Task, TaskPatch};
use crate::utils::serde::now_at_second_precision;

/// Service for task mutations over a shared connection pool.
#[derive(Debug, Clone)]
pub struct TaskLifecycle {
    pool: PgPool,
}

impl TaskLifecycle {
    /// Create a new TaskLifecycle
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a task at any level of the hierarchy.
    ///
    /// Validates the requested level and parent linkage, resolves the parent
    /// row for levels below the root, computes the ancestor pointers, and
    /// performs one INSERT carrying the self-referencing pointer. The task id
    /// is generated here (UUID v7), so no post-insert patch is needed.
    #[instrument(skip(self, new_task), fields(project_id = %new_task.project_id, task_level = new_task.task_level))]
    pub async fn create_task(&self, new_task: NewTask) -> Result<Task> {
        validate_structure(&new_task)?;

        let mut tx = self.pool.begin().await?;

        if Project::find_by_id_with_transaction(&mut tx, new_task.project_id)
            .await?
            .is_none()
        {
            return Err(TaskTreeError::ProjectNotFound(new_task.project_id));
        }

        let parent = match new_task.parent_id {
            Some(parent_id) => {
                let parent = Task::find_by_id_with_transaction(&mut tx, parent_id)
                    .await?
                    .ok_or(TaskTreeError::ParentNotFound)?;
                if parent.task_level != new_task.task_level - 1 {
                    return Err(TaskTreeError::invalid_request(format!(
                        "Parent of a level {} task must be at level {}",
                        new_task.task_level,
                        new_task.task_level - 1
                    )));
                }
                if parent.project_id != new_task.project_id {
                    return Err(TaskTreeError::invalid_request(
                        "Parent task belongs to a different project",
                    ));
                }
                Some(parent)
            }
            None => None,
        };

        let task_id = Uuid::now_v7();
        let pointers = match parent.as_ref() {
            Some(parent) => AncestorPointers::for_child(parent, new_task.task_level, task_id),
            None => AncestorPointers::for_root(task_id),
        };

        let now = now_at_second_precision();
        let task = Task {
            task_id,
            workspace_id: new_task.workspace_id,
            user_id: new_task.user_id,
            project_id: new_task.project_id,
            name: new_task.name,
            description: new_task.description,
            task_level: new_task.task_level,
            status: new_task.status.unwrap_or_else(|| "pending".to_string()),
            parent_id: new_task.parent_id,
            level1_id: pointers.level1_id,
            level2_id: pointers.level2_id,
            level3_id: pointers.level3_id,
            level4_id: pointers.level4_id,
            assignee1_id: new_task.assignee1_id,
            assignee2_id: new_task.assignee2_id,
            assignee3_id: new_task.assignee3_id,
            est_hours: new_task.est_hours.unwrap_or(0.0),
            act_hours: new_task.act_hours.unwrap_or(0.0),
            est_prev_hours: Vec::new(),
            is_exceeded: false,
            priority: new_task.priority.unwrap_or_default(),
            due_date: new_task.due_date,
            comments: new_task.comments.unwrap_or_default(),
            task_type: new_task.task_type.unwrap_or_default(),
            info: new_task.info.unwrap_or_else(|| serde_json::json!({})),
            created_at: now,
            updated_at: now,
        };

        let stored = Task::insert_with_transaction(&mut tx, &task).await?;
        tx.commit().await?;

        info!(task_id = %stored.task_id, task_level = stored.task_level, "Created task");
        Ok(stored)
    }

    /// Apply a partial update to a task.
    ///
    /// An empty patch is rejected before touching the store. When the
    /// estimate changes on a task below level 1, the stored estimate history
    /// becomes a single snapshot of the pre-update value.
    #[instrument(skip(self, patch), fields(task_id = %id))]
    pub async fn update_task(&self, id: Uuid, patch: TaskPatch) -> Result<Task> {
        if patch.is_empty() {
            return Err(TaskTreeError::invalid_request(
                "Update payload cannot be empty",
            ));
        }

        let mut tx = self.pool.begin().await?;
        let current = Task::find_by_id_with_transaction(&mut tx, id)
            .await?
            .ok_or(TaskTreeError::TaskNotFound(id))?;

        let updated = apply_patch(current, &patch);
        let stored = Task::update_with_transaction(&mut tx, &updated).await?;
        tx.commit().await?;

        debug!(task_id = %id, "Updated task");
        Ok(stored)
    }

    /// Delete a task together with every transitive descendant.
    ///
    /// Loads the candidate set (all tasks of the same project) once, computes
    /// the descendant closure in memory, and removes the whole set in one
    /// DELETE. Returns how many rows were removed.
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn delete_task(&self, id: Uuid) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let task = Task::find_by_id_with_transaction(&mut tx, id)
            .await?
            .ok_or(TaskTreeError::TaskNotFound(id))?;

        if !(MIN_LEVEL..=MAX_LEVEL).contains(&task.task_level) {
            return Err(TaskTreeError::invalid_request(format!(
                "Unsupported task level: {}",
                task.task_level
            )));
        }

        let candidates = Task::list_by_project_with_transaction(&mut tx, task.project_id).await?;
        let doomed = descendant_closure(&task, &candidates);
        let deleted = Task::delete_many_with_transaction(&mut tx, &doomed).await?;
        tx.commit().await?;

        info!(task_id = %id, deleted, "Deleted task subtree");
        Ok(deleted)
    }

    /// List every task across all projects, oldest first.
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        Ok(Task::list(&self.pool).await?)
    }
}

fn validate_structure(new_task: &NewTask) -> Result<()> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&new_task.task_level) {
        return Err(TaskTreeError::invalid_request(format!(
            "Unsupported task level: {}",
            new_task.task_level
        )));
    }
    if new_task.task_level == MIN_LEVEL && new_task.parent_id.is_some() {
        return Err(TaskTreeError::invalid_request(
            "A level 1 task cannot have a parent",
        ));
    }
    if new_task.task_level > MIN_LEVEL && new_task.parent_id.is_none() {
        return Err(TaskTreeError::ParentNotFound);
    }
    Ok(())
}

fn apply_patch(mut task: Task, patch: &TaskPatch) -> Task {
    if let Some(name) = &patch.name {
        task.name = name.clone();
    }
    if let Some(description) = &patch.description {
        task.description = description.clone();
    }
    if let Some(status) = &patch.status {
        task.status = status.clone();
    }
    if let Some(assignee) = patch.assignee1_id {
        task.assignee1_id = assignee;
    }
    if let Some(assignee) = patch.assignee2_id {
        task.assignee2_id = assignee;
    }
    if let Some(assignee) = patch.assignee3_id {
        task.assignee3_id = assignee;
    }
    if let Some(est_hours) = patch.est_hours {
        // Below level 1 the pre-update estimate replaces the whole history
        // with a single snapshot; it does not append.
        if task.task_level > MIN_LEVEL {
            task.est_prev_hours = vec![task.est_hours];
        }
        task.est_hours = est_hours;
    }
    if let Some(act_hours) = patch.act_hours {
        task.act_hours = act_hours;
    }
    if let Some(priority) = &patch.priority {
        task.priority = priority.clone();
    }
    if let Some(due_date) = patch.due_date {
        task.due_date = due_date;
    }
    if let Some(comments) = &patch.comments {
        task.comments = comments.clone();
    }
    if let Some(task_type) = &patch.task_type {
        task.task_type = task_type.clone();
    }
    if let Some(is_exceeded) = patch.is_exceeded {
        task.is_exceeded = is_exceeded;
    }
    task.updated_at = now_at_second_precision();
    task
}

/// Collects the ids of `root` and every transitive descendant present in
/// `candidates`.
///
/// Fixed-point iteration over the ancestor slot at the root's own level:
/// every candidate whose slot points at a member joins the set, and the loop
/// stops the first time an iteration adds nothing. Descendants inherit that
/// slot at creation, so well-formed data converges in one pass; rows whose
/// slot points at an intermediate descendant instead are picked up by later
/// passes. Terminates because the set grows monotonically within a finite
/// candidate set.
pub fn descendant_closure(root: &Task, candidates: &[Task]) -> Vec<Uuid> {
    let level = root.task_level;
    let mut doomed = vec![root.task_id];
    let mut members: HashSet<Uuid> = doomed.iter().copied().collect();

    loop {
        let before = members.len();
        for candidate in candidates {
            if members.contains(&candidate.task_id) {
                continue;
            }
            if let Some(ancestor) = candidate.ancestor_id(level) {
                if members.contains(&ancestor) {
                    members.insert(candidate.task_id);
                    doomed.push(candidate.task_id);
                }
            }
        }
        if members.len() == before {
            break;
        }
    }
    doomed
}
