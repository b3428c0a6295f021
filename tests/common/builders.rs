//! Shared fixture builders for integration and property tests.
//!
//! Rows are built fully in memory, with the same ancestor pointers the
//! lifecycle service would persist, so hierarchy logic can be exercised
//! without a database.

#![allow(dead_code)] // Not every integration target uses every builder

use chrono::NaiveDateTime;
use uuid::Uuid;

use tasktree_core::hierarchy::AncestorPointers;
use tasktree_core::models::{Project, Task};
use tasktree_core::utils::serde::parse_datetime;

pub fn fixed_timestamp() -> NaiveDateTime {
    parse_datetime("2025-03-01 12:00:00").unwrap()
}

pub fn project_fixture(name: &str) -> Project {
    let now = fixed_timestamp();
    Project {
        project_id: Uuid::now_v7(),
        workspace_id: Uuid::now_v7(),
        user_id: Uuid::now_v7(),
        name: name.to_string(),
        description: None,
        start_date: now,
        end_date: now,
        est_hours: 0.0,
        act_hours: 0.0,
        created_at: now,
        updated_at: now,
    }
}

/// A level-1 task belonging to `project_id`.
pub fn root_task(project_id: Uuid, name: &str) -> Task {
    let task_id = Uuid::now_v7();
    let pointers = AncestorPointers::for_root(task_id);
    task_with_pointers(project_id, task_id, 1, None, pointers, name)
}

/// A child one level below `parent`, with inherited ancestor pointers.
pub fn child_task(parent: &Task, name: &str) -> Task {
    let task_id = Uuid::now_v7();
    let level = parent.task_level + 1;
    let pointers = AncestorPointers::for_child(parent, level, task_id);
    task_with_pointers(
        parent.project_id,
        task_id,
        level,
        Some(parent.task_id),
        pointers,
        name,
    )
}

fn task_with_pointers(
    project_id: Uuid,
    task_id: Uuid,
    task_level: i32,
    parent_id: Option<Uuid>,
    pointers: AncestorPointers,
    name: &str,
) -> Task {
    let now = fixed_timestamp();
    Task {
        task_id,
        workspace_id: Uuid::now_v7(),
        user_id: Uuid::now_v7(),
        project_id,
        name: name.to_string(),
        description: None,
        task_level,
        status: "pending".to_string(),
        parent_id,
        level1_id: pointers.level1_id,
        level2_id: pointers.level2_id,
        level3_id: pointers.level3_id,
        level4_id: pointers.level4_id,
        assignee1_id: None,
        assignee2_id: None,
        assignee3_id: None,
        est_hours: 0.0,
        act_hours: 0.0,
        est_prev_hours: Vec::new(),
        is_exceeded: false,
        priority: String::new(),
        due_date: None,
        comments: String::new(),
        task_type: String::new(),
        info: serde_json::json!({}),
        created_at: now,
        updated_at: now,
    }
}
