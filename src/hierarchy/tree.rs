//! Nested-tree construction from flat task rows.
//!
//! Tasks are stored flat; the update-response path for projects returns the
//! fully nested structure. Children attach under a level-specific field:
//! `subtasks` below a task, `action_items` below a subtask, `subaction_items`
//! below an action item. Recursion bottoms out at level 4, so the output is
//! always finite.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ancestry::MAX_LEVEL;
use crate::models::Task;

/// One task together with its materialized children.
///
/// Only the child field matching the task's level is ever populated; the
/// other two stay empty and are omitted from serialized output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskNode {
    #[serde(flatten)]
    pub task: Task,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<TaskNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub action_items: Vec<TaskNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subaction_items: Vec<TaskNode>,
}

impl TaskNode {
    pub fn new(task: Task) -> Self {
        Self {
            task,
            subtasks: Vec::new(),
            action_items: Vec::new(),
            subaction_items: Vec::new(),
        }
    }

    /// The child list that applies at this node's level.
    pub fn children(&self) -> &[TaskNode] {
        match self.task.task_level {
            1 => &self.subtasks,
            2 => &self.action_items,
            3 => &self.subaction_items,
            _ => &[],
        }
    }

    fn set_children(&mut self, children: Vec<TaskNode>) {
        match self.task.task_level {
            1 => self.subtasks = children,
            2 => self.action_items = children,
            3 => self.subaction_items = children,
            _ => {}
        }
    }
}

/// Builds the nested tree of all tasks in `flat` rooted at `parent`.
///
/// Groups tasks by `(parent_id, task_level)` at the current level, then
/// recurses one level deeper under each match. Rows unreachable from the
/// requested root (orphans, wrong levels) are dropped. Output order follows
/// input order, so deterministic input yields a deterministic tree.
pub fn build_tree(flat: &[Task], parent: Option<Uuid>, level: i32) -> Vec<TaskNode> {
    if level > MAX_LEVEL {
        return Vec::new();
    }
    flat.iter()
        .filter(|task| task.task_level == level && task.parent_id == parent)
        .map(|task| {
            let mut node = TaskNode::new(task.clone());
            node.set_children(build_tree(flat, Some(task.task_id), level + 1));
            node
        })
        .collect()
}

/// Preorder flattening of a nested tree back into rows.
pub fn flatten(nodes: &[TaskNode]) -> Vec<Task> {
    let mut rows = Vec::new();
    collect(nodes, &mut rows);
    rows
}

fn collect(nodes: &[TaskNode], rows: &mut Vec<Task>) {
    for node in nodes {
        rows.push(node.task.clone());
        collect(node.children(), rows);
    }
}
