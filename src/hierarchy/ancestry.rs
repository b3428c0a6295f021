//! Ancestor-pointer computation for the four-level task hierarchy.
//!
//! Every task row carries one pointer slot per level. For a task at level L
//! the slot for L holds the task's own identifier, slots below L hold the
//! identifiers of its ancestors, and slots above L are unset. Identifiers are
//! generated before insertion (UUID v7), so the self-referencing slot is
//! written together with the rest of the row.

use crate::models::Task;
use uuid::Uuid;

/// Shallowest level in the hierarchy (a root task).
pub const MIN_LEVEL: i32 = 1;
/// Deepest level in the hierarchy (a sub-action item).
pub const MAX_LEVEL: i32 = 4;

/// The four per-level ancestor slots of a single task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AncestorPointers {
    pub level1_id: Option<Uuid>,
    pub level2_id: Option<Uuid>,
    pub level3_id: Option<Uuid>,
    pub level4_id: Option<Uuid>,
}

impl AncestorPointers {
    /// Pointers for a new root task: the level-1 slot self-references, all
    /// deeper slots stay unset.
    pub fn for_root(root_id: Uuid) -> Self {
        Self {
            level1_id: Some(root_id),
            ..Self::default()
        }
    }

    /// Pointers for a new child of `parent` at `child_level`.
    ///
    /// Slots below `child_level` are inherited from the parent, falling back
    /// to the parent's own identifier where the parent is itself the ancestor
    /// at that level but its self-slot is unset (possible in historically
    /// loose data). The `child_level` slot is the pre-generated `child_id`;
    /// slots above stay unset.
    ///
    /// The caller guarantees `parent` sits exactly one level above the child.
    pub fn for_child(parent: &Task, child_level: i32, child_id: Uuid) -> Self {
        let mut pointers = Self::default();
        for level in MIN_LEVEL..child_level {
            let inherited = parent
                .ancestor_id(level)
                .or_else(|| (parent.task_level == level).then_some(parent.task_id));
            pointers.set(level, inherited);
        }
        pointers.set(child_level, Some(child_id));
        pointers
    }

    /// The slot for `level`, `None` for levels outside `1..=4`.
    pub fn get(&self, level: i32) -> Option<Uuid> {
        match level {
            1 => self.level1_id,
            2 => self.level2_id,
            3 => self.level3_id,
            4 => self.level4_id,
            _ => None,
        }
    }

    fn set(&mut self, level: i32, value: Option<Uuid>) {
        match level {
            1 => self.level1_id = value,
            2 => self.level2_id = value,
            3 => self.level3_id = value,
            4 => self.level4_id = value,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use crate::utils::serde::now_at_second_precision;

    fn task_at_level(level: i32, pointers: AncestorPointers) -> Task {
        let now = now_at_second_precision();
        Task {
            task_id: pointers.get(level).unwrap_or_else(Uuid::now_v7),
            workspace_id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            project_id: Uuid::now_v7(),
            name: format!("level-{level}"),
            description: None,
            task_level: level,
            status: "pending".to_string(),
            parent_id: None,
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

    #[test]
    fn root_pointers_self_reference_level_one_only() {
        let root_id = Uuid::now_v7();
        let pointers = AncestorPointers::for_root(root_id);

        assert_eq!(pointers.level1_id, Some(root_id));
        assert_eq!(pointers.level2_id, None);
        assert_eq!(pointers.level3_id, None);
        assert_eq!(pointers.level4_id, None);
    }

    #[test]
    fn child_inherits_every_slot_below_its_level() {
        let root_id = Uuid::now_v7();
        let root = task_at_level(1, AncestorPointers::for_root(root_id));

        let subtask_id = Uuid::now_v7();
        let subtask_pointers = AncestorPointers::for_child(&root, 2, subtask_id);
        assert_eq!(subtask_pointers.level1_id, Some(root_id));
        assert_eq!(subtask_pointers.level2_id, Some(subtask_id));
        assert_eq!(subtask_pointers.level3_id, None);
        assert_eq!(subtask_pointers.level4_id, None);

        let subtask = task_at_level(2, subtask_pointers);
        let action_id = Uuid::now_v7();
        let action_pointers = AncestorPointers::for_child(&subtask, 3, action_id);
        assert_eq!(action_pointers.level1_id, Some(root_id));
        assert_eq!(action_pointers.level2_id, Some(subtask_id));
        assert_eq!(action_pointers.level3_id, Some(action_id));
        assert_eq!(action_pointers.level4_id, None);

        let action = task_at_level(3, action_pointers);
        let subaction_id = Uuid::now_v7();
        let subaction_pointers = AncestorPointers::for_child(&action, 4, subaction_id);
        assert_eq!(subaction_pointers.level1_id, Some(root_id));
        assert_eq!(subaction_pointers.level2_id, Some(subtask_id));
        assert_eq!(subaction_pointers.level3_id, Some(action_id));
        assert_eq!(subaction_pointers.level4_id, Some(subaction_id));
    }

    #[test]
    fn missing_parent_self_slot_falls_back_to_parent_id() {
        // A parent row whose own-level slot was never written.
        let mut parent = task_at_level(2, AncestorPointers::default());
        parent.level1_id = Some(Uuid::now_v7());
        parent.level2_id = None;

        let child_id = Uuid::now_v7();
        let pointers = AncestorPointers::for_child(&parent, 3, child_id);

        assert_eq!(pointers.level1_id, parent.level1_id);
        assert_eq!(pointers.level2_id, Some(parent.task_id));
        assert_eq!(pointers.level3_id, Some(child_id));
    }

    #[test]
    fn out_of_range_levels_read_as_unset() {
        let pointers = AncestorPointers::for_root(Uuid::now_v7());
        assert_eq!(pointers.get(0), None);
        assert_eq!(pointers.get(5), None);
        assert_eq!(pointers.get(-1), None);
    }
}
