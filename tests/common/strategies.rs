#![allow(dead_code)] // Not every integration target uses every strategy

use proptest::prelude::*;
use proptest::sample::Index;
use uuid::Uuid;

use tasktree_core::hierarchy::MAX_LEVEL;
use tasktree_core::models::Task;

use super::builders::{child_task, root_task};

/// Strategy for generating valid task names
pub fn task_name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 _-]{0,48}"
}

/// Strategy for generating estimate values
pub fn est_hours_strategy() -> impl Strategy<Value = f64> {
    0.0f64..500.0
}

/// Strategy for a well-formed task forest in a single project.
///
/// Each draw either starts a new root or attaches a child to a previously
/// generated row that still has room below it, so every parent precedes its
/// children and no row sits deeper than the bottom level.
pub fn task_forest_strategy(max_rows: usize) -> impl Strategy<Value = Vec<Task>> {
    let row = (any::<Index>(), task_name_strategy(), est_hours_strategy());
    prop::collection::vec(row, 1..=max_rows).prop_map(|rows| {
        let project_id = Uuid::now_v7();
        let mut forest: Vec<Task> = Vec::with_capacity(rows.len());

        for (pick, name, est_hours) in rows {
            let eligible: Vec<usize> = forest
                .iter()
                .enumerate()
                .filter(|(_, task)| task.task_level < MAX_LEVEL)
                .map(|(index, _)| index)
                .collect();

            // Choice 0 starts a new root; the rest attach below an existing row.
            let choice = pick.index(eligible.len() + 1);
            let mut task = if choice == 0 {
                root_task(project_id, &name)
            } else {
                child_task(&forest[eligible[choice - 1]], &name)
            };
            task.est_hours = est_hours;
            forest.push(task);
        }

        forest
    })
}
