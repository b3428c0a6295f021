//! Transactional service layer over the shared connection pool.

pub mod project_aggregate;
pub mod task_lifecycle;

pub use project_aggregate::{ProjectAggregate, ProjectWithTasks, ProjectWithTree};
pub use task_lifecycle::{descendant_closure, TaskLifecycle};
