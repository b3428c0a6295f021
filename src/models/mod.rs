pub mod project;
pub mod task;

// Re-export core models for easy access
pub use project::{NewProject, Project, ProjectPatch};
pub use task::{NewTask, Task, TaskPatch, TaskRow};
