//! Pure translation between the flat stored form of a task and its
//! hierarchical form: per-level ancestor pointers, nested tree construction,
//! and the text codecs for the history and info columns.

pub mod ancestry;
pub mod fields;
pub mod tree;

pub use ancestry::{AncestorPointers, MAX_LEVEL, MIN_LEVEL};
pub use tree::{build_tree, flatten, TaskNode};
