//! Small shared utilities.

pub mod serde;
