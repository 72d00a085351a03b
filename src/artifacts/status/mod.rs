//! Working tree status
//!
//! - `workspace_diff`: compares the working tree with the index by content id
//! - `file_change`: the kind of difference found for a path and its label

pub mod file_change;
pub mod workspace_diff;
