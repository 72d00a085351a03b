//! Command implementations
//!
//! Every command is a method on [`crate::areas::repository::Repository`],
//! writing its output through the repository writer.
//!
//! - `plumbing`: object and index level commands (hash-object, cat-file, ls-files, write-tree)
//! - `porcelain`: user-facing workflow (init, add, commit, status, push)

pub mod plumbing;
pub mod porcelain;
