//! Plumbing commands
//!
//! Direct access to objects and the index, used by scripts and as building
//! blocks for the porcelain commands.
//!
//! - `hash-object`: compute an object id and optionally store the object
//! - `cat-file`: print a stored object
//! - `ls-files`: list the staged entries
//! - `write-tree`: store the tree of the current index

pub mod cat_file;
pub mod hash_object;
pub mod ls_files;
pub mod write_tree;
