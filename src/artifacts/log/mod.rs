//! Commit ancestry
//!
//! - `rev_list`: walks the single-parent chain from a tip commit
//! - `reachable`: the objects a tip makes reachable, and set arithmetic on
//!   those object lists
//!
//! History is linear, so the walk never branches: each commit has at most
//! one parent and the chain ends at a root commit.

pub mod reachable;
pub mod rev_list;
