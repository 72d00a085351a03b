//! Repository areas
//!
//! Each area owns one piece of on-disk or on-wire state:
//!
//! - `database`: content-addressed object store under `.git/objects`
//! - `index`: the staging area file `.git/index`
//! - `refs`: `HEAD` and the master branch tip
//! - `remote`: the smart-HTTP endpoint a push talks to
//! - `repository`: the handle tying the areas together
//! - `workspace`: files of the working directory

pub mod database;
pub mod index;
pub mod refs;
pub mod remote;
pub mod repository;
pub mod workspace;
