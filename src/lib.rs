//! twig: a minimal version-control engine
//!
//! A content-addressed object store, a binary staging index, flat tree and
//! linear commit construction, and a push protocol that ships missing history
//! to a smart-HTTP server as a single pack.
//!
//! - `areas`: on-disk and on-wire collaborators (objects, index, refs, remote)
//! - `artifacts`: data structures and algorithms (objects, index codec, pack, push framing)
//! - `commands`: plumbing and porcelain operations on a [`areas::repository::Repository`]
//! - `errors`: the typed error taxonomy raised by the core

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
