//! Error taxonomy
//!
//! Every failure in the core is unrecoverable at the point of detection: the
//! current command is aborted with a diagnostic. Operations return
//! `anyhow::Result` and raise a [`TwigError`] where the failure kind matters,
//! so callers can `downcast_ref::<TwigError>()` to tell the kinds apart.

use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TwigError {
    /// No object file exists for the identifier.
    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    /// The object file exists but cannot be inflated or its header is invalid.
    #[error("object {oid} is corrupt: {reason}")]
    ObjectCorrupt { oid: ObjectId, reason: String },

    /// The index file failed its checksum or cannot be parsed.
    #[error("index file is corrupt: {0}")]
    IndexCorrupt(String),

    /// A tree entry is cut short before its 20-byte identifier.
    #[error("tree {0} is malformed")]
    MalformedTree(ObjectId),

    /// A commit object is missing its tree line or has an unreadable header.
    #[error("commit {oid} is malformed: {reason}")]
    MalformedCommit { oid: ObjectId, reason: String },

    /// The master branch has no commits yet.
    #[error("branch 'master' has no commits")]
    UnbornBranch,

    /// The remote ref advertisement does not carry a master identifier.
    #[error("remote ref advertisement is malformed")]
    MalformedAdvertisement,

    /// Network failure or a rejected request while talking to the remote.
    #[error("transport failure: {0}")]
    Transport(String),

    /// A required identity or credential setting is absent.
    #[error("{0} is not set")]
    ConfigMissing(&'static str),
}
