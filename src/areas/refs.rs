//! References
//!
//! The repository has a single mutable pointer: `refs/heads/master`, a file
//! holding the 40-character id of the tip commit with no trailing newline.
//! A missing or empty file means the branch is unborn.
//!
//! `HEAD` is written once at `init` as a symbolic ref to master and is not
//! followed afterwards.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the only branch
pub const MASTER_BRANCH: &str = "master";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the git directory (typically `.git`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    pub fn master_path(&self) -> PathBuf {
        self.heads_path().join(MASTER_BRANCH)
    }

    /// Point HEAD at the master branch
    pub fn set_head(&self) -> anyhow::Result<()> {
        std::fs::write(
            self.head_path(),
            format!("ref: refs/heads/{MASTER_BRANCH}\n"),
        )
        .context("Failed to write HEAD reference")
    }

    /// Tip of master, or None when the branch has no commits
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        let path = self.master_path();

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        Ok(Some(ObjectId::try_parse(content.to_string())?))
    }

    /// Replace the master tip
    ///
    /// The new value is written to a temp file and renamed over the ref, so
    /// readers see either the old or the new id, never a partial one.
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let path = self.master_path();
        let dir = path
            .parent()
            .context(format!("Invalid ref path {}", path.display()))?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create ref directory at {:?}", dir))?;

        let temp_path = dir.join(format!("tmp-ref-{}", rand::random::<u32>()));
        let mut file = std::fs::File::create(&temp_path)
            .with_context(|| format!("failed to open ref file at {:?}", temp_path))?;
        file.write_all(oid.as_ref().as_bytes())?;
        file.sync_all()?;

        std::fs::rename(&temp_path, &path)
            .with_context(|| format!("failed to replace ref file at {:?}", path))?;
        tracing::debug!(%oid, "updated master");

        Ok(())
    }
}
