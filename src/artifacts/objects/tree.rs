//! Tree object
//!
//! A tree is a single flat listing of every staged file. Nested paths are kept
//! as literal strings (`a/b/c.txt`) instead of being split into subtrees, so
//! each commit references exactly one tree.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode octal> <path>\0<20-byte id>`, in index order.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::RAW_OBJECT_ID_LENGTH;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: String,
    pub oid: ObjectId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a flat tree from index entries, keeping their order
    pub fn build<'e>(entries: impl Iterator<Item = &'e IndexEntry>) -> Self {
        let entries = entries
            .map(|entry| TreeEntry::new(entry.metadata.mode, entry.name.clone(), entry.oid.clone()))
            .collect();

        Tree { entries }
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Identifiers of every member object, in tree order
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.entries.iter().map(|entry| entry.oid.clone()).collect()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();

        for entry in &self.entries {
            write!(content_bytes, "{} {}\0", entry.mode.as_octal(), entry.name)?;
            entry.oid.write_h40_to(&mut content_bytes)?;
        }

        Ok(Bytes::from(content_bytes))
    }
}

impl Unpackable for Tree {
    /// Scan for each null byte and take exactly 20 raw bytes after it
    ///
    /// A null byte followed by fewer than 20 bytes is an error.
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        let mut entries = Vec::new();
        let mut position = 0;

        while position < content.len() {
            let name_end = content[position..]
                .iter()
                .position(|&b| b == 0)
                .map(|offset| position + offset)
                .context("Tree entry is missing its null terminator")?;

            let oid_end = name_end + 1 + RAW_OBJECT_ID_LENGTH;
            if oid_end > content.len() {
                anyhow::bail!("Tree entry is cut short before its object id");
            }

            let header = std::str::from_utf8(&content[position..name_end])
                .context("Tree entry header is not valid UTF-8")?;
            let (mode, name) = header
                .split_once(' ')
                .context("Tree entry header is missing its mode")?;
            let oid = ObjectId::from_raw(&content[name_end + 1..oid_end])?;

            entries.push(TreeEntry::new(EntryMode::try_from(mode)?, name.to_string(), oid));
            position = oid_end;
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}
