//! Index (staging area)
//!
//! The index records the flat file set of the next commit: one entry per
//! staged path, kept sorted by path.
//!
//! The file is always read in full and rewritten in full. Its trailing
//! checksum is verified before any entry is interpreted, so a truncated or
//! corrupted staging area is rejected instead of being silently used.

use crate::artifacts::core::checksum::{self, Checksum};
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::errors::TwigError;
use anyhow::Context;
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.git/index`)
    path: Box<Path>,
    /// Staged files keyed by path; the map keeps them in byte order
    entries: BTreeMap<String, IndexEntry>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry_by_path(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.get(path)
    }


    /// Load the index from disk
    ///
    /// A missing index file is an empty index. Anything else must pass the
    /// checksum before the header and entries are parsed.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(self.path())
            .context(format!("Unable to open index file {}", self.path().display()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        let mut data = Vec::new();
        lock.deref_mut().read_to_end(&mut data)?;

        let body = checksum::verify(&data).map_err(corrupt)?;
        let mut reader = Cursor::new(body);

        let entries_count = Self::parse_header(&mut reader)?;
        for _ in 0..entries_count {
            let entry = IndexEntry::deserialize(&mut reader).map_err(corrupt)?;
            self.entries.insert(entry.name.clone(), entry);
        }

        tracing::debug!(entries = entries_count, path = %self.path().display(), "loaded index");

        Ok(())
    }

    fn parse_header(reader: &mut Cursor<&[u8]>) -> anyhow::Result<u32> {
        let header = IndexHeader::deserialize(reader).map_err(corrupt)?;

        if header.marker != SIGNATURE {
            return Err(TwigError::IndexCorrupt("invalid index file signature".to_string()).into());
        }

        if header.version != VERSION {
            return Err(TwigError::IndexCorrupt(format!(
                "unsupported index file version: {}",
                header.version
            ))
            .into());
        }

        Ok(header.entries_count)
    }

    /// Stage an entry, replacing any previous entry for the same path
    pub fn add(&mut self, entry: IndexEntry) {
        self.entries.insert(entry.name.clone(), entry);
    }

    /// Serialize every entry and rewrite the index file from scratch
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the index file during writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut writer = Checksum::new(Vec::new());

        let header = IndexHeader::new(String::from(SIGNATURE), VERSION, self.entries.len() as u32);
        writer.write(&header.serialize()?)?;

        for entry in self.entries() {
            writer.write(&entry.serialize()?)?;
        }

        let index_bytes = writer.write_checksum()?;

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())
            .context(format!("Unable to open index file {}", self.path().display()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(&index_bytes)?;

        tracing::debug!(entries = self.entries.len(), bytes = index_bytes.len(), "wrote index");

        Ok(())
    }

    /// Entries in ascending path order
    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn into_entries(self) -> impl Iterator<Item = IndexEntry> {
        self.entries.into_values()
    }
}

fn corrupt(error: anyhow::Error) -> anyhow::Error {
    TwigError::IndexCorrupt(error.to_string()).into()
}
