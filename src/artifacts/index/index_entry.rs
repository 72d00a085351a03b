//! Index entry representation
//!
//! Each entry records one staged file: its path, the blob id of its content,
//! and the stat data captured when it was added.
//!
//! ## Entry Format
//!
//! ```text
//! ctime s | ctime ns | mtime s | mtime ns | dev | ino | mode | uid | gid | size   (10 x u32 BE)
//! object id                                                                     (20 bytes)
//! flags: path length, capped at 0xFFF                                           (u16 BE)
//! path, null terminator, zero padding to a multiple of 8 from the entry start
//! ```

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use byteorder::{ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::cmp::min;
use std::fs::Metadata;
use std::io::{BufRead, Write};
use std::os::unix::prelude::MetadataExt;

/// Largest path length representable in the flags field
const MAX_PATH_SIZE: usize = 0xFFF;

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Size of the fixed part of an entry, before the path
pub const ENTRY_HEADER_SIZE: usize = 62;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// Path relative to the repository root, `/` separated
    pub name: String,
    /// Blob id of the staged content
    pub oid: ObjectId,
    pub metadata: EntryMetadata,
}

impl IndexEntry {
    /// Number of zero bytes that follow the path terminator
    pub fn padding(name_len: usize) -> usize {
        (ENTRY_BLOCK - (ENTRY_HEADER_SIZE + name_len + 1) % ENTRY_BLOCK) % ENTRY_BLOCK
    }
}

/// Stat data stored in index entries
///
/// Every field is stored as a 32-bit big-endian integer on disk, so wider
/// platform values are truncated when captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryMetadata {
    pub ctime: u32,
    pub ctime_nsec: u32,
    pub mtime: u32,
    pub mtime_nsec: u32,
    pub dev: u32,
    pub ino: u32,
    pub mode: EntryMode,
    pub uid: u32,
    pub gid: u32,
    pub size: u32,
    /// Byte length of the path, capped at 0xFFF
    pub flags: u16,
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut entry_bytes = Vec::new();
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ctime)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ctime_nsec)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mtime)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mtime_nsec)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.dev)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.ino)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.mode.as_u32())?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.uid)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.gid)?;
        entry_bytes.write_u32::<byteorder::NetworkEndian>(self.metadata.size)?;
        self.oid.write_h40_to(&mut entry_bytes)?;
        entry_bytes.write_u16::<byteorder::NetworkEndian>(self.metadata.flags)?;
        entry_bytes.write_all(self.name.as_bytes())?;

        // There must be at least one null byte at the end
        entry_bytes.push(0);
        entry_bytes.resize(entry_bytes.len() + Self::padding(self.name.len()), 0);

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    /// Read one entry, consuming its padding
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let ctime = reader.read_u32::<byteorder::NetworkEndian>()?;
        let ctime_nsec = reader.read_u32::<byteorder::NetworkEndian>()?;
        let mtime = reader.read_u32::<byteorder::NetworkEndian>()?;
        let mtime_nsec = reader.read_u32::<byteorder::NetworkEndian>()?;
        let dev = reader.read_u32::<byteorder::NetworkEndian>()?;
        let ino = reader.read_u32::<byteorder::NetworkEndian>()?;
        let mode = EntryMode::from_raw(reader.read_u32::<byteorder::NetworkEndian>()?);
        let uid = reader.read_u32::<byteorder::NetworkEndian>()?;
        let gid = reader.read_u32::<byteorder::NetworkEndian>()?;
        let size = reader.read_u32::<byteorder::NetworkEndian>()?;
        let oid = ObjectId::read_h40_from(&mut reader)?;
        let flags = reader.read_u16::<byteorder::NetworkEndian>()?;

        let mut name_bytes = Vec::new();
        reader.read_until(0, &mut name_bytes)?;
        if name_bytes.pop() != Some(0) {
            return Err(anyhow!("Missing null terminator in entry name"));
        }
        let name = String::from_utf8(name_bytes)
            .map_err(|_| anyhow!("Invalid UTF-8 in entry name"))?;

        let mut padding = vec![0u8; Self::padding(name.len())];
        reader
            .read_exact(&mut padding)
            .map_err(|_| anyhow!("Unexpected end-of-file in entry padding"))?;

        Ok(IndexEntry {
            name,
            oid,
            metadata: EntryMetadata {
                ctime,
                ctime_nsec,
                mtime,
                mtime_nsec,
                dev,
                ino,
                mode,
                uid,
                gid,
                size,
                flags,
            },
        })
    }
}

impl TryFrom<(&str, Metadata)> for EntryMetadata {
    type Error = anyhow::Error;

    fn try_from((file_path, metadata): (&str, Metadata)) -> Result<Self, Self::Error> {
        if metadata.is_dir() {
            return Err(anyhow!("Cannot stage a directory: {}", file_path));
        }

        Ok(Self {
            ctime: metadata.ctime() as u32,
            ctime_nsec: metadata.ctime_nsec() as u32,
            mtime: metadata.mtime() as u32,
            mtime_nsec: metadata.mtime_nsec() as u32,
            dev: metadata.dev() as u32,
            ino: metadata.ino() as u32,
            mode: EntryMode::normalized(metadata.mode()),
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: metadata.size() as u32,
            flags: min(file_path.len(), MAX_PATH_SIZE) as u16,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use std::io::Cursor;

    #[fixture]
    fn oid() -> ObjectId {
        ObjectId::try_parse("ce013625030ba8dba906f756967f9e9ca394464a".to_string()).unwrap()
    }

    fn entry(name: &str, oid: ObjectId) -> IndexEntry {
        IndexEntry::new(
            name.to_string(),
            oid,
            EntryMetadata {
                ctime: 1_700_000_000,
                ctime_nsec: 12,
                mtime: 1_700_000_001,
                mtime_nsec: 34,
                dev: 2049,
                ino: 77,
                mode: EntryMode::normalized(0o100644),
                uid: 1000,
                gid: 1000,
                size: 6,
                flags: name.len() as u16,
            },
        )
    }

    #[rstest]
    #[case("a", 64)]
    #[case("ab", 72)]
    #[case("a.txt", 72)]
    #[case("123456789", 72)]
    #[case("1234567890", 80)]
    fn entries_are_padded_to_eight_bytes(oid: ObjectId, #[case] name: &str, #[case] expected: usize) {
        let bytes = entry(name, oid).serialize().unwrap();

        assert_eq!(bytes.len(), expected);
        assert_eq!(bytes[ENTRY_HEADER_SIZE + name.len()], 0);
    }

    #[rstest]
    fn fixed_fields_are_big_endian(oid: ObjectId) {
        let bytes = entry("a.txt", oid).serialize().unwrap();

        assert_eq!(&bytes[24..28], &0o100755u32.to_be_bytes());
        assert_eq!(&bytes[40..42], &[0xce, 0x01]);
        assert_eq!(&bytes[60..62], &[0, 5]);
        assert_eq!(&bytes[62..67], b"a.txt");
    }

    #[rstest]
    fn parsed_entry_matches_and_consumes_padding(oid: ObjectId) {
        let first = entry("a.txt", oid.clone());
        let second = entry("dir/b.txt", oid);

        let mut bytes = first.serialize().unwrap().to_vec();
        bytes.extend_from_slice(&second.serialize().unwrap());
        let mut reader = Cursor::new(bytes);

        assert_eq!(IndexEntry::deserialize(&mut reader).unwrap(), first);
        assert_eq!(IndexEntry::deserialize(&mut reader).unwrap(), second);
    }

    #[rstest]
    fn truncated_entry_is_rejected(oid: ObjectId) {
        let bytes = entry("a.txt", oid).serialize().unwrap();
        let truncated = bytes.slice(..50);

        assert!(IndexEntry::deserialize(Cursor::new(truncated)).is_err());
    }
}
