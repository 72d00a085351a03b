//! Object identifier (SHA-1 digest)
//!
//! Identifiers are 40 lowercase hexadecimal characters naming the SHA-1 of
//! an object's preimage `"<type> <size>\0" + content`.
//!
//! ## Storage
//!
//! Objects live at `.git/objects/<first-2-chars>/<remaining-38-chars>`.
//! Trees and index entries carry the 20-byte raw form instead of the hex form.

use crate::artifacts::objects::{OBJECT_ID_LENGTH, RAW_OBJECT_ID_LENGTH};
use std::io;
use std::path::PathBuf;

/// The all-zero identifier a remote advertises for an unborn branch.
pub const ZERO_OBJECT_ID: &str = "0000000000000000000000000000000000000000";

/// Object identifier
///
/// Ordering is the plain ascending order of the hex string, which is the
/// canonical order used whenever identifier sets are compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Accepts upper- or lowercase hex and stores the lowercase form.
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    pub fn zero() -> Self {
        Self(ZERO_OBJECT_ID.to_string())
    }

    /// Whether this is the all-zero placeholder identifier
    pub fn is_zero(&self) -> bool {
        self.0 == ZERO_OBJECT_ID
    }

    /// Build an identifier from a raw SHA-1 digest
    pub fn from_raw(raw: &[u8]) -> anyhow::Result<Self> {
        if raw.len() != RAW_OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid raw object ID length: {}", raw.len()));
        }

        let hex40 = raw.iter().map(|byte| format!("{byte:02x}")).collect();
        Ok(Self(hex40))
    }

    /// Write the object ID in binary format (20 bytes)
    pub fn write_h40_to<W: io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        let hex40 = self.as_ref();

        for i in (0..OBJECT_ID_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&hex40[i..i + 2], 16)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Invalid hex digit"))?;
            writer.write_all(&[byte])?;
        }

        Ok(())
    }

    /// Read an object ID from binary format (20 bytes)
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut raw = [0; RAW_OBJECT_ID_LENGTH];
        reader.read_exact(&mut raw)?;

        Self::from_raw(&raw)
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const EMPTY_BLOB: &str = "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";

    #[rstest]
    #[case("abc")]
    #[case("zz9de29bb2d1d6434b8b29ae775ad8c2e48c5391")]
    #[case("e69de29bb2d1d6434b8b29ae775ad8c2e48c53911")]
    fn rejects_invalid_identifiers(#[case] id: &str) {
        assert!(ObjectId::try_parse(id.to_string()).is_err());
    }

    #[test]
    fn normalizes_to_lowercase() {
        let oid = ObjectId::try_parse(EMPTY_BLOB.to_uppercase()).unwrap();
        assert_eq!(oid.as_ref(), EMPTY_BLOB);
    }

    #[test]
    fn raw_form_is_twenty_bytes_and_reads_back() {
        let oid = ObjectId::try_parse(EMPTY_BLOB.to_string()).unwrap();

        let mut raw = Vec::new();
        oid.write_h40_to(&mut raw).unwrap();
        assert_eq!(raw.len(), RAW_OBJECT_ID_LENGTH);
        assert_eq!(raw[0], 0xe6);

        let read_back = ObjectId::read_h40_from(&mut raw.as_slice()).unwrap();
        assert_eq!(read_back, oid);
    }

    #[test]
    fn splits_into_directory_and_file() {
        let oid = ObjectId::try_parse(EMPTY_BLOB.to_string()).unwrap();
        assert_eq!(
            oid.to_path(),
            PathBuf::from("e6").join("9de29bb2d1d6434b8b29ae775ad8c2e48c5391")
        );
        assert_eq!(oid.to_short_oid(), "e69de29");
    }

    #[test]
    fn zero_identifier_is_recognized() {
        assert!(ObjectId::zero().is_zero());
        assert!(!ObjectId::try_parse(EMPTY_BLOB.to_string()).unwrap().is_zero());
    }
}
