//! Blob object
//!
//! Blobs store raw file content, without name or permissions (those live in
//! the index and the tree).
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`

use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(self.content.clone())
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(b"".as_slice(), "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391")]
    #[case(b"hello\n".as_slice(), "ce013625030ba8dba906f756967f9e9ca394464a")]
    #[case(b"what is up, doc?".as_slice(), "bd9dbf5aae1a3862dd1526723246b20206e5fc37")]
    fn blob_ids_match_git(#[case] content: &[u8], #[case] expected: &str) {
        let blob = Blob::new(Bytes::copy_from_slice(content));
        assert_eq!(blob.object_id().unwrap().as_ref(), expected);
    }

    #[test]
    fn preimage_carries_header() {
        let blob = Blob::new(Bytes::from_static(b"abc"));
        assert_eq!(blob.preimage().unwrap(), Bytes::from_static(b"blob 3\0abc"));
    }
}
