use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;

pub trait Packable {
    /// Serialize the object content (without the `"<type> <size>\0"` header)
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// Header followed by content: the bytes that are hashed and compressed
    fn preimage(&self) -> Result<Bytes> {
        Ok(preimage(self.object_type(), &self.serialize()?))
    }

    fn object_id(&self) -> Result<ObjectId> {
        hash_preimage(&self.preimage()?)
    }
}

pub fn preimage(object_type: ObjectType, content: &[u8]) -> Bytes {
    let mut bytes = Vec::with_capacity(content.len() + 16);
    bytes.extend_from_slice(object_type.header(content.len()).as_bytes());
    bytes.extend_from_slice(content);

    Bytes::from(bytes)
}

pub fn hash_preimage(preimage: &[u8]) -> Result<ObjectId> {
    let mut hasher = Sha1::new();
    hasher.update(preimage);

    let oid = hasher.finalize();
    ObjectId::try_parse(format!("{oid:x}"))
}
