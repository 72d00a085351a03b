//! Object database
//!
//! Content-addressed store of zlib-compressed objects under `.git/objects`.
//! Each object lives at `<2-hex>/<38-hex>` and holds the compressed form of
//! `"<type> <size>\0" + content`.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable, hash_preimage, preimage};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::TwigError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Identifier an object would get, without writing it
    pub fn hash(object_type: ObjectType, content: &[u8]) -> anyhow::Result<ObjectId> {
        hash_preimage(&preimage(object_type, content))
    }

    /// Store raw content under the given type and return its identifier
    ///
    /// Idempotent: an object that is already on disk is left untouched, its
    /// content being identical by construction.
    pub fn put(&self, object_type: ObjectType, content: &[u8]) -> anyhow::Result<ObjectId> {
        let object_content = preimage(object_type, content);
        let object_id = hash_preimage(&object_content)?;
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object_content)?;
            tracing::debug!(oid = %object_id, kind = %object_type, size = content.len(), "stored object");
        }

        Ok(object_id)
    }

    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        self.put(object.object_type(), &object.serialize()?)
    }

    /// Load an object and split it into its declared type and raw content
    pub fn get(&self, object_id: &ObjectId) -> anyhow::Result<(ObjectType, Bytes)> {
        let object_content = self.cat_raw(object_id)?;
        let mut object_reader = Cursor::new(&object_content);

        let (object_type, size) = ObjectType::parse_object_header(&mut object_reader)
            .map_err(|e| TwigError::ObjectCorrupt {
                oid: object_id.clone(),
                reason: e.to_string(),
            })?;

        let content = object_content.slice(object_reader.position() as usize..);
        if content.len() != size {
            return Err(TwigError::ObjectCorrupt {
                oid: object_id.clone(),
                reason: format!("declared size {} but found {} bytes", size, content.len()),
            }
            .into());
        }

        Ok((object_type, content))
    }

    /// Decompressed object bytes, header included
    pub fn cat_raw(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            return Err(TwigError::ObjectNotFound(object_id.clone()).into());
        }

        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into()).map_err(|e| {
            TwigError::ObjectCorrupt {
                oid: object_id.clone(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Option<Tree>> {
        match self.get(object_id)? {
            (ObjectType::Tree, content) => Tree::deserialize(Cursor::new(content))
                .map(Some)
                .map_err(|_| TwigError::MalformedTree(object_id.clone()).into()),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        match self.get(object_id)? {
            (ObjectType::Commit, content) => Commit::deserialize(Cursor::new(content))
                .map(Some)
                .map_err(|e| {
                    TwigError::MalformedCommit {
                        oid: object_id.clone(),
                        reason: e.to_string(),
                    }
                    .into()
                }),
            _ => Ok(None),
        }
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
