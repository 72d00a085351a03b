use crate::areas::database::Database;
use crate::artifacts::core::checksum::Checksum;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::pack::{SIGNATURE, VERSION, object_header};
use anyhow::Context;
use byteorder::WriteBytesExt;
use bytes::Bytes;
use std::io::Write;

/// One object as it appears inside a pack: header then deflated content
pub fn encode_object(database: &Database, object_id: &ObjectId) -> anyhow::Result<Vec<u8>> {
    let (object_type, content) = database.get(object_id)?;

    let mut encoded = object_header::encode(object_type, content.len());

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder
        .write_all(&content)
        .context("Unable to compress pack object")?;
    encoded.extend(encoder.finish().context("Unable to finish compressing pack object")?);

    Ok(encoded)
}

/// Pack stream holding every listed object, in the given order
pub fn build_pack(database: &Database, object_ids: &[ObjectId]) -> anyhow::Result<Bytes> {
    let mut header = Vec::with_capacity(12);
    header.write_all(SIGNATURE)?;
    header.write_u32::<byteorder::NetworkEndian>(VERSION)?;
    header.write_u32::<byteorder::NetworkEndian>(object_ids.len() as u32)?;

    let mut writer = Checksum::new(Vec::new());
    writer.write(&header)?;

    for object_id in object_ids {
        writer.write(&encode_object(database, object_id)?)?;
    }

    let pack = writer.write_checksum()?;
    tracing::debug!(objects = object_ids.len(), bytes = pack.len(), "built pack");

    Ok(pack.into())
}
