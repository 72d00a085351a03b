//! Trailing whole-file checksums
//!
//! Both the index file and the pack stream end with the SHA-1 of every byte
//! before it. Writers hash while they write and append the digest at the end;
//! readers verify the digest over the whole buffer before any field is parsed.

use crate::artifacts::index::CHECKSUM_SIZE;
use anyhow::anyhow;
use sha1::{Digest, Sha1};
use std::io::Write;

#[derive(Debug)]
pub struct Checksum<W> {
    writer: W,
    digest: Sha1,
}

impl<W: Write> Checksum<W> {
    pub fn new(writer: W) -> Self {
        Checksum {
            writer,
            digest: Sha1::new(),
        }
    }

    pub fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    /// Append the digest of everything written so far and hand back the writer
    pub fn write_checksum(mut self) -> anyhow::Result<W> {
        let checksum = self.digest.finalize();
        self.writer
            .write_all(checksum.as_slice())
            .map_err(|_| anyhow!("Failed to write trailing checksum"))?;

        Ok(self.writer)
    }
}

/// Check the trailing digest of `data` and return the bytes it covers
pub fn verify(data: &[u8]) -> anyhow::Result<&[u8]> {
    if data.len() < CHECKSUM_SIZE {
        return Err(anyhow!("Unexpected end-of-file while reading checksum"));
    }

    let (body, expected_checksum) = data.split_at(data.len() - CHECKSUM_SIZE);
    let actual_checksum = Sha1::digest(body);

    if expected_checksum != actual_checksum.as_slice() {
        return Err(anyhow!("Checksum does not match value stored on disk"));
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn written_checksum_verifies() {
        let mut writer = Checksum::new(Vec::new());
        writer.write(b"DIRC").unwrap();
        writer.write(b"payload").unwrap();
        let data = writer.write_checksum().unwrap();

        assert_eq!(data.len(), 11 + CHECKSUM_SIZE);
        assert_eq!(verify(&data).unwrap(), b"DIRCpayload");
    }

    #[test]
    fn flipped_byte_fails_verification() {
        let mut writer = Checksum::new(Vec::new());
        writer.write(b"payload").unwrap();
        let mut data = writer.write_checksum().unwrap();
        data[0] ^= 0xff;

        assert!(verify(&data).is_err());
    }

    #[test]
    fn short_input_fails_verification() {
        assert!(verify(b"tiny").is_err());
    }
}
