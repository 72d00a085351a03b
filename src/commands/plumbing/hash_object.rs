use crate::areas::database::Database;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::io::{Read, Write};

/// Source name standing for standard input
const STDIN_SOURCE: &str = "-";

impl Repository {
    pub fn hash_object(
        &mut self,
        source: Option<&str>,
        object_type: ObjectType,
        write: bool,
    ) -> anyhow::Result<ObjectId> {
        let content = match source {
            None | Some(STDIN_SOURCE) => {
                let mut content = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut content)
                    .context("Unable to read object content from stdin")?;
                Bytes::from(content)
            }
            Some(path) => self.workspace().read_file(path)?,
        };

        self.hash_content(object_type, &content, write)
    }

    /// Print the id of `content` as an object of the given type, storing it on request
    pub fn hash_content(
        &mut self,
        object_type: ObjectType,
        content: &[u8],
        write: bool,
    ) -> anyhow::Result<ObjectId> {
        let object_id = if write {
            self.database().put(object_type, content)?
        } else {
            Database::hash(object_type, content)?
        };

        writeln!(self.writer(), "{}", object_id)?;

        Ok(object_id)
    }
}
