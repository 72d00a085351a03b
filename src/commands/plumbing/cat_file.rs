use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Print an object's decompressed bytes
    ///
    /// Without `pretty` the header is kept (`blob 6\0hello\n`); with it only
    /// the content is written.
    pub fn cat_file(&mut self, object_id: &str, pretty: bool) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(object_id.to_string())?;

        let data = if pretty {
            self.database().get(&object_id)?.1
        } else {
            self.database().cat_raw(&object_id)?
        };

        self.writer().write_all(&data)?;

        Ok(())
    }
}
