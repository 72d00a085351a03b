use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::Blob;
use std::path::Path;

impl Repository {
    pub async fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        // Expand directories; a path that does not exist aborts before anything is staged
        let files = paths
            .iter()
            .map(|path| self.workspace().list_files(Some(Path::new(path))))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten();

        for file in files {
            let data = self.workspace().read_file(&file)?;
            let stat = self.workspace().stat_file(&file)?;

            let blob_id = self.database().store(&Blob::new(data))?;
            index.add(IndexEntry::new(file, blob_id, stat));
        }

        index.write_updates()?;

        Ok(())
    }
}
