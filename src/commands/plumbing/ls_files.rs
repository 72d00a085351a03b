use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub async fn ls_files(&mut self) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        for entry in index.entries() {
            writeln!(
                self.writer(),
                "{} {} {}\t{}",
                entry.metadata.mode.as_octal(),
                entry.oid,
                entry.metadata.size,
                entry.name
            )?;
        }

        Ok(())
    }
}
