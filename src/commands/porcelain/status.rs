use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::workspace_diff::{WorkingTreeDiff, diff_working_tree};
use std::io::Write;

// Terminology:
// - untracked files: files in the working tree that have no index entry
// - modified files: files whose content id differs from their index entry
// - deleted files: index entries whose file is gone from the working tree
impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<WorkingTreeDiff> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let dir_entries = self
            .workspace()
            .list_files(None)?
            .into_iter()
            .map(|path| {
                let data = self.workspace().read_file(&path)?;
                let oid = Blob::new(data).object_id()?;
                Ok::<_, anyhow::Error>((path, oid))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let index_entries = index
            .entries()
            .map(|entry| (entry.name.clone(), entry.oid.clone()))
            .collect::<Vec<_>>();

        let diff = diff_working_tree(&dir_entries, &index_entries);
        self.print_status(&diff)?;

        Ok(diff)
    }

    fn print_status(&self, diff: &WorkingTreeDiff) -> anyhow::Result<()> {
        let mut writer = self.writer();

        if diff.is_clean() {
            writeln!(writer, "nothing to commit, working tree clean")?;
            return Ok(());
        }

        let changes = diff.changes();
        let (tracked, untracked): (Vec<_>, Vec<_>) =
            changes.iter().partition(|(_, change)| change.is_tracked());

        if !tracked.is_empty() {
            writeln!(writer, "Changes not staged for commit:")?;
            writeln!(writer, "  (use \"twig add <file>...\" to update what will be committed)")?;
            writeln!(writer)?;
            for (path, change) in tracked {
                writeln!(writer, "\t{}", change.describe(path))?;
            }
            writeln!(writer)?;
        }

        if !untracked.is_empty() {
            writeln!(writer, "Untracked files:")?;
            writeln!(writer, "  (use \"twig add <file>...\" to include in what will be committed)")?;
            writeln!(writer)?;
            for (path, change) in untracked {
                writeln!(writer, "\t{}", change.describe(path))?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}
