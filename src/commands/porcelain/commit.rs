use crate::areas::refs::MASTER_BRANCH;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Record the staged tree as a new commit on master
    ///
    /// The tree and commit are stored before the ref moves; a failure in
    /// between leaves unreferenced objects but never a dangling ref.
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<ObjectId> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;

        let tree_id = self.write_tree(&index)?;

        let parent = self.refs().read_head()?;
        let is_root = match parent {
            Some(_) => "",
            None => " (root-commit)",
        };

        let author = Author::load_from_env()?;
        let message = message.trim().to_string();

        let commit = Commit::new(parent, tree_id, author, message);
        let commit_id = self.database().store(&commit)?;
        self.refs().update_head(&commit_id)?;

        writeln!(
            self.writer(),
            "[{}{} {}] {}",
            MASTER_BRANCH,
            is_root,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_id)
    }
}
