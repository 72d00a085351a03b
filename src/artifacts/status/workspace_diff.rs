//! Working tree vs index
//!
//! Both sides are `(path, id)` lists sorted by path. A single sorted merge
//! classifies each path: present on both sides with different ids is
//! modified, only in the working tree is untracked, only in the index is
//! deleted. Unchanged paths are not reported.

use crate::artifacts::core::sorted_merge::{Merged, sorted_merge};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::FileChange;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingTreeDiff {
    pub modified: Vec<String>,
    pub untracked: Vec<String>,
    pub deleted: Vec<String>,
}

impl WorkingTreeDiff {
    pub fn is_clean(&self) -> bool {
        self.modified.is_empty() && self.untracked.is_empty() && self.deleted.is_empty()
    }

    /// Every reported path with its change, in path order
    pub fn changes(&self) -> Vec<(&str, FileChange)> {
        let mut changes = self
            .modified
            .iter()
            .map(|path| (path.as_str(), FileChange::Modified))
            .chain(self.deleted.iter().map(|path| (path.as_str(), FileChange::Deleted)))
            .chain(self.untracked.iter().map(|path| (path.as_str(), FileChange::Untracked)))
            .collect::<Vec<_>>();
        changes.sort();
        changes
    }
}

pub fn diff_working_tree(
    dir_entries: &[(String, ObjectId)],
    index_entries: &[(String, ObjectId)],
) -> WorkingTreeDiff {
    let mut diff = WorkingTreeDiff::default();

    for merged in sorted_merge(dir_entries, index_entries, |(l, _), (r, _)| l.cmp(r)) {
        match merged {
            Merged::Both((path, dir_oid), (_, index_oid)) if dir_oid != index_oid => {
                diff.modified.push(path.clone())
            }
            Merged::Both(..) => {}
            Merged::Left((path, _)) => diff.untracked.push(path.clone()),
            Merged::Right((path, _)) => diff.deleted.push(path.clone()),
        }
    }

    diff
}
