//! Reachable object sets
//!
//! `reachable` lists, for each commit of the chain, the commit itself, its
//! tree and every id the tree names. Trees are flat, so one level covers all
//! files. The list keeps walk order and may repeat ids that several commits
//! share; `dedupe` turns it into a sorted set and `missing` subtracts one
//! sorted set from another.

use crate::areas::database::Database;
use crate::artifacts::core::sorted_merge::{Merged, sorted_merge};
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;

pub fn reachable(database: &Database, tip: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
    let mut objects = Vec::new();

    for item in RevList::from_tip(database, tip) {
        let (commit_oid, commit) = item?;
        let tree_oid = commit.tree_oid().clone();

        let tree = database
            .parse_object_as_tree(&tree_oid)?
            .ok_or_else(|| TwigError::MalformedTree(tree_oid.clone()))?;

        objects.push(commit_oid);
        objects.push(tree_oid);
        objects.extend(tree.object_ids());
    }

    Ok(objects)
}

pub fn dedupe(mut object_ids: Vec<ObjectId>) -> Vec<ObjectId> {
    object_ids.sort();
    object_ids.dedup();
    object_ids
}

/// Ids of `local` absent from `remote`; both must be sorted and unique
pub fn missing(local: &[ObjectId], remote: &[ObjectId]) -> Vec<ObjectId> {
    sorted_merge(local, remote, |l, r| l.cmp(r))
        .filter_map(|merged| match merged {
            Merged::Left(oid) => Some(oid.clone()),
            _ => None,
        })
        .collect()
}
