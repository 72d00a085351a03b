use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use derive_new::new;

/// Commits from a tip back to the root, newest first
///
/// The walk stops at a commit without parent, or at an empty or all-zero id
/// (an unborn remote). An id that does not name a commit ends the walk with an
/// error.
#[derive(Clone, new)]
pub struct RevList<'d> {
    database: &'d Database,
    start: Option<ObjectId>,
}

impl<'d> RevList<'d> {
    pub fn from_tip(database: &'d Database, tip: &ObjectId) -> Self {
        RevList::new(database, Some(tip.clone()))
    }
}

impl Iterator for RevList<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self
            .start
            .take()
            .filter(|oid| !oid.is_zero() && !oid.as_ref().is_empty())?;

        match self.database.parse_object_as_commit(&commit_oid) {
            Ok(Some(commit)) => {
                self.start = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Ok(None) => Some(Err(TwigError::MalformedCommit {
                oid: commit_oid,
                reason: "object is not a commit".to_string(),
            }
            .into())),
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::commit::Author;
    use crate::artifacts::objects::object_type::ObjectType;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    fn commit(database: &Database, parent: Option<ObjectId>, message: &str) -> ObjectId {
        let tree = database.put(ObjectType::Tree, b"").unwrap();
        let author = Author::new("A U Thor".to_string(), "author@example.com".to_string());
        database
            .store(&Commit::new(parent, tree, author, message.to_string()))
            .unwrap()
    }

    #[test]
    fn walks_parents_newest_first() {
        let dir = TempDir::new().unwrap();
        let database = Database::new(dir.path().to_path_buf().into_boxed_path());
        let first = commit(&database, None, "first");
        let second = commit(&database, Some(first.clone()), "second");
        let third = commit(&database, Some(second.clone()), "third");

        let walked = RevList::from_tip(&database, &third)
            .map(|item| item.map(|(oid, commit)| (oid, commit.message().to_string())))
            .collect::<anyhow::Result<Vec<_>>>()
            .unwrap();

        assert_eq!(
            walked,
            vec![
                (third, "third".to_string()),
                (second, "second".to_string()),
                (first, "first".to_string()),
            ]
        );
    }

    #[test]
    fn zero_tip_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let database = Database::new(dir.path().to_path_buf().into_boxed_path());

        assert_eq!(RevList::from_tip(&database, &ObjectId::zero()).count(), 0);
    }

    #[test]
    fn blob_tip_is_not_a_commit() {
        let dir = TempDir::new().unwrap();
        let database = Database::new(dir.path().to_path_buf().into_boxed_path());
        let blob = database.put(ObjectType::Blob, b"data").unwrap();

        let error = RevList::from_tip(&database, &blob).next().unwrap().unwrap_err();

        assert!(matches!(
            error.downcast_ref::<TwigError>(),
            Some(TwigError::MalformedCommit { .. })
        ));
    }
}
