use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;

impl Repository {
    /// Store the flat tree of the given index and return its id
    pub fn write_tree(&self, index: &Index) -> anyhow::Result<ObjectId> {
        let tree = Tree::build(index.entries());

        self.database().store(&tree)
    }
}
