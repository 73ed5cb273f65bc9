use std::sync::Arc;

use dashmap::DashMap;
use sled::{Db, Tree};

use crate::{
    error::Result,
    schema::{Schema, TreeName},
    tree::SledTree,
};

/// Typed handle over one sled instance, caching opened trees by name.
#[derive(Debug)]
pub struct SledDb {
    /// Mapping of treenames to sled tree.
    inner_trees: DashMap<TreeName, Arc<Tree>>,
    /// The actual sled db.
    inner_db: Arc<Db>,
}

impl SledDb {
    pub fn new(inner_db: Db) -> Result<Self> {
        Ok(Self {
            inner_db: Arc::new(inner_db),
            inner_trees: DashMap::new(),
        })
    }

    /// Opens the tree of schema `S`, creating it if missing.
    pub fn get_tree<S: Schema>(&self) -> Result<SledTree<S>> {
        if let Some(tree) = self.inner_trees.get(&S::TREE_NAME) {
            return Ok(SledTree::new(tree.clone()));
        }

        let tree = Arc::new(self.inner_db.open_tree(S::TREE_NAME.into_inner())?);
        let final_tree = self.inner_trees.entry(S::TREE_NAME).or_insert(tree);
        Ok(SledTree::new(final_tree.clone()))
    }

    /// Names of all trees present on disk, including ones not opened yet.
    pub fn tree_names(&self) -> Vec<String> {
        self.inner_db
            .tree_names()
            .into_iter()
            .map(|name| String::from_utf8_lossy(&name).into_owned())
            .collect()
    }

    /// Durably writes all pending changes.
    pub fn flush(&self) -> Result<usize> {
        Ok(self.inner_db.flush()?)
    }

    /// Whether the store was recovered from an existing directory.
    pub fn was_recovered(&self) -> bool {
        self.inner_db.was_recovered()
    }
}
