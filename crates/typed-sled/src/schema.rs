use std::fmt::Debug;

use crate::codec::{KeyCodec, ValueCodec};

/// Name of the sled tree backing a schema.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct TreeName(pub &'static str);

impl TreeName {
    pub fn into_inner(self) -> &'static str {
        self.0
    }
}

impl From<&'static str> for TreeName {
    fn from(value: &'static str) -> Self {
        Self(value)
    }
}

/// Ties a tree name to the key and value types stored in it.
pub trait Schema: Debug + Send + Sync + Sized + 'static {
    const TREE_NAME: TreeName;

    type Key: KeyCodec<Self>;
    type Value: ValueCodec<Self>;
}
