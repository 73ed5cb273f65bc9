use std::{
    marker::PhantomData,
    ops::{Bound, RangeBounds},
    sync::Arc,
};

use sled::{transaction::TransactionalTree, IVec, Iter, Tree};

use crate::{error::Result, KeyCodec, Schema, ValueCodec};

/// Decodes a raw key-value pair into typed schema types.
fn decode_pair<S: Schema>((k, v): (IVec, IVec)) -> Result<(S::Key, S::Value)> {
    let key = S::Key::decode_key(&k)?;
    let value = S::Value::decode_value(&v)?;
    Ok((key, value))
}

/// Converts a typed key bound to a raw byte bound.
fn key_bound<S: Schema>(k: Bound<&S::Key>) -> Result<Bound<Vec<u8>>> {
    let bound = match k {
        Bound::Included(k) => Bound::Included(k.encode_key()?),
        Bound::Excluded(k) => Bound::Excluded(k.encode_key()?),
        Bound::Unbounded => Bound::Unbounded,
    };
    Ok(bound)
}

/// Type-safe wrapper around a sled tree with schema-enforced operations.
#[derive(Debug)]
pub struct SledTree<S: Schema> {
    pub(crate) inner: Arc<Tree>,
    _phantom: PhantomData<S>,
}

impl<S: Schema> Clone for SledTree<S> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<S: Schema> SledTree<S> {
    pub fn new(inner: Arc<Tree>) -> Self {
        Self {
            inner,
            _phantom: PhantomData,
        }
    }

    /// Inserts a key-value pair, replacing any previous value.
    pub fn insert(&self, key: &S::Key, value: &S::Value) -> Result<()> {
        let key = key.encode_key()?;
        let value = value.encode_value()?;
        self.inner.insert(key, value)?;
        Ok(())
    }

    pub fn get(&self, key: &S::Key) -> Result<Option<S::Value>> {
        let key = key.encode_key()?;
        let val = self.inner.get(key)?;
        Ok(val.map(|v| S::Value::decode_value(&v)).transpose()?)
    }

    pub fn contains_key(&self, key: &S::Key) -> Result<bool> {
        let key = key.encode_key()?;
        Ok(self.inner.contains_key(key)?)
    }

    /// Removes a key. Missing keys are not an error.
    pub fn remove(&self, key: &S::Key) -> Result<()> {
        let key = key.encode_key()?;
        self.inner.remove(key)?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of entries. Walks the whole tree.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn first(&self) -> Result<Option<(S::Key, S::Value)>> {
        self.inner.first()?.map(decode_pair::<S>).transpose()
    }

    pub fn last(&self) -> Result<Option<(S::Key, S::Value)>> {
        self.inner.last()?.map(decode_pair::<S>).transpose()
    }

    /// Flushes dirty pages of the whole database to disk.
    pub fn flush(&self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Returns an iterator over all key-value pairs in key order.
    pub fn iter(&self) -> SledTreeIter<S> {
        SledTreeIter {
            inner: self.inner.iter(),
            _phantom: PhantomData,
        }
    }

    /// Returns an iterator over key-value pairs within the specified range.
    pub fn range<R>(&self, range: R) -> Result<SledTreeIter<S>>
    where
        R: RangeBounds<S::Key>,
    {
        let start = key_bound::<S>(range.start_bound())?;
        let end = key_bound::<S>(range.end_bound())?;
        Ok(SledTreeIter {
            inner: self.inner.range((start, end)),
            _phantom: PhantomData,
        })
    }

    /// Iterates from `start` (inclusive) to the end of the tree, or over the
    /// whole tree when `start` is `None`.
    pub fn iter_from(&self, start: Option<&S::Key>) -> Result<SledTreeIter<S>> {
        match start {
            Some(start) => self.range((Bound::Included(start), Bound::Unbounded)),
            None => Ok(self.iter()),
        }
    }

    /// Iterates over every entry whose encoded key starts with `prefix`.
    pub fn scan_prefix(&self, prefix: &[u8]) -> SledTreeIter<S> {
        SledTreeIter {
            inner: self.inner.scan_prefix(prefix),
            _phantom: PhantomData,
        }
    }
}

/// Type-safe view of a tree inside a sled transaction.
pub struct SledTransactionalTree<S: Schema> {
    inner: TransactionalTree,
    _phantom: PhantomData<S>,
}

impl<S: Schema> std::fmt::Debug for SledTransactionalTree<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledTransactionalTree")
            .field("tree", &S::TREE_NAME)
            .finish()
    }
}

impl<S: Schema> SledTransactionalTree<S> {
    pub fn new(inner: TransactionalTree) -> Self {
        Self {
            inner,
            _phantom: PhantomData,
        }
    }

    pub fn insert(&self, key: &S::Key, value: &S::Value) -> Result<()> {
        let key = key.encode_key()?;
        let value = value.encode_value()?;
        self.inner.insert(key, value)?;
        Ok(())
    }

    pub fn get(&self, key: &S::Key) -> Result<Option<S::Value>> {
        let key = key.encode_key()?;
        let val = self.inner.get(key)?;
        Ok(val.map(|v| S::Value::decode_value(&v)).transpose()?)
    }

    pub fn contains_key(&self, key: &S::Key) -> Result<bool> {
        let key = key.encode_key()?;
        Ok(self.inner.get(key)?.is_some())
    }

    pub fn remove(&self, key: &S::Key) -> Result<()> {
        let key = key.encode_key()?;
        self.inner.remove(key)?;
        Ok(())
    }

    /// Removes a key and returns the value it held.
    pub fn take(&self, key: &S::Key) -> Result<Option<S::Value>> {
        let key = key.encode_key()?;
        let old = self.inner.remove(key)?;
        Ok(old.map(|v| S::Value::decode_value(&v)).transpose()?)
    }
}

/// A typed iterator over key-value pairs in a sled tree.
pub struct SledTreeIter<S: Schema> {
    inner: Iter,
    _phantom: PhantomData<S>,
}

impl<S: Schema> std::fmt::Debug for SledTreeIter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledTreeIter")
            .field("tree", &S::TREE_NAME)
            .finish()
    }
}

impl<S: Schema> Iterator for SledTreeIter<S> {
    type Item = Result<(S::Key, S::Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|result| result.map_err(Into::into).and_then(decode_pair::<S>))
    }
}

impl<S: Schema> DoubleEndedIterator for SledTreeIter<S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|result| result.map_err(Into::into).and_then(decode_pair::<S>))
    }
}
