use crate::{KvPair, KvStore, StoreResult};
use std::collections::BTreeMap;

/// Pending writes of one transaction; `None` marks a deletion.
pub type WriteSet = BTreeMap<Vec<u8>, Option<Vec<u8>>>;

/// Transaction-scoped overlay over a committed store.
///
/// Reads fall through to the parent unless the key was written in this
/// transaction. Nothing reaches the parent until [`TxStore::commit`] hands the
/// write set back to the host, which applies it once the parent borrow ends.
/// Dropping the overlay discards every write.
pub struct TxStore<'a, S: KvStore + ?Sized> {
    parent: &'a S,
    writes: WriteSet,
}

impl<'a, S: KvStore + ?Sized> TxStore<'a, S> {
    pub fn new(parent: &'a S) -> Self {
        Self {
            parent,
            writes: WriteSet::new(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        !self.writes.is_empty()
    }

    pub fn commit(self) -> WriteSet {
        log::trace!("committing {} pending writes", self.writes.len());
        self.writes
    }

    pub fn rollback(self) {
        log::trace!("discarding {} pending writes", self.writes.len());
    }
}

impl<S: KvStore + ?Sized> std::fmt::Debug for TxStore<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxStore")
            .field("writes", &self.writes.len())
            .finish()
    }
}

impl<S: KvStore + ?Sized> KvStore for TxStore<'_, S> {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        match self.writes.get(key) {
            Some(pending) => Ok(pending.clone()),
            None => self.parent.get(key),
        }
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> StoreResult<()> {
        self.writes.insert(key.to_vec(), Some(value));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        self.writes.insert(key.to_vec(), None);
        Ok(())
    }

    fn iter_prefix(&self, prefix: &[u8]) -> StoreResult<Vec<KvPair>> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.parent.iter_prefix(prefix)?.into_iter().collect();
        for (key, value) in self.writes.range(prefix.to_vec()..) {
            if !key.starts_with(prefix) {
                break;
            }
            match value {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        Ok(merged.into_iter().collect())
    }
}
