use crate::{KvPair, KvStore, StoreResult, prefix_range};
use std::collections::BTreeMap;

/// Ordered in-memory store; the default backend for tests and ephemeral apps.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MemStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl std::fmt::Debug for MemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemStore")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn from_entries(entries: BTreeMap<Vec<u8>, Vec<u8>>) -> Self {
        Self { entries }
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn has(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.entries.contains_key(key))
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> StoreResult<()> {
        self.entries.insert(key.to_vec(), value);
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn iter_prefix(&self, prefix: &[u8]) -> StoreResult<Vec<KvPair>> {
        Ok(prefix_range(&self.entries, prefix))
    }
}
