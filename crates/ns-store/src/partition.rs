use crate::{KvPair, KvStore, StoreResult};

/// Key-space slice of a shared store.
///
/// Every key is stored as `tag ++ key`, and prefix iteration strips the tag
/// again, so callers see the partition as a store of its own. Two partitions
/// whose tags are not prefixes of each other never observe each other's keys.
#[derive(Debug)]
pub struct Partition<S> {
    inner: S,
    tag: &'static [u8],
}

impl<S: KvStore> Partition<S> {
    pub fn new(inner: S, tag: &'static [u8]) -> Self {
        Self { inner, tag }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn full_key(&self, key: &[u8]) -> Vec<u8> {
        let mut full = Vec::with_capacity(self.tag.len() + key.len());
        full.extend_from_slice(self.tag);
        full.extend_from_slice(key);
        full
    }
}

impl<S: KvStore> KvStore for Partition<S> {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        self.inner.get(&self.full_key(key))
    }

    fn has(&self, key: &[u8]) -> StoreResult<bool> {
        self.inner.has(&self.full_key(key))
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> StoreResult<()> {
        let key = self.full_key(key);
        self.inner.set(&key, value)
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        let key = self.full_key(key);
        self.inner.delete(&key)
    }

    fn iter_prefix(&self, prefix: &[u8]) -> StoreResult<Vec<KvPair>> {
        let tag = self.tag.len();
        Ok(self
            .inner
            .iter_prefix(&self.full_key(prefix))?
            .into_iter()
            .map(|(mut key, value)| {
                key.drain(..tag);
                (key, value)
            })
            .collect())
    }

    fn flush(&mut self) -> StoreResult<()> {
        self.inner.flush()
    }
}
