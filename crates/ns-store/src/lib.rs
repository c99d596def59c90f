//! Key-value storage abstractions plus in-memory, filesystem and transaction-scoped backends.

pub mod codec;
mod fs_store;
mod mem_store;
mod partition;
mod tx_store;

pub use codec::{RootParseError, StateRoot};
pub use fs_store::FsStore;
pub use mem_store::MemStore;
pub use partition::Partition;
pub use tx_store::{TxStore, WriteSet};

use std::{io, path::PathBuf};

pub type StoreResult<T> = Result<T, StoreError>;
pub type KvPair = (Vec<u8>, Vec<u8>);

/// Byte-keyed store with read-your-writes semantics.
///
/// Implementations are not required to be durable; `flush` is the point where a
/// persistent backend makes committed writes survive a restart.
pub trait KvStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    fn has(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> StoreResult<()>;

    fn delete(&mut self, key: &[u8]) -> StoreResult<()>;

    /// All entries whose key starts with `prefix`, sorted by key.
    fn iter_prefix(&self, prefix: &[u8]) -> StoreResult<Vec<KvPair>>;

    /// Apply a committed write set produced by a [`TxStore`].
    fn apply(&mut self, writes: WriteSet) -> StoreResult<()> {
        for (key, value) in writes {
            match value {
                Some(value) => self.set(&key, value)?,
                None => self.delete(&key)?,
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> StoreResult<()> {
        Ok(())
    }
}

impl<S: KvStore + ?Sized> KvStore for &mut S {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn has(&self, key: &[u8]) -> StoreResult<bool> {
        (**self).has(key)
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        (**self).delete(key)
    }

    fn iter_prefix(&self, prefix: &[u8]) -> StoreResult<Vec<KvPair>> {
        (**self).iter_prefix(prefix)
    }

    fn apply(&mut self, writes: WriteSet) -> StoreResult<()> {
        (**self).apply(writes)
    }

    fn flush(&mut self) -> StoreResult<()> {
        (**self).flush()
    }
}

/// Root over every entry of a store, in key order. Matches the name a
/// [`FsStore`] gives the snapshot of the same entries.
pub fn state_hash<S: KvStore + ?Sized>(store: &S) -> StoreResult<StateRoot> {
    Ok(StateRoot::of_entries(&store.iter_prefix(&[])?)?)
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("CBOR serialization error: {0}")]
    Cbor(#[from] serde_cbor::Error),
    #[error("snapshot hash mismatch at {path:?}: expected {expected}, got {actual}")]
    HashMismatch {
        path: PathBuf,
        expected: StateRoot,
        actual: StateRoot,
    },
    #[error("invalid snapshot head at {path:?}: {source}")]
    InvalidHead {
        path: PathBuf,
        #[source]
        source: RootParseError,
    },
}

pub(crate) fn io_error(path: impl Into<PathBuf>, err: io::Error) -> StoreError {
    StoreError::Io {
        path: path.into(),
        source: err,
    }
}

pub(crate) fn prefix_range(
    map: &std::collections::BTreeMap<Vec<u8>, Vec<u8>>,
    prefix: &[u8],
) -> Vec<KvPair> {
    map.range(prefix.to_vec()..)
        .take_while(|(k, _)| k.starts_with(prefix))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
