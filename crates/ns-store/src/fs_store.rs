use crate::codec::{StateRoot, decode_entries, encode_entries};
use crate::{KvPair, KvStore, MemStore, StoreError, StoreResult, io_error};
use std::{
    fmt, fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

const SNAPSHOT_DIR: &str = "snapshots";
const SNAPSHOT_EXT: &str = "cbor";
const HEAD_FILE: &str = "HEAD";

/// Filesystem-backed store rooted at `<root>`.
///
/// Entries are held in memory. [`KvStore::flush`] writes the whole store as
/// one snapshot named by its [`StateRoot`] under `<root>/snapshots/`, then
/// atomically repoints `<root>/HEAD` at it. A crash before the `HEAD` swap
/// leaves the previous snapshot current; the orphan is removed on next open.
#[derive(Clone)]
pub struct FsStore {
    root: PathBuf,
    inner: MemStore,
    head: Option<StateRoot>,
    dirty: bool,
}

impl fmt::Debug for FsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsStore")
            .field("root", &self.root)
            .field("head", &self.head)
            .field("entries", &self.inner.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl FsStore {
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        let snapshots = root.join(SNAPSHOT_DIR);
        fs::create_dir_all(&snapshots).map_err(|e| io_error(&snapshots, e))?;

        let head = Self::read_head(&root)?;
        let inner = match head {
            Some(head) => {
                let path = snapshot_path(&root, &head);
                let bytes = fs::read(&path).map_err(|e| io_error(&path, e))?;
                let actual = StateRoot::of_bytes(&bytes);
                if actual != head {
                    return Err(StoreError::HashMismatch {
                        path,
                        expected: head,
                        actual,
                    });
                }
                let entries = decode_entries(&bytes)?;
                log::debug!("loaded {} entries from {head}", entries.len());
                MemStore::from_entries(entries.into_iter().collect())
            }
            None => MemStore::new(),
        };

        let store = Self {
            root,
            inner,
            head,
            dirty: false,
        };
        store.prune_snapshots();
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root of the last flushed snapshot, `None` before the first flush.
    pub fn head(&self) -> Option<StateRoot> {
        self.head
    }

    fn read_head(root: &Path) -> StoreResult<Option<StateRoot>> {
        let path = root.join(HEAD_FILE);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(io_error(path, err)),
        };
        text.parse()
            .map(Some)
            .map_err(|source| StoreError::InvalidHead { path, source })
    }

    /// Write the snapshot file for `entries` without publishing it.
    fn write_snapshot(&self, entries: &[KvPair]) -> StoreResult<StateRoot> {
        let bytes = encode_entries(entries)?;
        let root = StateRoot::of_bytes(&bytes);
        let path = snapshot_path(&self.root, &root);
        if !path.exists() {
            write_atomic(&path, &bytes)?;
        }
        Ok(root)
    }

    fn publish(&mut self, root: StateRoot) -> StoreResult<()> {
        write_atomic(&self.root.join(HEAD_FILE), root.to_string().as_bytes())?;
        let previous = self.head.replace(root);
        if let Some(previous) = previous.filter(|previous| *previous != root) {
            let path = snapshot_path(&self.root, &previous);
            if let Err(err) = fs::remove_file(&path) {
                log::warn!("could not remove superseded snapshot {path:?}: {err}");
            }
        }
        Ok(())
    }

    /// Remove snapshot files `HEAD` does not point at. Best effort.
    fn prune_snapshots(&self) {
        let dir = self.root.join(SNAPSHOT_DIR);
        let Ok(listing) = fs::read_dir(&dir) else {
            return;
        };
        let keep = self.head.map(|head| snapshot_path(&self.root, &head));
        for entry in listing.flatten() {
            let path = entry.path();
            if Some(&path) == keep.as_ref() {
                continue;
            }
            log::debug!("removing unpublished snapshot {path:?}");
            if let Err(err) = fs::remove_file(&path) {
                log::warn!("could not remove {path:?}: {err}");
            }
        }
    }
}

fn snapshot_path(root: &Path, state: &StateRoot) -> PathBuf {
    root.join(SNAPSHOT_DIR)
        .join(format!("{}.{SNAPSHOT_EXT}", state.hex_digest()))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let tmp = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp).map_err(|e| io_error(&tmp, e))?;
    file.write_all(bytes).map_err(|e| io_error(&tmp, e))?;
    file.sync_all().map_err(|e| io_error(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| io_error(path, e))
}

impl KvStore for FsStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn has(&self, key: &[u8]) -> StoreResult<bool> {
        self.inner.has(key)
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> StoreResult<()> {
        self.dirty = true;
        self.inner.set(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        self.dirty = true;
        self.inner.delete(key)
    }

    fn iter_prefix(&self, prefix: &[u8]) -> StoreResult<Vec<KvPair>> {
        self.inner.iter_prefix(prefix)
    }

    fn flush(&mut self) -> StoreResult<()> {
        if !self.dirty {
            return Ok(());
        }
        let entries = self.inner.iter_prefix(&[])?;
        let root = self.write_snapshot(&entries)?;
        self.publish(root)?;
        log::debug!("flushed {} entries to {:?} ({root})", entries.len(), self.root);
        self.dirty = false;
        Ok(())
    }
}
