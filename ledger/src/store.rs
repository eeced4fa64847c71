//! # Store — Embedded Persistence
//!
//! Persistence layer for Strongroom state, built on sled's embedded
//! key-value store. All on-disk data flows through this module.
//!
//! sled organizes data into named "trees" (analogous to column families),
//! each an independent B+ tree with its own keyspace. The store exposes
//! typed accessors over them: values are bincode-encoded, reads return
//! `Option<T>`, and multi-key writes within a tree go through an atomic
//! [`sled::Batch`]: either every key lands on disk or none does.
//!
//! Callers decide the tree layout; the canonical one for the CLI is a
//! single `world` tree holding the serialized coin ledger, share book,
//! and vault engine under fixed keys, written in one batch per command.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::Batch;
use std::path::Path;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying sled database failed.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// A value could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(String),
}

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Embedded persistent store.
///
/// Wraps a sled `Db` and exposes typed get/put over named trees. sled
/// trees support lock-free concurrent reads and serialized writes, so a
/// `Store` can be shared freely; the CLI uses it single-threaded.
#[derive(Debug, Clone)]
pub struct Store {
    db: sled::Db,
}

impl Store {
    /// Open or create a store at the given filesystem path.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            db: sled::open(path)?,
        })
    }

    /// Create a temporary in-memory store, cleaned up on drop.
    ///
    /// Ideal for tests: no filesystem side effects, no cleanup needed.
    pub fn temporary() -> StoreResult<Self> {
        Ok(Self {
            db: sled::Config::new().temporary(true).open()?,
        })
    }

    /// Encode a value the way the store does, for use with
    /// [`put_batch`](Self::put_batch).
    pub fn encode<T: Serialize>(value: &T) -> StoreResult<Vec<u8>> {
        bincode::serialize(value).map_err(|e| StoreError::Codec(e.to_string()))
    }

    /// Read and decode a value, `None` if the key is absent.
    pub fn get<T: DeserializeOwned>(&self, tree: &str, key: &[u8]) -> StoreResult<Option<T>> {
        let tree = self.db.open_tree(tree)?;
        match tree.get(key)? {
            Some(bytes) => {
                let value =
                    bincode::deserialize(&bytes).map_err(|e| StoreError::Codec(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Encode and write a single value.
    pub fn put<T: Serialize>(&self, tree: &str, key: &[u8], value: &T) -> StoreResult<()> {
        let tree = self.db.open_tree(tree)?;
        tree.insert(key, Self::encode(value)?)?;
        Ok(())
    }

    /// Write several pre-encoded keys to one tree atomically.
    pub fn put_batch(&self, tree: &str, entries: Vec<(Vec<u8>, Vec<u8>)>) -> StoreResult<()> {
        let tree = self.db.open_tree(tree)?;
        let mut batch = Batch::default();
        for (key, value) in entries {
            batch.insert(key, value);
        }
        tree.apply_batch(batch)?;
        Ok(())
    }

    /// Flush dirty buffers to disk.
    pub fn flush(&self) -> StoreResult<()> {
        self.db.flush()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        label: String,
        value: u64,
    }

    #[test]
    fn get_missing_key_returns_none() {
        let store = Store::temporary().unwrap();
        let got: Option<Record> = store.get("t", b"missing").unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn put_then_get_roundtrip() {
        let store = Store::temporary().unwrap();
        let record = Record {
            label: "vault".into(),
            value: 345_600,
        };
        store.put("t", b"k", &record).unwrap();
        let got: Option<Record> = store.get("t", b"k").unwrap();
        assert_eq!(got, Some(record));
    }

    #[test]
    fn trees_are_independent_keyspaces() {
        let store = Store::temporary().unwrap();
        store.put("a", b"k", &1u64).unwrap();
        store.put("b", b"k", &2u64).unwrap();
        assert_eq!(store.get::<u64>("a", b"k").unwrap(), Some(1));
        assert_eq!(store.get::<u64>("b", b"k").unwrap(), Some(2));
    }

    #[test]
    fn batch_writes_all_keys() {
        let store = Store::temporary().unwrap();
        let entries = vec![
            (b"one".to_vec(), Store::encode(&1u64).unwrap()),
            (b"two".to_vec(), Store::encode(&2u64).unwrap()),
        ];
        store.put_batch("t", entries).unwrap();
        assert_eq!(store.get::<u64>("t", b"one").unwrap(), Some(1));
        assert_eq!(store.get::<u64>("t", b"two").unwrap(), Some(2));
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store");
        {
            let store = Store::open(&path).unwrap();
            store.put("t", b"k", &7u64).unwrap();
            store.flush().unwrap();
        }
        let store = Store::open(&path).unwrap();
        assert_eq!(store.get::<u64>("t", b"k").unwrap(), Some(7));
    }
}
