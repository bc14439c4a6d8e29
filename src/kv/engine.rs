//! The storage engine seam and its fjall implementation.

use std::path::Path;

use fjall::{Database, Keyspace, KeyspaceCreateOptions, PersistMode};

use crate::logging::{debug, trace};

use super::config::StoreConfig;
use super::error::KvError;

/// The ordered key-value operations a [`Store`](super::Store) needs.
///
/// Keys and values are raw bytes. Implementations must apply
/// [`delete_batch`](Self::delete_batch) atomically and return
/// [`keys`](Self::keys) in their natural forward order.
pub trait Engine: Send + Sync {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KvError>;

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KvError>;

    /// Remove one key. Removing an absent key succeeds.
    fn delete(&self, key: &[u8]) -> Result<(), KvError>;

    /// Remove all keys in one atomic write.
    fn delete_batch(&self, keys: &[Vec<u8>]) -> Result<(), KvError>;

    /// Every live key, in engine order.
    fn keys(&self) -> Result<Vec<Vec<u8>>, KvError>;
}

/// An [`Engine`] backed by one fjall keyspace.
///
/// The journal is persisted after every write according to the configured
/// [`Durability`](super::Durability).
pub struct FjallEngine {
    db: Database,
    keyspace: Keyspace,
    persist: Option<PersistMode>,
}

impl FjallEngine {
    /// Open (or create) the fjall database at `path`.
    pub fn open(path: impl AsRef<Path>, config: &StoreConfig) -> Result<Self, KvError> {
        let path = path.as_ref();

        if !config.create_if_missing && !path.exists() {
            return Err(KvError::NotFound(path.display().to_string()));
        }

        let mut builder = Database::builder(path);
        if let Some(bytes) = config.cache_size {
            builder = builder.cache_size(bytes);
        }
        let db = builder.open()?;
        let keyspace = db.keyspace(config.keyspace.as_str(), KeyspaceCreateOptions::default)?;

        debug!(
            path = %path.display(),
            keyspace = %config.keyspace,
            durability = ?config.durability,
            "fjall database opened"
        );
        Ok(Self {
            db,
            keyspace,
            persist: config.durability.persist_mode(),
        })
    }

    fn persist(&self) -> Result<(), KvError> {
        if let Some(mode) = self.persist {
            self.db.persist(mode)?;
        }
        Ok(())
    }
}

impl Engine for FjallEngine {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), KvError> {
        self.keyspace.insert(key, value)?;
        self.persist()
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KvError> {
        Ok(self.keyspace.get(key)?.map(|v| v.to_vec()))
    }

    fn delete(&self, key: &[u8]) -> Result<(), KvError> {
        self.keyspace.remove(key)?;
        self.persist()
    }

    fn delete_batch(&self, keys: &[Vec<u8>]) -> Result<(), KvError> {
        let mut batch = self.db.batch();
        for key in keys {
            batch.remove(&self.keyspace, key.as_slice());
        }
        batch.commit()?;
        trace!(key_count = keys.len(), "batch committed");
        self.persist()
    }

    fn keys(&self) -> Result<Vec<Vec<u8>>, KvError> {
        let mut keys = Vec::new();
        for kv in self.keyspace.iter() {
            keys.push(kv.key()?.to_vec());
        }
        Ok(keys)
    }
}
