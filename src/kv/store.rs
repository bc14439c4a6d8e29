//! Store handle: one open engine plus the typed accessors over it.

use std::path::Path;

use crate::codec::{self, CodecError, TaggedValue, ValueTag};
use crate::logging::{debug, error, info, trace, warn};

use super::config::StoreConfig;
use super::engine::{Engine, FjallEngine};
use super::error::KvError;

/// A persistent store holding typed values under a flat key namespace.
///
/// `Store` exclusively owns one engine instance from [`open`](Self::open)
/// until [`close`](Self::close) or drop, whichever comes first. Every
/// operation on a closed store fails with [`KvError::Closed`].
///
/// # Example
///
/// ```no_run
/// use kvbridge::{Store, TaggedValue, ValueTag};
///
/// let mut store = Store::open("prefs")?;
/// store.put("volume", &TaggedValue::Int32(7))?;
/// assert_eq!(store.get("volume", ValueTag::Int32)?, Some(TaggedValue::Int32(7)));
///
/// store.delete("volume")?;
/// assert_eq!(store.get("volume", ValueTag::Int32)?, None);
/// store.close();
/// # Ok::<(), kvbridge::KvError>(())
/// ```
///
/// # Typed access
///
/// Values are stored as text via [`codec`](crate::codec). The tag passed to
/// [`get`](Self::get) has to match the one used on [`put`](Self::put); see
/// the codec module for what happens when it does not.
pub struct Store {
    engine: Option<Box<dyn Engine>>,
}

impl Store {
    /// Open the store at `path` with default options, creating it if missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, KvError> {
        Self::open_with(path, &StoreConfig::default())
    }

    /// Open the store at `path` with explicit options.
    pub fn open_with(path: impl AsRef<Path>, config: &StoreConfig) -> Result<Self, KvError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening store");

        let engine = FjallEngine::open(path, config).map_err(|e| {
            error!(path = %path.display(), error = %e, "failed to open store");
            e
        })?;

        info!(path = %path.display(), "store opened");
        Ok(Self::with_engine(engine))
    }

    /// Wrap an already open engine.
    pub fn with_engine(engine: impl Engine + 'static) -> Self {
        Self {
            engine: Some(Box::new(engine)),
        }
    }

    /// Release the engine. Closing an already closed store does nothing.
    pub fn close(&mut self) {
        if let Some(engine) = self.engine.take() {
            drop(engine);
            info!("store closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.engine.is_some()
    }

    /// Remove one key. Removing a key that does not exist succeeds.
    pub fn delete(&self, key: impl AsRef<[u8]>) -> Result<(), KvError> {
        let key = key.as_ref();
        trace!(key_len = key.len(), "deleting key");
        self.engine()?.delete(key)
    }

    /// Remove several keys in one atomic batch.
    ///
    /// Either every key is gone afterwards or, if the engine rejects the
    /// batch, none of them is.
    pub fn delete_many<I, K>(&self, keys: I) -> Result<(), KvError>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        let engine = self.engine()?;
        let keys: Vec<Vec<u8>> = keys.into_iter().map(|k| k.as_ref().to_vec()).collect();
        if keys.is_empty() {
            return Ok(());
        }

        engine.delete_batch(&keys).map_err(|e| {
            warn!(key_count = keys.len(), error = %e, "batch delete failed");
            e
        })?;
        debug!(key_count = keys.len(), "batch deleted");
        Ok(())
    }

    /// Every live key in engine order, collected eagerly.
    pub fn all_keys(&self) -> Result<Vec<Vec<u8>>, KvError> {
        let keys = self.engine()?.keys()?;
        debug!(count = keys.len(), "listed keys");
        Ok(keys)
    }

    /// Encode `value` and store it under `key`, replacing any previous value.
    pub fn put(&self, key: impl AsRef<[u8]>, value: &TaggedValue) -> Result<(), KvError> {
        let engine = self.engine()?;
        let bytes = codec::encode(value)?;
        trace!(tag = ?value.tag(), value_len = bytes.len(), "putting value");
        engine.put(key.as_ref(), &bytes)
    }

    /// Read the value under `key` as `tag`.
    ///
    /// Returns `Ok(None)` when the key does not exist and a
    /// [`KvError::Codec`] when the stored bytes do not parse as `tag`.
    pub fn get(&self, key: impl AsRef<[u8]>, tag: ValueTag) -> Result<Option<TaggedValue>, KvError> {
        let Some(bytes) = self.engine()?.get(key.as_ref())? else {
            trace!(tag = %tag, "key not found");
            return Ok(None);
        };
        let value = codec::decode(&bytes, tag).map_err(|e| {
            debug!(tag = %tag, error = %e, "stored value does not decode");
            e
        })?;
        Ok(Some(value))
    }

    /// Store an unsigned 32-bit value (as an `Int64`).
    pub fn put_u32(&self, key: impl AsRef<[u8]>, value: u32) -> Result<(), KvError> {
        self.put(key, &TaggedValue::Int64(i64::from(value)))
    }

    /// Read an unsigned 32-bit value written by [`put_u32`](Self::put_u32).
    pub fn get_u32(&self, key: impl AsRef<[u8]>) -> Result<Option<u32>, KvError> {
        let Some(value) = self.get(key, ValueTag::Int64)?.and_then(|v| v.as_i64()) else {
            return Ok(None);
        };
        let value =
            u32::try_from(value).map_err(|_| CodecError::decode("uint32", &value.to_string()))?;
        Ok(Some(value))
    }

    /// Store an unsigned 64-bit value as unsigned decimal text.
    pub fn put_u64(&self, key: impl AsRef<[u8]>, value: u64) -> Result<(), KvError> {
        let engine = self.engine()?;
        engine.put(key.as_ref(), &codec::encode_unsigned(value))
    }

    /// Read an unsigned 64-bit value.
    pub fn get_u64(&self, key: impl AsRef<[u8]>) -> Result<Option<u64>, KvError> {
        let Some(bytes) = self.engine()?.get(key.as_ref())? else {
            return Ok(None);
        };
        Ok(Some(codec::decode_unsigned(&bytes)?))
    }

    fn engine(&self) -> Result<&dyn Engine, KvError> {
        self.engine.as_deref().ok_or(KvError::Closed)
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        self.close();
    }
}
