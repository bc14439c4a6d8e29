//! Host-facing operation table.
//!
//! Hosts never see a [`Store`] directly. [`Boundary::open`] returns a
//! [`StoreRef`] token and every other operation takes that token back. An
//! unknown, closed, or never-issued token makes the operation a no-op that
//! reports absence:
//!
//! - getters return `None` when the handle is unknown, the key is missing,
//!   the stored bytes do not decode, or the engine fails;
//! - setters and removals return `false` in the same situations.
//!
//! Failures are logged (with the `logging` feature) and never propagated.
//!
//! # Module Organization
//!
//! - [`registry`]: token issue and lookup
//! - [`ffi`]: the same table as `extern "C"` functions

pub mod ffi;
mod registry;

pub use registry::{Registry, StoreRef};

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::codec::{TaggedValue, ValueTag};
use crate::kv::{KvError, Store, StoreConfig};
use crate::logging::{debug, warn};

static GLOBAL: Lazy<Boundary> = Lazy::new(Boundary::new);

/// The flat table of host operations over a [`Registry`].
///
/// Method names follow the host API (`stringForKey` becomes
/// [`string_for_key`](Self::string_for_key), and so on).
#[derive(Default)]
pub struct Boundary {
    registry: Registry,
    config: StoreConfig,
}

impl Boundary {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// A table whose [`open`](Self::open) uses `config` for every store.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            registry: Registry::new(),
            config,
        }
    }

    /// The process-wide table used by [`ffi`].
    pub fn global() -> &'static Boundary {
        &GLOBAL
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Open (creating if missing) the store at `path`.
    pub fn open(&self, path: &str) -> Option<StoreRef> {
        if path.is_empty() {
            warn!("refusing to open store at empty path");
            return None;
        }
        match Store::open_with(path, &self.config) {
            Ok(store) => Some(self.registry.insert(store)),
            Err(e) => {
                warn!(path = path, error = %e, "open failed");
                None
            }
        }
    }

    /// Close the store behind `handle`. Unknown handles are ignored.
    pub fn close(&self, handle: StoreRef) {
        let Some(store) = self.registry.remove(handle) else {
            debug!(handle = %handle, "close on unknown handle");
            return;
        };
        if let Ok(mut store) = Arc::try_unwrap(store) {
            store.close();
        }
    }

    pub fn all_keys(&self, handle: StoreRef) -> Option<Vec<String>> {
        self.with_store(handle, "allKeys", |store| {
            let keys = store.all_keys()?;
            Ok(keys
                .iter()
                .map(|k| String::from_utf8_lossy(k).into_owned())
                .collect())
        })
    }

    pub fn remove_value_for_key(&self, handle: StoreRef, key: &str) -> bool {
        self.with_store(handle, "removeValueForKey", |store| store.delete(key))
            .is_some()
    }

    pub fn remove_values_for_keys<K: AsRef<str>>(&self, handle: StoreRef, keys: &[K]) -> bool {
        self.with_store(handle, "removeValuesForKeys", |store| {
            store.delete_many(keys.iter().map(|k| k.as_ref().as_bytes()))
        })
        .is_some()
    }

    pub fn string_for_key(&self, handle: StoreRef, key: &str) -> Option<String> {
        self.typed(handle, "stringForKey", key, ValueTag::String)
            .and_then(TaggedValue::into_string)
    }

    pub fn bool_for_key(&self, handle: StoreRef, key: &str) -> Option<bool> {
        self.typed(handle, "boolForKey", key, ValueTag::Bool)
            .and_then(|v| v.as_bool())
    }

    pub fn int32_for_key(&self, handle: StoreRef, key: &str) -> Option<i32> {
        self.typed(handle, "int32ForKey", key, ValueTag::Int32)
            .and_then(|v| v.as_i32())
    }

    pub fn uint32_for_key(&self, handle: StoreRef, key: &str) -> Option<u32> {
        self.with_store(handle, "uint32ForKey", |store| store.get_u32(key))
            .flatten()
    }

    pub fn int64_for_key(&self, handle: StoreRef, key: &str) -> Option<i64> {
        self.typed(handle, "int64ForKey", key, ValueTag::Int64)
            .and_then(|v| v.as_i64())
    }

    pub fn uint64_for_key(&self, handle: StoreRef, key: &str) -> Option<u64> {
        self.with_store(handle, "uint64ForKey", |store| store.get_u64(key))
            .flatten()
    }

    pub fn float_for_key(&self, handle: StoreRef, key: &str) -> Option<f32> {
        self.typed(handle, "floatForKey", key, ValueTag::Float)
            .and_then(|v| v.as_f32())
    }

    pub fn double_for_key(&self, handle: StoreRef, key: &str) -> Option<f64> {
        self.typed(handle, "doubleForKey", key, ValueTag::Double)
            .and_then(|v| v.as_f64())
    }

    pub fn set_string_value(&self, handle: StoreRef, key: &str, value: &str) -> bool {
        self.put(handle, "setStringValue", key, TaggedValue::from(value))
    }

    pub fn set_bool_value(&self, handle: StoreRef, key: &str, value: bool) -> bool {
        self.put(handle, "setBoolValue", key, TaggedValue::Bool(value))
    }

    pub fn set_int32_value(&self, handle: StoreRef, key: &str, value: i32) -> bool {
        self.put(handle, "setInt32Value", key, TaggedValue::Int32(value))
    }

    pub fn set_uint32_value(&self, handle: StoreRef, key: &str, value: u32) -> bool {
        self.with_store(handle, "setUInt32Value", |store| store.put_u32(key, value))
            .is_some()
    }

    pub fn set_int64_value(&self, handle: StoreRef, key: &str, value: i64) -> bool {
        self.put(handle, "setInt64Value", key, TaggedValue::Int64(value))
    }

    pub fn set_uint64_value(&self, handle: StoreRef, key: &str, value: u64) -> bool {
        self.with_store(handle, "setUInt64Value", |store| store.put_u64(key, value))
            .is_some()
    }

    pub fn set_float_value(&self, handle: StoreRef, key: &str, value: f32) -> bool {
        self.put(handle, "setFloatValue", key, TaggedValue::Float(value))
    }

    pub fn set_double_value(&self, handle: StoreRef, key: &str, value: f64) -> bool {
        self.put(handle, "setDoubleValue", key, TaggedValue::Double(value))
    }

    fn typed(&self, handle: StoreRef, op: &'static str, key: &str, tag: ValueTag) -> Option<TaggedValue> {
        self.with_store(handle, op, |store| store.get(key, tag)).flatten()
    }

    fn put(&self, handle: StoreRef, op: &'static str, key: &str, value: TaggedValue) -> bool {
        self.with_store(handle, op, |store| store.put(key, &value))
            .is_some()
    }

    /// Run `f` against the store behind `handle`, collapsing every failure
    /// to `None`.
    fn with_store<T>(
        &self,
        handle: StoreRef,
        op: &'static str,
        f: impl FnOnce(&Store) -> Result<T, KvError>,
    ) -> Option<T> {
        let Some(store) = self.registry.get(handle) else {
            debug!(op = op, handle = %handle, "unknown store handle");
            return None;
        };
        match f(store.as_ref()) {
            Ok(value) => Some(value),
            Err(e) if e.is_decode() => {
                debug!(op = op, handle = %handle, error = %e, "stored value does not decode");
                None
            }
            Err(e) => {
                warn!(op = op, handle = %handle, error = %e, "operation failed");
                None
            }
        }
    }
}
