//! Token-to-store registry backing host-visible handles.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::kv::Store;
use crate::logging::debug;

/// Opaque handle given to the host in place of a pointer.
///
/// Tokens start at 1 and are never reused within a process. `0` is never
/// issued, so hosts can use it as "no store".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreRef(u64);

impl StoreRef {
    /// Rebuild a handle from the raw number the host holds.
    ///
    /// Returns `None` for `0`. Any other value is accepted; whether it names
    /// an open store is decided by the registry lookup.
    pub fn from_raw(raw: u64) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StoreRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "store#{}", self.0)
    }
}

/// Maps handles to open stores.
///
/// Lookups clone an `Arc` under a short read lock, so store operations run
/// without holding the registry lock. Removing a handle drops the
/// registry's reference; the engine is released once the last in-flight
/// operation on it returns.
pub struct Registry {
    stores: RwLock<HashMap<u64, Arc<Store>>>,
    next: AtomicU64,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            stores: RwLock::new(HashMap::new()),
            next: AtomicU64::new(1),
        }
    }

    /// Take ownership of `store` and issue a fresh handle for it.
    pub fn insert(&self, store: Store) -> StoreRef {
        let token = self.next.fetch_add(1, Ordering::Relaxed);
        self.stores.write().insert(token, Arc::new(store));
        debug!(token = token, "store handle issued");
        StoreRef(token)
    }

    /// Look up an open store.
    pub fn get(&self, handle: StoreRef) -> Option<Arc<Store>> {
        self.stores.read().get(&handle.0).cloned()
    }

    /// Forget a handle, returning the registry's reference to its store.
    pub fn remove(&self, handle: StoreRef) -> Option<Arc<Store>> {
        let removed = self.stores.write().remove(&handle.0);
        if removed.is_some() {
            debug!(token = handle.0, "store handle released");
        }
        removed
    }

    /// Number of open handles.
    pub fn len(&self) -> usize {
        self.stores.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{Engine, KvError};

    struct NullEngine;

    impl Engine for NullEngine {
        fn put(&self, _: &[u8], _: &[u8]) -> Result<(), KvError> {
            Ok(())
        }
        fn get(&self, _: &[u8]) -> Result<Option<Vec<u8>>, KvError> {
            Ok(None)
        }
        fn delete(&self, _: &[u8]) -> Result<(), KvError> {
            Ok(())
        }
        fn delete_batch(&self, _: &[Vec<u8>]) -> Result<(), KvError> {
            Ok(())
        }
        fn keys(&self) -> Result<Vec<Vec<u8>>, KvError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_zero_is_not_a_handle() {
        assert_eq!(StoreRef::from_raw(0), None);
        assert_eq!(StoreRef::from_raw(5).map(StoreRef::as_raw), Some(5));
    }

    #[test]
    fn test_tokens_are_unique_and_nonzero() {
        let registry = Registry::new();
        let a = registry.insert(Store::with_engine(NullEngine));
        let b = registry.insert(Store::with_engine(NullEngine));
        assert_ne!(a, b);
        assert_ne!(a.as_raw(), 0);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_removed_handle_is_not_found() {
        let registry = Registry::new();
        let handle = registry.insert(Store::with_engine(NullEngine));
        assert!(registry.get(handle).is_some());
        assert!(registry.remove(handle).is_some());
        assert!(registry.get(handle).is_none());
        assert!(registry.remove(handle).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_tokens_not_reused_after_remove() {
        let registry = Registry::new();
        let first = registry.insert(Store::with_engine(NullEngine));
        registry.remove(first);
        let second = registry.insert(Store::with_engine(NullEngine));
        assert_ne!(first, second);
    }

    #[test]
    fn test_unissued_handle_is_not_found() {
        let registry = Registry::new();
        let forged = StoreRef::from_raw(0xdead_beef);
        assert!(forged.and_then(|h| registry.get(h)).is_none());
    }

    #[test]
    fn test_inflight_reference_outlives_remove() {
        let registry = Registry::new();
        let handle = registry.insert(Store::with_engine(NullEngine));
        let inflight = registry.get(handle);
        registry.remove(handle);
        assert!(inflight.is_some_and(|store| store.is_open()));
    }
}
