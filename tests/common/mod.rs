//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

use kvbridge::{Store, StoreConfig};

/// A scratch directory holding one store path.
///
/// The store path itself is not created, so opening it exercises the
/// create-if-missing path of the engine.
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn new() -> Result<Self, anyhow::Error> {
        let dir = TempDir::new()?;
        let path = dir.path().join("store");
        Ok(Self { _dir: dir, path })
    }

    pub fn path_str(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn open(&self) -> Result<Store, anyhow::Error> {
        Ok(Store::open(&self.path)?)
    }

    pub fn open_with(&self, config: &StoreConfig) -> Result<Store, anyhow::Error> {
        Ok(Store::open_with(&self.path, config)?)
    }
}
