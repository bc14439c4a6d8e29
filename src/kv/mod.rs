//! Persistent store module.
//!
//! This module provides [`Store`], which owns one fjall database and reads
//! and writes [`TaggedValue`](crate::TaggedValue)s under byte-string keys.
//! The engine is reached through the [`Engine`] trait.

mod config;
mod engine;
mod error;
mod store;

pub use config::{ConfigError, DEFAULT_KEYSPACE, Durability, StoreConfig};
pub use engine::{Engine, FjallEngine};
pub use error::KvError;
pub use store::Store;
