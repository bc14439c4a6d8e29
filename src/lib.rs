//! A typed key-value store with opaque handles for foreign hosts.
//!
//! kvbridge keeps primitive values (`double`, `float`, `int32`, `int64`,
//! `bool`, `string`) in a single flat, byte-string keyed namespace backed by
//! fjall, an LSM-tree storage engine. Values are stored as plain text, and
//! callers name the type they expect when reading.
//!
//! # Quick Start
//!
//! ```no_run
//! use kvbridge::prelude::*;
//!
//! let store = Store::open("prefs")?;
//! store.put("launches", &TaggedValue::Int64(3))?;
//! let launches = store.get("launches", ValueTag::Int64)?;
//! # Ok::<(), kvbridge::Error>(())
//! ```
//!
//! Hosts that cannot hold Rust values go through [`Boundary`], which hands
//! out [`StoreRef`] tokens and reports every failure as absence:
//!
//! ```no_run
//! use kvbridge::Boundary;
//!
//! let table = Boundary::global();
//! if let Some(store) = table.open("prefs") {
//!     table.set_bool_value(store, "onboarded", true);
//!     assert_eq!(table.bool_for_key(store, "onboarded"), Some(true));
//!     table.close(store);
//! }
//! ```
//!
//! # Modules
//!
//! - [`codec`] - Tagged values and their text encoding
//! - [`kv`] - The store handle, its configuration, and the engine seam
//! - [`boundary`] - Token registry, host operation table, and C ABI
//!
//! # Feature Flags
//!
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `cli` - Enable the command-line interface binary
//! - `full` - Enable all features
#![cfg_attr(not(feature = "logging"), allow(unused_variables))]

pub mod boundary;
pub mod codec;
mod error;
pub mod kv;
mod logging;
pub mod prelude;

// Re-export the unified error type
pub use error::{Error, Result};

pub use boundary::{Boundary, Registry, StoreRef};
pub use codec::{CodecError, TaggedValue, ValueTag};
pub use kv::{ConfigError, Durability, Engine, FjallEngine, KvError, Store, StoreConfig};
