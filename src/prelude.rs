//! Convenient re-exports for common usage patterns.
//!
//! ```no_run
//! use kvbridge::prelude::*;
//!
//! let store = Store::open("prefs")?;
//! store.put("theme", &TaggedValue::from("dark"))?;
//! # Ok::<(), kvbridge::Error>(())
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Values and codec
pub use crate::codec::{CodecError, TaggedValue, ValueTag};

// Store
pub use crate::kv::{Durability, KvError, Store, StoreConfig};

// Host boundary
pub use crate::boundary::{Boundary, StoreRef};
