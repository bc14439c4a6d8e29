//! Unified error type for the kvbridge library.
//!
//! This module provides a single [`Error`] type that encompasses all errors
//! that can occur in the library, making it easier to handle errors in
//! application code.

use thiserror::Error;

use crate::codec::CodecError;
use crate::kv::{ConfigError, KvError};

/// Unified error type for all kvbridge operations.
///
/// # Example
///
/// ```no_run
/// use kvbridge::{Result, Store, StoreConfig, TaggedValue};
///
/// fn do_something() -> Result<()> {
///     let config = StoreConfig::from_file("kvbridge.toml")?;
///     let store = Store::open_with("prefs", &config)?;
///     store.put("volume", &TaggedValue::Int32(7))?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Error from value encoding or decoding.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Error from store operations.
    #[error(transparent)]
    Kv(#[from] KvError),

    /// Error loading store configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if this is a codec error.
    pub fn is_codec(&self) -> bool {
        matches!(self, Self::Codec(_))
    }

    /// Returns `true` if this is a store error.
    pub fn is_kv(&self) -> bool {
        matches!(self, Self::Kv(_))
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns `true` if this is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
