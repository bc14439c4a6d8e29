//! Error types for the store module.

use thiserror::Error;

use crate::codec::CodecError;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum KvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fjall error: {0}")]
    Fjall(#[from] fjall::Error),

    #[error("Store not found at {0} and create_if_missing is off")]
    NotFound(String),

    #[error("Store is closed")]
    Closed,

    #[error("Value codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Engine error: {0}")]
    Engine(String),
}

impl KvError {
    /// Returns `true` for failures reported by the storage engine.
    pub fn is_engine(&self) -> bool {
        matches!(self, Self::Fjall(_) | Self::Io(_) | Self::Engine(_))
    }

    /// Returns `true` if the stored bytes could not be decoded as requested.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Codec(e) if e.is_decode())
    }

    /// Returns `true` if the operation was issued on a closed store.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}
