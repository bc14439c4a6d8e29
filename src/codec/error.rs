//! Error types for value encoding and decoding.

use thiserror::Error;

/// Errors that can occur while converting between tagged values and bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Cannot encode an untagged value")]
    Untagged,

    #[error("Cannot decode {input:?} as {tag}")]
    Decode { tag: &'static str, input: String },

    #[error("Stored bytes are not valid UTF-8 (requested {tag})")]
    InvalidUtf8 { tag: &'static str },
}

impl CodecError {
    pub(crate) fn decode(tag: &'static str, input: &str) -> Self {
        Self::Decode {
            tag,
            input: input.to_string(),
        }
    }

    /// Returns `true` if the stored bytes could not be parsed.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::InvalidUtf8 { .. })
    }
}
