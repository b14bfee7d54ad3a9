//! Error types for NBT encoding, decoding, and tag construction.

use crate::types::TagKind;

/// Errors that can occur while decoding or encoding an NBT document.
#[derive(Debug, thiserror::Error)]
pub enum NbtError {
    #[error("format error: {0}")]
    Format(String),

    #[error("truncated input: unexpected end of data while reading {0}")]
    Truncated(&'static str),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NbtError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Returns `true` if the input ended before a field was complete.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated(_))
    }
}

/// Errors raised when a tag value or container mutation breaks a tag invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{kind}'s value must be an integer in the range [{min}, {max}], got {value}")]
    OutOfRange {
        kind: TagKind,
        value: i128,
        min: i128,
        max: i128,
    },

    #[error("{kind} length {len} exceeds the maximum of {max}")]
    TooLong { kind: TagKind, len: usize, max: usize },

    #[error("list holds {expected} elements, cannot insert {found}")]
    WrongElementKind { expected: TagKind, found: TagKind },

    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("key not found: {0:?}")]
    KeyNotFound(String),
}

impl ValidationError {
    /// Checks a UTF-8 length against the u16 prefix used for strings and names.
    pub(crate) fn check_str_len(kind: TagKind, s: &str) -> Result<(), Self> {
        check_len(kind, s.len(), u16::MAX as usize)
    }

    /// Checks an element count against the u32 prefix used for arrays and lists.
    pub(crate) fn check_seq_len(kind: TagKind, len: usize) -> Result<(), Self> {
        check_len(kind, len, u32::MAX as usize)
    }
}

fn check_len(kind: TagKind, len: usize, max: usize) -> Result<(), ValidationError> {
    if len > max {
        Err(ValidationError::TooLong { kind, len, max })
    } else {
        Ok(())
    }
}
