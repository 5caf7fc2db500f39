use thiserror::Error;

use crate::word::{WORD_BYTES, Word};

/// Errors that can occur when decoding or converting a bitset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BitsetError {
    /// Buffer length is zero or not a whole number of words
    #[error("malformed bitset buffer: {len} bytes is not a positive multiple of {}", WORD_BYTES)]
    MalformedBuffer { len: usize },

    /// Trailing word is neither all-zero nor all-one
    #[error("invalid bitset tail word: {0:#018x}")]
    InvalidTail(Word),

    /// The set is cofinite and cannot be materialized as a finite collection
    #[error("bitset is infinite")]
    Infinite,
}

/// A specialized Result type for bitset operations
pub type Result<T> = std::result::Result<T, BitsetError>;
