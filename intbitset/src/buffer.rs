//! Flat word-buffer encoding of a [`Bitset`].
//!
//! ```text
//! [word 0] [word 1] ... [word n-1] [tail]
//! ```
//!
//! Word `i` holds the values `i * 64 .. (i + 1) * 64`, least significant bit
//! first. The final word is the tail, all-zero for a finite set and all-one
//! for a cofinite one. It doubles as the guard word of the decoded set. In
//! byte form every word is 8 bytes, little-endian.

use tracing::debug;
use zerocopy::byteorder::little_endian::U64;
use zerocopy::{FromBytes, IntoBytes};

use crate::bitset::Bitset;
use crate::error::{BitsetError, Result};
use crate::word::{Tail, WORD_BYTES, Word};

/// Validate the last word of a buffer of `len` bytes.
fn decode_tail(last: Option<Word>, len: usize) -> Result<Tail> {
    let Some(last) = last else {
        debug!(len, "rejecting empty bitset buffer");
        return Err(BitsetError::MalformedBuffer { len });
    };

    Tail::from_word(last).ok_or_else(|| {
        debug!(len, tail = last, "rejecting bitset buffer with invalid tail");
        BitsetError::InvalidTail(last)
    })
}

/// View `bytes` as little-endian words.
fn word_view(bytes: &[u8]) -> Result<&[U64]> {
    <[U64]>::ref_from_bytes(bytes).map_err(|_| {
        debug!(len = bytes.len(), "rejecting bitset buffer of partial words");
        BitsetError::MalformedBuffer { len: bytes.len() }
    })
}

impl Bitset {
    /// Decode a set from its word buffer.
    pub fn from_words(words: &[Word]) -> Result<Self> {
        let tail = decode_tail(words.last().copied(), words.len() * WORD_BYTES)?;
        Ok(Bitset::from_raw_parts(words.to_vec(), tail))
    }

    /// Decode a set from its byte buffer.
    ///
    /// The length must be a positive multiple of 8. No alignment is required.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let view = word_view(bytes)?;
        let tail = decode_tail(view.last().map(|word| word.get()), bytes.len())?;
        Ok(Bitset::from_raw_parts(
            view.iter().map(|word| word.get()).collect(),
            tail,
        ))
    }

    /// Like [`from_words`](Bitset::from_words), reusing the allocation of
    /// `self`. On error `self` is left untouched.
    pub fn reset_from_words(&mut self, words: &[Word]) -> Result<()> {
        let tail = decode_tail(words.last().copied(), words.len() * WORD_BYTES)?;
        self.replace_raw_parts(words.iter().copied(), tail);
        Ok(())
    }

    /// Like [`from_bytes`](Bitset::from_bytes), reusing the allocation of
    /// `self`. On error `self` is left untouched.
    pub fn reset_from_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let view = word_view(bytes)?;
        let tail = decode_tail(view.last().map(|word| word.get()), bytes.len())?;
        self.replace_raw_parts(view.iter().map(|word| word.get()), tail);
        Ok(())
    }

    /// Encode the set as its significant words followed by the tail word.
    pub fn to_words(&self) -> Vec<Word> {
        let size = self.significant_size();
        let mut words = Vec::with_capacity(size + 1);
        words.extend_from_slice(&self.words()[..size]);
        words.push(self.tail().word());
        words
    }

    /// Encode the set as little-endian bytes. See [`to_words`](Bitset::to_words).
    pub fn to_bytes(&self) -> Vec<u8> {
        let words: Vec<U64> = self.to_words().into_iter().map(U64::new).collect();
        words.as_bytes().to_vec()
    }

    /// The number of bytes [`to_bytes`](Bitset::to_bytes) produces.
    pub fn serialized_size(&self) -> usize {
        (self.significant_size() + 1) * WORD_BYTES
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::bitset::Bitset;
    use crate::word::Word;

    /// Serialized as the word buffer of [`Bitset::to_words`].
    impl Serialize for Bitset {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.to_words())
        }
    }

    impl<'de> Deserialize<'de> for Bitset {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let words = Vec::<Word>::deserialize(deserializer)?;
            Bitset::from_words(&words).map_err(D::Error::custom)
        }
    }
}
