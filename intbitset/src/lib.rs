//! Growable bitset of `u32` values with an implicit tail.
//!
//! A [`Bitset`] stores an explicit prefix of 64-bit words plus a single
//! [`Tail`] that gives the value of every word past it. A finite set has an
//! all-zero tail; a cofinite set ("every value except these") has an all-one
//! tail. Set algebra combines the tails with the same bitwise function as the
//! words, so complements, differences against the universe and friends all
//! stay proportional to their explicit part.
//!
//! ```
//! use intbitset::{Bitset, Cardinality};
//!
//! let mut ids = Bitset::universe();
//! ids.remove(5);
//! assert!(!ids.contains(5));
//! assert!(ids.contains(10_000));
//! assert_eq!(ids.cardinality(), Cardinality::Infinite);
//! ```

mod algebra;
mod bitset;
mod buffer;
mod compare;
mod error;
#[cfg(feature = "roaring")]
mod roaring;
mod word;

#[cfg(test)]
mod tests_algebra;

pub use bitset::{Bitset, Cardinality, Iter};
pub use compare::SubsetRelation;
pub use error::{BitsetError, Result};
pub use word::{Tail, WORD_BITS, WORD_BYTES, Word};
