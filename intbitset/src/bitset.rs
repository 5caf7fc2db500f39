use std::cell::Cell;
use std::fmt;
use std::iter::FusedIterator;

use tracing::trace;

use crate::word::{Tail, WORD_BITS, Word, bit_mask, growth_target, word_index};

/// Number of members of a [`Bitset`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Cardinality {
    Finite(u64),
    /// The set is cofinite: every integer past the stored range is a member.
    Infinite,
}

impl Cardinality {
    /// The member count, or `None` for a cofinite set.
    pub fn finite(self) -> Option<u64> {
        match self {
            Cardinality::Finite(n) => Some(n),
            Cardinality::Infinite => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CardinalityCache {
    Unknown,
    Infinite,
    Count(u64),
}

/// A growable set of `u32` values backed by a word buffer and an implicit
/// tail.
///
/// Word `i` holds the values `i * 64 .. (i + 1) * 64`, least significant bit
/// first. Every word past the stored buffer has the value of the [`Tail`], so
/// both finite sets and sets whose complement is finite ("everything except
/// these") take space proportional to their explicit part only.
///
/// The last stored word is a guard: it always equals the tail word and is
/// never counted as significant. Capacity only ever grows.
///
/// Significant size and cardinality are cached. The caches live in [`Cell`]s
/// so that queries take `&self`; a `Bitset` is therefore `Send` but not
/// `Sync`.
#[derive(Clone, Debug)]
pub struct Bitset {
    words: Vec<Word>,
    tail: Tail,
    size: Cell<Option<usize>>,
    cardinality: Cell<CardinalityCache>,
}

impl Default for Bitset {
    fn default() -> Self {
        Self::new()
    }
}

impl Bitset {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty set that stores the values `0..bits` without
    /// growing.
    pub fn with_capacity(bits: usize) -> Self {
        Self::filled(bits, Tail::Finite)
    }

    /// Create the set of all `u32` values.
    pub fn universe() -> Self {
        Self::universe_with_capacity(0)
    }

    /// Create the set of all `u32` values with `bits` values stored
    /// explicitly, so that removals below `bits` do not grow the buffer.
    pub fn universe_with_capacity(bits: usize) -> Self {
        Self::filled(bits, Tail::Cofinite)
    }

    fn filled(bits: usize, tail: Tail) -> Self {
        let cardinality = match tail {
            Tail::Finite => CardinalityCache::Count(0),
            Tail::Cofinite => CardinalityCache::Infinite,
        };

        Self {
            words: vec![tail.word(); bits.div_ceil(WORD_BITS) + 1],
            tail,
            size: Cell::new(Some(0)),
            cardinality: Cell::new(cardinality),
        }
    }

    /// Assemble a set from a word buffer whose last word is the guard.
    ///
    /// Both caches start unknown.
    pub(crate) fn from_raw_parts(words: Vec<Word>, tail: Tail) -> Self {
        debug_assert_eq!(words.last(), Some(&tail.word()), "guard word must equal the tail");

        Self {
            words,
            tail,
            size: Cell::new(None),
            cardinality: Cell::new(CardinalityCache::Unknown),
        }
    }

    /// Replace the buffer and tail of `self`, keeping nothing but the
    /// allocation.
    pub(crate) fn replace_raw_parts(&mut self, words: impl IntoIterator<Item = Word>, tail: Tail) {
        self.words.clear();
        self.words.extend(words);
        self.tail = tail;
        self.invalidate();
        debug_assert_eq!(self.words.last(), Some(&tail.word()), "guard word must equal the tail");
    }

    /// The implicit value of every word past the stored buffer.
    pub fn tail(&self) -> Tail {
        self.tail
    }

    /// Whether the set is cofinite (contains every value past some point).
    pub fn is_infinite(&self) -> bool {
        self.tail.is_cofinite()
    }

    /// Number of stored words, including the guard.
    pub fn allocated(&self) -> usize {
        self.words.len()
    }

    /// The number of heap-allocated bytes used by this set.
    pub fn heap_bytes(&self) -> usize {
        self.words.capacity() * std::mem::size_of::<Word>()
    }

    pub(crate) fn words(&self) -> &[Word] {
        &self.words
    }

    pub(crate) fn words_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }

    pub(crate) fn set_tail(&mut self, tail: Tail) {
        self.tail = tail;
    }

    /// The word at `index`, or the tail word past the stored buffer.
    #[inline]
    pub(crate) fn word_or_tail(&self, index: usize) -> Word {
        self.words.get(index).copied().unwrap_or(self.tail.word())
    }

    /// Mark both caches as unknown.
    #[inline]
    pub(crate) fn invalidate(&mut self) {
        self.size.set(None);
        self.cardinality.set(CardinalityCache::Unknown);
    }

    /// Mark the cardinality cache alone as unknown.
    #[inline]
    pub(crate) fn invalidate_cardinality(&mut self) {
        self.cardinality.set(CardinalityCache::Unknown);
    }

    /// Grow the buffer to `word_count` words. No-op if it is already at
    /// least that large.
    ///
    /// New words (the new guard included) take the tail value, so no member
    /// changes and the caches stay valid.
    pub fn resize_to(&mut self, word_count: usize) {
        if word_count <= self.words.len() {
            return;
        }

        trace!(from = self.words.len(), to = word_count, "growing bitset");
        self.words.resize(word_count, self.tail.word());
    }

    /// Set every stored word back to the tail value, turning the set into
    /// either the empty set or the universe. The allocation is kept.
    pub fn reset(&mut self) {
        self.words.fill(self.tail.word());
        self.size.set(Some(0));
        self.cardinality.set(match self.tail {
            Tail::Finite => CardinalityCache::Count(0),
            Tail::Cofinite => CardinalityCache::Infinite,
        });
    }

    /// Test whether `value` is in the set.
    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        match self.words.get(word_index(value)) {
            Some(word) => word & bit_mask(value) != 0,
            None => self.tail.is_cofinite(),
        }
    }

    /// Insert `value`, growing the buffer if needed.
    ///
    /// Values at or past the guard word are already members of a cofinite
    /// set, so that case neither grows nor touches the caches.
    pub fn add(&mut self, value: u32) {
        let index = word_index(value);
        if index >= self.words.len() - 1 {
            if self.tail.is_cofinite() {
                return;
            }
            self.resize_to(growth_target(value));
        }

        self.words[index] |= bit_mask(value);
        self.invalidate();
    }

    /// Remove `value`, growing the buffer if needed.
    ///
    /// Values at or past the guard word are already absent from a finite
    /// set, so that case neither grows nor touches the caches.
    pub fn remove(&mut self, value: u32) {
        let index = word_index(value);
        if index >= self.words.len() - 1 {
            if !self.tail.is_cofinite() {
                return;
            }
            self.resize_to(growth_target(value));
        }

        self.words[index] &= !bit_mask(value);
        self.invalidate();
    }

    /// Number of words needed to describe the set: every word at or past
    /// this index (the guard included) equals the tail word.
    pub fn significant_size(&self) -> usize {
        if let Some(size) = self.size.get() {
            return size;
        }

        let tail = self.tail.word();
        let stored = &self.words[..self.words.len() - 1];
        let size = stored.iter().rposition(|&word| word != tail).map_or(0, |i| i + 1);

        self.size.set(Some(size));
        size
    }

    /// Count the members of the set.
    ///
    /// A cofinite set is always [`Cardinality::Infinite`]. A finite count is
    /// cached until the next mutation.
    pub fn cardinality(&self) -> Cardinality {
        if self.tail.is_cofinite() {
            return Cardinality::Infinite;
        }

        if let CardinalityCache::Count(n) = self.cardinality.get() {
            return Cardinality::Finite(n);
        }

        let n = self.words.iter().map(|word| word.count_ones() as u64).sum();
        self.cardinality.set(CardinalityCache::Count(n));
        Cardinality::Finite(n)
    }

    /// Returns `true` if the set has no members.
    pub fn is_empty(&self) -> bool {
        if self.tail.is_cofinite() {
            return false;
        }

        if self.cardinality.get() == CardinalityCache::Count(0) {
            return true;
        }

        self.words.iter().all(|&word| word == 0)
    }

    /// The smallest member strictly greater than `after`, or the smallest
    /// member overall when `after` is `None`.
    ///
    /// Returns `None` once the members are exhausted. A cofinite set never
    /// runs out below `u32::MAX`: past the stored buffer every value is the
    /// next member.
    pub fn next_member(&self, after: Option<u32>) -> Option<u32> {
        let start = match after {
            Some(after) => after.checked_add(1)?,
            None => 0,
        };

        let mut index = word_index(start);
        if let Some(&first) = self.words.get(index) {
            // Drop the bits below `start` in the first word only.
            let mut word = first & (Word::MAX << (start as usize % WORD_BITS));
            loop {
                if word != 0 {
                    let value = index * WORD_BITS + word.trailing_zeros() as usize;
                    return u32::try_from(value).ok();
                }

                index += 1;
                match self.words.get(index) {
                    Some(&next) => word = next,
                    None => break,
                }
            }
        }

        self.tail.is_cofinite().then_some(start)
    }

    /// Iterate over the members in ascending order.
    ///
    /// The iterator of a cofinite set only ends at `u32::MAX`.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            bitset: self,
            last: None,
            done: false,
        }
    }
}

/// Ascending iterator over the members of a [`Bitset`].
///
/// Built on [`Bitset::next_member`], feeding back the last value yielded.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    bitset: &'a Bitset,
    last: Option<u32>,
    done: bool,
}

impl Iterator for Iter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.done {
            return None;
        }

        match self.bitset.next_member(self.last) {
            Some(value) => {
                self.last = Some(value);
                Some(value)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Bitset {
    type Item = u32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl Extend<u32> for Bitset {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl FromIterator<u32> for Bitset {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut bitset = Bitset::new();
        bitset.extend(iter);
        bitset
    }
}

/// Finite sets print their members, `{1, 3, 64}`. Cofinite sets print the
/// members of their complement, `!{5}`.
impl fmt::Display for Bitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flip = self.tail.word();

        if self.tail.is_cofinite() {
            write!(f, "!")?;
        }
        write!(f, "{{")?;

        let mut first = true;
        for (index, &word) in self.words.iter().enumerate() {
            let mut bits = word ^ flip;
            while bits != 0 {
                let value = index * WORD_BITS + bits.trailing_zeros() as usize;
                bits &= bits - 1;

                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{value}")?;
                first = false;
            }
        }

        write!(f, "}}")
    }
}
