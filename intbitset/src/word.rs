/// Storage unit of a [`Bitset`](crate::Bitset).
pub type Word = u64;

/// Number of bits in a [`Word`].
pub const WORD_BITS: usize = Word::BITS as usize;

/// Number of bytes in a [`Word`] (and in one word of the buffer format).
pub const WORD_BYTES: usize = std::mem::size_of::<Word>();

/// The implicit value of every word past the stored range.
///
/// A `Finite` set has only the members found in its explicit words. A
/// `Cofinite` set additionally contains every integer past the stored range,
/// so its complement is finite.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Tail {
    #[default]
    Finite,
    Cofinite,
}

impl Tail {
    /// The word pattern this tail stands for.
    #[inline]
    pub const fn word(self) -> Word {
        match self {
            Tail::Finite => 0,
            Tail::Cofinite => Word::MAX,
        }
    }

    /// Decode a tail word. Anything other than all-zero or all-one is not a
    /// valid tail.
    #[inline]
    pub const fn from_word(word: Word) -> Option<Self> {
        match word {
            0 => Some(Tail::Finite),
            Word::MAX => Some(Tail::Cofinite),
            _ => None,
        }
    }

    /// Whether integers past the stored range are members.
    #[inline]
    pub const fn is_cofinite(self) -> bool {
        matches!(self, Tail::Cofinite)
    }

    /// The tail of the complemented set.
    #[inline]
    pub const fn complement(self) -> Self {
        match self {
            Tail::Finite => Tail::Cofinite,
            Tail::Cofinite => Tail::Finite,
        }
    }

    /// Combine two tails with the same bitwise function used for the words.
    ///
    /// Any bitwise function maps `{0, !0} x {0, !0}` back into `{0, !0}`.
    #[inline]
    pub(crate) fn combine(self, other: Tail, op: impl Fn(Word, Word) -> Word) -> Tail {
        if op(self.word(), other.word()) == 0 {
            Tail::Finite
        } else {
            Tail::Cofinite
        }
    }
}

/// Index of the word holding `value`.
#[inline]
pub(crate) const fn word_index(value: u32) -> usize {
    value as usize / WORD_BITS
}

/// Single-bit mask selecting `value` within its word.
#[inline]
pub(crate) const fn bit_mask(value: u32) -> Word {
    1 << (value as usize % WORD_BITS)
}

/// Largest buffer that can be addressed: every `u32` value plus the guard.
pub(crate) const MAX_WORDS: usize = word_index(u32::MAX) + 2;

/// Number of words `add`/`remove` grow to when `value` falls at or past the
/// guard word: roughly 10% headroom over `value`, plus the word holding it and
/// a fresh guard. Never more than [`MAX_WORDS`].
#[inline]
pub(crate) const fn growth_target(value: u32) -> usize {
    let value = value as u64;
    let target = ((value + value / 10) / WORD_BITS as u64) as usize + 2;
    if target > MAX_WORDS { MAX_WORDS } else { target }
}

/// Number of bits needed to store every value up to and including `value`.
#[cfg(feature = "roaring")]
#[inline]
pub(crate) const fn bits_through(value: u32) -> usize {
    (value as usize).saturating_add(1)
}
