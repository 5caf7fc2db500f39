use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Sub, SubAssign};

use crate::bitset::Bitset;
use crate::word::Word;

/// Number of words an operation on `x` and `y` has to look at: the larger
/// significant size plus a guard word. Past it both operands are uniformly
/// equal to their tails.
#[inline]
pub(crate) fn adapted_len(x: &Bitset, y: &Bitset) -> usize {
    x.significant_size().max(y.significant_size()) + 1
}

#[inline]
fn or(x: Word, y: Word) -> Word {
    x | y
}

#[inline]
fn and(x: Word, y: Word) -> Word {
    x & y
}

#[inline]
fn xor(x: Word, y: Word) -> Word {
    x ^ y
}

#[inline]
fn and_not(x: Word, y: Word) -> Word {
    x & !y
}

/// Build a new set from `x` and `y`, combining words and tails with `op`.
///
/// Neither operand is grown: indices past an operand's buffer read its tail.
fn combine(x: &Bitset, y: &Bitset, op: impl Fn(Word, Word) -> Word) -> Bitset {
    let len = adapted_len(x, y);
    let words = (0..len)
        .map(|i| op(x.word_or_tail(i), y.word_or_tail(i)))
        .collect();

    Bitset::from_raw_parts(words, x.tail().combine(y.tail(), op))
}

impl Bitset {
    /// Grow `self` and `other` so that both store at least the larger
    /// significant size plus a guard word. Returns that common word count.
    ///
    /// The algebra and [`compare`](Bitset::compare) read shorter operands
    /// through their tail instead, so calling this is never required for
    /// correctness; it is useful to pre-size two sets that are about to be
    /// combined repeatedly.
    pub fn adapt(&mut self, other: &mut Bitset) -> usize {
        let len = adapted_len(self, other);
        self.resize_to(len);
        other.resize_to(len);
        len
    }

    /// Apply `op` word by word to `self` and `src`, storing into `self`.
    ///
    /// Every stored word of `self` is rewritten, including those past the
    /// common length, so that the guard keeps matching the new tail.
    fn combine_with(&mut self, src: &Bitset, op: impl Fn(Word, Word) -> Word) {
        let len = adapted_len(self, src);
        self.resize_to(len);

        for (i, word) in self.words_mut().iter_mut().enumerate() {
            *word = op(*word, src.word_or_tail(i));
        }

        let tail = self.tail().combine(src.tail(), &op);
        self.set_tail(tail);
        self.invalidate();
    }

    /// Members of `self` or `other`.
    pub fn union(&self, other: &Bitset) -> Bitset {
        combine(self, other, or)
    }

    /// Members of both `self` and `other`.
    pub fn intersection(&self, other: &Bitset) -> Bitset {
        combine(self, other, and)
    }

    /// Members of exactly one of `self` and `other`.
    pub fn symmetric_difference(&self, other: &Bitset) -> Bitset {
        combine(self, other, xor)
    }

    /// Members of `self` that are not in `other`.
    pub fn difference(&self, other: &Bitset) -> Bitset {
        combine(self, other, and_not)
    }

    /// In-place [`union`](Bitset::union).
    pub fn union_with(&mut self, other: &Bitset) {
        self.combine_with(other, or);
    }

    /// In-place [`intersection`](Bitset::intersection).
    pub fn intersect_with(&mut self, other: &Bitset) {
        self.combine_with(other, and);
    }

    /// In-place [`symmetric_difference`](Bitset::symmetric_difference).
    pub fn symmetric_difference_with(&mut self, other: &Bitset) {
        self.combine_with(other, xor);
    }

    /// In-place [`difference`](Bitset::difference).
    pub fn difference_with(&mut self, other: &Bitset) {
        self.combine_with(other, and_not);
    }

    /// Every `u32` value not in `self`.
    pub fn complement(&self) -> Bitset {
        let mut complement = self.clone();
        complement.complement_in_place();
        complement
    }

    /// Flip every stored word and the tail.
    ///
    /// Words equal to the tail stay equal to the flipped tail, so the
    /// significant size is unchanged.
    pub fn complement_in_place(&mut self) {
        for word in self.words_mut() {
            *word = !*word;
        }

        let tail = self.tail().complement();
        self.set_tail(tail);
        self.invalidate_cardinality();
    }
}

impl BitOr for &Bitset {
    type Output = Bitset;

    fn bitor(self, rhs: Self) -> Bitset {
        self.union(rhs)
    }
}

impl BitAnd for &Bitset {
    type Output = Bitset;

    fn bitand(self, rhs: Self) -> Bitset {
        self.intersection(rhs)
    }
}

impl BitXor for &Bitset {
    type Output = Bitset;

    fn bitxor(self, rhs: Self) -> Bitset {
        self.symmetric_difference(rhs)
    }
}

impl Sub for &Bitset {
    type Output = Bitset;

    fn sub(self, rhs: Self) -> Bitset {
        self.difference(rhs)
    }
}

impl Not for &Bitset {
    type Output = Bitset;

    fn not(self) -> Bitset {
        self.complement()
    }
}

impl BitOrAssign<&Bitset> for Bitset {
    fn bitor_assign(&mut self, rhs: &Bitset) {
        self.union_with(rhs);
    }
}

impl BitAndAssign<&Bitset> for Bitset {
    fn bitand_assign(&mut self, rhs: &Bitset) {
        self.intersect_with(rhs);
    }
}

impl BitXorAssign<&Bitset> for Bitset {
    fn bitxor_assign(&mut self, rhs: &Bitset) {
        self.symmetric_difference_with(rhs);
    }
}

impl SubAssign<&Bitset> for Bitset {
    fn sub_assign(&mut self, rhs: &Bitset) {
        self.difference_with(rhs);
    }
}
