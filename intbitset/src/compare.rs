use std::cmp::Ordering;

use crate::algebra::adapted_len;
use crate::bitset::Bitset;
use crate::word::Word;

/// Position of two sets relative to each other in the subset lattice.
///
/// The discriminant is a 2-bit code: bit 0 is set when the right-hand side
/// has a member the left-hand side lacks, bit 1 when the left-hand side has a
/// member the right-hand side lacks.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum SubsetRelation {
    /// Both sets have the same members.
    Equal = 0,
    /// The left-hand side is a proper subset of the right-hand side.
    Subset = 1,
    /// The right-hand side is a proper subset of the left-hand side.
    Superset = 2,
    /// Neither set contains the other.
    Incomparable = 3,
}

impl SubsetRelation {
    /// The 2-bit code of this relation.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a 2-bit code. Bits above the lowest two are ignored.
    pub fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0 => SubsetRelation::Equal,
            1 => SubsetRelation::Subset,
            2 => SubsetRelation::Superset,
            _ => SubsetRelation::Incomparable,
        }
    }
}

#[inline]
fn relation_bits(x: Word, y: Word) -> u8 {
    let union = x | y;
    (u8::from(union != y) << 1) | u8::from(union != x)
}

impl Bitset {
    /// Compare `self` and `other` in the subset lattice.
    ///
    /// Scans the words up to the common length, stopping early once both
    /// sets are known to have members the other lacks, then accounts for the
    /// tails.
    pub fn compare(&self, other: &Bitset) -> SubsetRelation {
        let len = adapted_len(self, other);
        let incomparable = SubsetRelation::Incomparable.code();

        let mut code = 0;
        for i in 0..len {
            if code == incomparable {
                break;
            }
            code |= relation_bits(self.word_or_tail(i), other.word_or_tail(i));
        }
        code |= relation_bits(self.tail().word(), other.tail().word());

        SubsetRelation::from_code(code)
    }

    /// Returns `true` if every member of `self` is in `other`.
    pub fn is_subset(&self, other: &Bitset) -> bool {
        matches!(
            self.compare(other),
            SubsetRelation::Equal | SubsetRelation::Subset
        )
    }

    /// Returns `true` if every member of `other` is in `self`.
    pub fn is_superset(&self, other: &Bitset) -> bool {
        other.is_subset(self)
    }
}

/// Sets are equal when they have the same members, regardless of capacity
/// or cache state.
impl PartialEq for Bitset {
    fn eq(&self, other: &Bitset) -> bool {
        self.compare(other) == SubsetRelation::Equal
    }
}

impl Eq for Bitset {}

/// Subset ordering: `a < b` iff `a` is a proper subset of `b`.
/// Incomparable sets have no ordering.
impl PartialOrd for Bitset {
    fn partial_cmp(&self, other: &Bitset) -> Option<Ordering> {
        match self.compare(other) {
            SubsetRelation::Equal => Some(Ordering::Equal),
            SubsetRelation::Subset => Some(Ordering::Less),
            SubsetRelation::Superset => Some(Ordering::Greater),
            SubsetRelation::Incomparable => None,
        }
    }
}
