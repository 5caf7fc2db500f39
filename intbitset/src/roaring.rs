use roaring::RoaringBitmap;

use crate::bitset::Bitset;
use crate::error::{BitsetError, Result};
use crate::word::bits_through;

impl Bitset {
    /// Build a finite set from a `RoaringBitmap`, sized to its largest value.
    pub fn from_roaring(rb: &RoaringBitmap) -> Self {
        let bits = rb.max().map_or(0, bits_through);
        let mut bitset = Bitset::with_capacity(bits);
        bitset.extend(rb.iter());
        bitset
    }

    /// Convert this set to a `RoaringBitmap`.
    ///
    /// Fails with [`BitsetError::Infinite`] for a cofinite set.
    pub fn to_roaring(&self) -> Result<RoaringBitmap> {
        if self.is_infinite() {
            return Err(BitsetError::Infinite);
        }

        Ok(self.iter().collect())
    }
}

impl From<&RoaringBitmap> for Bitset {
    fn from(rb: &RoaringBitmap) -> Self {
        Bitset::from_roaring(rb)
    }
}

impl TryFrom<&Bitset> for RoaringBitmap {
    type Error = BitsetError;

    fn try_from(bitset: &Bitset) -> Result<Self> {
        bitset.to_roaring()
    }
}
