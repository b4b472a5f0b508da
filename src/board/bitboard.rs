//! Bitboard implementation for fast line matching

use super::{Pos, MAX_CELLS};

/// Bitboard representation of one player's marks.
/// A single u32 covers the largest 5x5 grid (25 cells), bit `i` being
/// the row-major cell index `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard {
    bits: u32,
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Create a bitboard from a raw mask
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Raw mask
    #[inline]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// Set the bit for a cell index
    #[inline]
    pub fn set(&mut self, idx: usize) {
        debug_assert!(idx < MAX_CELLS);
        self.bits |= 1u32 << idx;
    }

    /// Clear the bit for a cell index
    #[inline]
    pub fn clear(&mut self, idx: usize) {
        debug_assert!(idx < MAX_CELLS);
        self.bits &= !(1u32 << idx);
    }

    /// Check if the bit for a cell index is set
    #[inline]
    pub fn get(self, idx: usize) -> bool {
        (self.bits >> idx) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(self) -> u32 {
        self.bits.count_ones()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// True if every bit of `mask` is also set here
    #[inline]
    pub fn contains(self, mask: Bitboard) -> bool {
        self.bits & mask.bits == mask.bits
    }

    /// Iterate over set bit indices in ascending (row-major) order
    pub fn iter_ones(self) -> BitboardIter {
        BitboardIter { bits: self.bits }
    }

    /// Iterate over set bits as positions on a board of width `size`
    pub fn positions(self, size: usize) -> impl Iterator<Item = Pos> {
        self.iter_ones().map(move |idx| Pos::from_index(idx, size))
    }
}

impl std::ops::BitOr for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits | rhs.bits)
    }
}

/// Iterator over set bit indices, lowest first
pub struct BitboardIter {
    bits: u32,
}

impl Iterator for BitboardIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitboardIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let mut bb = Bitboard::new();
        bb.set(0);
        bb.set(24);
        assert!(bb.get(0));
        assert!(bb.get(24));
        assert!(!bb.get(12));
        assert_eq!(bb.count(), 2);

        bb.clear(0);
        assert!(!bb.get(0));
        assert_eq!(bb.count(), 1);
    }

    #[test]
    fn test_iter_ones_ascending() {
        let mut bb = Bitboard::new();
        for idx in [7, 2, 19, 0] {
            bb.set(idx);
        }
        let ones: Vec<usize> = bb.iter_ones().collect();
        assert_eq!(ones, vec![0, 2, 7, 19]);
    }

    #[test]
    fn test_contains() {
        let line = Bitboard::from_bits(0b111);
        assert!(Bitboard::from_bits(0b1111).contains(line));
        assert!(!Bitboard::from_bits(0b1011).contains(line));
        assert!(Bitboard::new().contains(Bitboard::new()));
    }

    #[test]
    fn test_positions_use_board_width() {
        let bb = Bitboard::from_bits(1 << 5);
        assert_eq!(bb.positions(4).next(), Some(Pos::new(1, 1)));
        assert_eq!(bb.positions(5).next(), Some(Pos::new(1, 0)));
    }
}
