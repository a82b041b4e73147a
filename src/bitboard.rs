//! Fixed-size occupancy masks over the grid, packed into an unsigned integer.
//!
//! Placement overlap checks and ship/fleet sunk detection are set operations
//! on these masks. The grid stride is `N`, so any board up to `N×N` fits; smaller
//! boards simply never touch the upper rows and columns.

use core::fmt;
use core::ops::BitOrAssign;
use core::mem;
use num_traits::{PrimInt, Unsigned, Zero};

use crate::config::BOARD_SIZE_MAX;
use crate::coordinate::Coordinate;

/// Mask wide enough for the largest supported board.
pub type CellMask = BitBoard<u128, { BOARD_SIZE_MAX as usize }>;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitBoardError {
    /// Coordinate does not fit in the `N×N` stride.
    IndexOutOfBounds { row: usize, col: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::IndexOutOfBounds { row, col } => {
                write!(f, "IndexOutOfBounds: row={}, col={}", row, col)
            }
        }
    }
}

/// A set of cells on an `N×N` grid stored in the unsigned integer `T`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Create an empty mask.
    #[inline]
    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    /// Build a mask from a list of coordinates.
    pub fn from_cells<'a, I>(cells: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut mask = Self::new();
        for c in cells {
            mask.insert(*c)?;
        }
        Ok(mask)
    }

    /// Number of cells in the set.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Whether `coord` is in the set.
    pub fn contains(&self, coord: Coordinate) -> Result<bool, BitBoardError> {
        let idx = Self::index(coord)?;
        Ok(((self.bits >> idx) & T::one()) != T::zero())
    }

    /// Adds `coord` to the set.
    pub fn insert(&mut self, coord: Coordinate) -> Result<(), BitBoardError> {
        let idx = Self::index(coord)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    /// True when the two masks share at least one cell.
    pub fn intersects(&self, other: &Self) -> bool {
        !(self.bits & other.bits).is_zero()
    }

    /// True when every cell of `self` is also in `other`.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        (self.bits & !other.bits).is_zero()
    }

    #[inline]
    fn index(coord: Coordinate) -> Result<usize, BitBoardError> {
        let (row, col) = (coord.row() as usize, coord.col() as usize);
        if row >= N || col >= N || N * N > mem::size_of::<T>() * 8 {
            Err(BitBoardError::IndexOutOfBounds { row, col })
        } else {
            Ok(row * N + col)
        }
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}>:", N)?;
        for r in 0..N {
            for c in 0..N {
                let bit = if ((self.bits >> (r * N + c)) & T::one()) != T::zero() {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", bit)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T, const N: usize> BitOrAssign for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits = self.bits | rhs.bits;
    }
}
