//! Board coordinates: a row letter and a column number, e.g. `B7`.
//!
//! Internally both axes are zero-based indices; the letter/number form only
//! exists at the boundary (`Display`, `FromStr` and the serialized blobs).

#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(feature = "std")]
use std::string::{String, ToString};

use core::fmt;
use core::str::FromStr;

use crate::config::BOARD_SIZE_MAX;

/// A cell on the grid. Ordered row-major (row letter first, then column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Coordinate {
    row: u8,
    col: u8,
}

/// Errors produced when parsing or constructing a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateError {
    /// Input was empty.
    Empty,
    /// First character is not a row letter.
    InvalidRow(char),
    /// Column part is missing, not a number, or zero.
    InvalidColumn,
    /// Row or column lies beyond the largest supported board.
    OutOfBoard,
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateError::Empty => write!(f, "Coordinate is empty"),
            CoordinateError::InvalidRow(c) => write!(f, "Invalid row letter '{}'", c),
            CoordinateError::InvalidColumn => write!(f, "Invalid column number"),
            CoordinateError::OutOfBoard => write!(
                f,
                "Coordinate lies outside the largest {}x{} board",
                BOARD_SIZE_MAX, BOARD_SIZE_MAX
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoordinateError {}

impl Coordinate {
    /// Build from zero-based row and column indices.
    pub fn new(row: u8, col: u8) -> Result<Self, CoordinateError> {
        if row >= BOARD_SIZE_MAX || col >= BOARD_SIZE_MAX {
            return Err(CoordinateError::OutOfBoard);
        }
        Ok(Self { row, col })
    }

    /// Build from a row letter (`'A'`..) and a one-based column number.
    pub fn from_parts(letter: char, number: u8) -> Result<Self, CoordinateError> {
        let upper = letter.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(CoordinateError::InvalidRow(letter));
        }
        if number == 0 {
            return Err(CoordinateError::InvalidColumn);
        }
        Self::new(upper as u8 - b'A', number - 1)
    }

    /// Zero-based row index (`A` is 0).
    pub fn row(&self) -> u8 {
        self.row
    }

    /// Zero-based column index (`1` is 0).
    pub fn col(&self) -> u8 {
        self.col
    }

    /// Row letter as displayed on the board edge.
    pub fn row_letter(&self) -> char {
        (b'A' + self.row) as char
    }

    /// One-based column number as displayed on the board edge.
    pub fn column_number(&self) -> u8 {
        self.col + 1
    }

    /// Whether the cell exists on a `board_size`×`board_size` grid.
    pub fn in_bounds(&self, board_size: u8) -> bool {
        self.row < board_size && self.col < board_size
    }

    /// Every coordinate of a `board_size` grid, row by row.
    pub fn all(board_size: u8) -> impl Iterator<Item = Coordinate> {
        let n = board_size.min(BOARD_SIZE_MAX);
        (0..n).flat_map(move |row| (0..n).map(move |col| Coordinate { row, col }))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_letter(), self.column_number())
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next().ok_or(CoordinateError::Empty)?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoordinateError::InvalidColumn);
        }
        let number: u8 = digits.parse().map_err(|_| CoordinateError::OutOfBoard)?;
        Self::from_parts(letter, number)
    }
}

impl TryFrom<String> for Coordinate {
    type Error = CoordinateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Coordinate> for String {
    fn from(c: Coordinate) -> Self {
        c.to_string()
    }
}
