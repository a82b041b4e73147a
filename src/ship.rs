//! Ship types, placement orientations and placed ships.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;

use crate::bitboard::{BitBoardError, CellMask};
use crate::coordinate::Coordinate;

/// The five classes of ship. Each has a fixed length and a per-player cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum ShipType {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipType {
    /// Number of cells the ship occupies.
    pub const fn length(self) -> u8 {
        match self {
            ShipType::Carrier => 5,
            ShipType::Battleship => 4,
            ShipType::Cruiser => 3,
            ShipType::Submarine => 3,
            ShipType::Destroyer => 2,
        }
    }

    /// Most ships of this type a match may configure per player.
    pub const fn max_count(self) -> u8 {
        match self {
            ShipType::Carrier => 1,
            ShipType::Battleship => 2,
            ShipType::Cruiser => 3,
            ShipType::Submarine => 4,
            ShipType::Destroyer => 5,
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            ShipType::Carrier => "Carrier",
            ShipType::Battleship => "Battleship",
            ShipType::Cruiser => "Cruiser",
            ShipType::Submarine => "Submarine",
            ShipType::Destroyer => "Destroyer",
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis along which a ship extends from its anchor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Orientation {
    /// Anchor is the bottom cell; the ship extends towards row `A`.
    BottomToTop,
    /// Anchor is the rightmost cell; the ship extends towards column `1`.
    RightToLeft,
}

/// A ship placed by one player: its type and the cells it covers, ordered
/// from the top (vertical) or left (horizontal) end.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ShipPlacement {
    pub ship_type: ShipType,
    pub coordinates: Vec<Coordinate>,
}

impl ShipPlacement {
    pub fn new(ship_type: ShipType, coordinates: Vec<Coordinate>) -> Self {
        Self {
            ship_type,
            coordinates,
        }
    }

    /// Orientation inferred from the covered cells.
    pub fn orientation(&self) -> Orientation {
        crate::geometry::ship_orientation_of(self)
    }

    /// The cell the ship was anchored on: the bottom cell of a vertical ship,
    /// the rightmost cell of a horizontal one.
    pub fn anchor(&self) -> Option<Coordinate> {
        self.coordinates.iter().copied().max()
    }

    /// Whether `coord` is this ship's anchor cell.
    pub fn is_anchor_cell(&self, coord: Coordinate) -> bool {
        self.anchor() == Some(coord)
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.coordinates.contains(&coord)
    }

    /// Occupancy mask of the ship.
    pub fn mask(&self) -> Result<CellMask, BitBoardError> {
        CellMask::from_cells(&self.coordinates)
    }

    /// True once every covered cell appears in `hits`.
    pub fn is_sunk(&self, hits: &CellMask) -> bool {
        self.mask().is_ok_and(|ship| ship.is_subset_of(hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(list: &[&str]) -> Vec<Coordinate> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn lengths_and_caps() {
        assert_eq!(ShipType::Carrier.length(), 5);
        assert_eq!(ShipType::Submarine.length(), 3);
        assert_eq!(ShipType::Destroyer.max_count(), 5);
        assert_eq!(ShipType::Battleship.to_string(), "Battleship");
    }

    #[test]
    fn anchor_is_bottom_or_rightmost_cell() {
        let vertical = ShipPlacement::new(ShipType::Cruiser, cells(&["A4", "B4", "C4"]));
        assert_eq!(vertical.orientation(), Orientation::BottomToTop);
        assert!(vertical.is_anchor_cell("C4".parse().unwrap()));

        let horizontal = ShipPlacement::new(ShipType::Destroyer, cells(&["E9", "E10"]));
        assert_eq!(horizontal.orientation(), Orientation::RightToLeft);
        assert_eq!(horizontal.anchor(), Some("E10".parse().unwrap()));
        assert!(!horizontal.is_anchor_cell("E9".parse().unwrap()));
    }

    #[test]
    fn sunk_when_all_cells_hit() {
        let ship = ShipPlacement::new(ShipType::Destroyer, cells(&["B3", "C3"]));
        let mut hits = CellMask::from_cells(&cells(&["B3"])).unwrap();
        assert!(!ship.is_sunk(&hits));
        hits.insert("C3".parse().unwrap()).unwrap();
        assert!(ship.is_sunk(&hits));
    }
}
