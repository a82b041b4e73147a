//! Pure coordinate math: ship expansion, orientation inference, drop-target
//! resolution and fleet-sunk detection.

#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, vec::Vec};
#[cfg(feature = "std")]
use std::collections::BTreeMap;

use crate::board::PlayerState;
use crate::common::MatchError;
use crate::coordinate::Coordinate;
use crate::ship::{Orientation, ShipPlacement, ShipType};

/// A point in the presentation layer's screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Screen-space box of one rendered tile. Either end of a range may come
/// first; containment is tested against the ordered bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TileBounds {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl TileBounds {
    pub fn new(x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self { x_range, y_range }
    }

    /// Strict containment: points on an edge belong to no tile.
    pub fn contains(&self, p: ScreenPoint) -> bool {
        let (x_min, x_max) = ordered(self.x_range);
        let (y_min, y_max) = ordered(self.y_range);
        p.x > x_min && p.x < x_max && p.y > y_min && p.y < y_max
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Expand an anchor into the cells a ship covers, ordered from its top/left
/// end towards the anchor.
///
/// `BottomToTop` grows upward from the anchor in the same column,
/// `RightToLeft` grows leftward in the same row.
pub fn coordinate_to_cells(
    anchor: Coordinate,
    ship: ShipType,
    orientation: Orientation,
    board_size: u8,
) -> Result<Vec<Coordinate>, MatchError> {
    if !anchor.in_bounds(board_size) {
        return Err(MatchError::OutOfBounds);
    }
    let len = ship.length();
    match orientation {
        Orientation::BottomToTop => {
            let top = anchor
                .row()
                .checked_sub(len - 1)
                .ok_or(MatchError::OutOfBounds)?;
            (top..=anchor.row())
                .map(|row| Coordinate::new(row, anchor.col()).map_err(|_| MatchError::OutOfBounds))
                .collect()
        }
        Orientation::RightToLeft => {
            let left = anchor
                .col()
                .checked_sub(len - 1)
                .ok_or(MatchError::OutOfBounds)?;
            (left..=anchor.col())
                .map(|col| Coordinate::new(anchor.row(), col).map_err(|_| MatchError::OutOfBounds))
                .collect()
        }
    }
}

/// Find the tile whose box strictly contains `point`.
pub fn resolve_drop_target(
    point: ScreenPoint,
    tiles: &BTreeMap<Coordinate, TileBounds>,
) -> Option<Coordinate> {
    tiles
        .iter()
        .find(|(_, bounds)| bounds.contains(point))
        .map(|(coord, _)| *coord)
}

/// Vertical when every cell shares a column, horizontal otherwise.
pub fn ship_orientation_of(placement: &ShipPlacement) -> Orientation {
    let same_column = match placement.coordinates.first() {
        Some(first) => placement.coordinates.iter().all(|c| c.col() == first.col()),
        None => true,
    };
    if same_column {
        Orientation::BottomToTop
    } else {
        Orientation::RightToLeft
    }
}

/// True when every cell of the player's fleet has been fired upon.
pub fn is_fleet_sunk(state: &PlayerState) -> bool {
    match (state.occupancy(), state.hit_mask()) {
        (Ok(fleet), Ok(hits)) => fleet.is_subset_of(&hits),
        _ => false,
    }
}
