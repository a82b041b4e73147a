//! Per-player board state: the fleet a player placed and the shots the
//! opponent fired at it.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use rand::Rng;

use crate::bitboard::{BitBoardError, CellMask};
use crate::common::{GuessResult, MatchError};
use crate::coordinate::Coordinate;
use crate::geometry::{self, coordinate_to_cells};
use crate::settings::ShipCounts;
use crate::ship::{Orientation, ShipPlacement, ShipType};

/// Fleet and incoming fire of one player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PlayerState {
    /// Cells the opponent fired at, in firing order. May repeat when the
    /// match allows repeat fire.
    pub hit_cells: Vec<Coordinate>,
    pub ship_locations: Vec<ShipPlacement>,
}

impl PlayerState {
    /// Empty board: no ships, no shots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ships of `ship` already placed.
    pub fn placed_count(&self, ship: ShipType) -> usize {
        self.ship_locations
            .iter()
            .filter(|p| p.ship_type == ship)
            .count()
    }

    /// Number of ships placed in total.
    pub fn placed_total(&self) -> usize {
        self.ship_locations.len()
    }

    /// Ships of each type still to be placed under `quota`.
    pub fn remaining_counts(&self, quota: &ShipCounts) -> ShipCounts {
        let mut left = *quota;
        for (ship, n) in quota.iter() {
            let placed = self.placed_count(ship).min(n as usize) as u8;
            left.set(ship, n - placed);
        }
        left
    }

    /// Occupancy mask of the whole fleet.
    pub fn occupancy(&self) -> Result<CellMask, BitBoardError> {
        let mut mask = CellMask::new();
        for ship in &self.ship_locations {
            mask |= ship.mask()?;
        }
        Ok(mask)
    }

    /// Mask of every cell the opponent fired at.
    pub fn hit_mask(&self) -> Result<CellMask, BitBoardError> {
        CellMask::from_cells(&self.hit_cells)
    }

    /// Whether `coord` has been fired upon.
    pub fn was_fired_at(&self, coord: Coordinate) -> bool {
        self.hit_cells.contains(&coord)
    }

    /// Validate and append a placement. Fails without touching the fleet if
    /// the ship would overlap one already placed.
    pub fn add_placement(&mut self, placement: ShipPlacement) -> Result<(), MatchError> {
        if placement.coordinates.len() != placement.ship_type.length() as usize {
            return Err(MatchError::InternalError);
        }
        let mask = placement.mask()?;
        if mask.count_ones() != placement.coordinates.len() {
            return Err(MatchError::InternalError);
        }
        if self.occupancy()?.intersects(&mask) {
            return Err(MatchError::CellOccupied);
        }
        self.ship_locations.push(placement);
        Ok(())
    }

    /// Drop every placement, keeping incoming fire.
    pub fn clear_placements(&mut self) {
        self.ship_locations.clear();
    }

    /// Record an opponent shot at `coord` and classify it.
    pub fn receive_fire(&mut self, coord: Coordinate) -> GuessResult {
        let target = self
            .ship_locations
            .iter()
            .position(|s| s.contains(coord));
        let Some(idx) = target else {
            self.hit_cells.push(coord);
            return GuessResult::Miss;
        };
        let was_sunk = self.ship_sunk(idx);
        self.hit_cells.push(coord);
        if !was_sunk && self.ship_sunk(idx) {
            GuessResult::Sink(self.ship_locations[idx].ship_type)
        } else {
            GuessResult::Hit
        }
    }

    fn ship_sunk(&self, idx: usize) -> bool {
        self.hit_mask()
            .is_ok_and(|hits| self.ship_locations[idx].is_sunk(&hits))
    }

    /// True when every cell of the fleet has been fired upon.
    pub fn is_fleet_sunk(&self) -> bool {
        geometry::is_fleet_sunk(self)
    }

    /// Returns a random anchor and orientation where `ship` fits without
    /// overlapping the current fleet, or `None` if no such spot exists.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        ship: ShipType,
        board_size: u8,
    ) -> Option<(Coordinate, Orientation)> {
        let occupied = self.occupancy().ok()?;
        let fits = |anchor: Coordinate, orient: Orientation| {
            coordinate_to_cells(anchor, ship, orient, board_size)
                .ok()
                .and_then(|cells| CellMask::from_cells(&cells).ok())
                .is_some_and(|mask| !mask.intersects(&occupied))
        };

        let len = ship.length();
        if len > board_size {
            return None;
        }
        for _ in 0..100 {
            let orient = if rng.random() {
                Orientation::BottomToTop
            } else {
                Orientation::RightToLeft
            };
            let (row, col) = match orient {
                Orientation::BottomToTop => (
                    rng.random_range(len - 1..board_size),
                    rng.random_range(0..board_size),
                ),
                Orientation::RightToLeft => (
                    rng.random_range(0..board_size),
                    rng.random_range(len - 1..board_size),
                ),
            };
            let anchor = Coordinate::new(row, col).ok()?;
            if fits(anchor, orient) {
                return Some((anchor, orient));
            }
        }

        // Crowded board: fall back to a full scan.
        Coordinate::all(board_size)
            .flat_map(|c| [(c, Orientation::BottomToTop), (c, Orientation::RightToLeft)])
            .find(|&(c, o)| fits(c, o))
    }
}
