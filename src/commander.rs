//! Automated players that drive a match through the engine's public
//! operations, used by the simulator and tests.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use rand::rngs::SmallRng;
use rand::Rng;

use crate::bitboard::CellMask;
use crate::board::PlayerState;
use crate::common::GuessResult;
use crate::coordinate::Coordinate;
use crate::ship::{Orientation, ShipType};

/// Interface implemented by automated players.
pub trait Commander {
    /// Pick an anchor and orientation for the next `ship` on `own` board.
    fn choose_placement(
        &mut self,
        rng: &mut SmallRng,
        own: &PlayerState,
        ship: ShipType,
        board_size: u8,
    ) -> Option<(Coordinate, Orientation)>;

    /// Pick the next cell to fire at, or `None` if every cell was tried.
    fn select_target(&mut self, rng: &mut SmallRng, board_size: u8) -> Option<Coordinate>;

    /// Inform the commander of the result of its last shot.
    fn handle_guess_result(&mut self, _coord: Coordinate, _result: GuessResult) {}
}

/// Random placement, then hunt/target firing: shoot randomly until something
/// is hit, then work the neighbours of unresolved hits.
#[derive(Debug, Default, Clone)]
pub struct HuntTargetCommander {
    fired: CellMask,
    open_hits: Vec<Coordinate>,
}

impl HuntTargetCommander {
    pub fn new() -> Self {
        Self::default()
    }

    fn unfired(&self, c: Coordinate) -> bool {
        !self.fired.contains(c).unwrap_or(true)
    }

    fn neighbours(c: Coordinate, board_size: u8) -> impl Iterator<Item = Coordinate> {
        let (r, col) = (c.row() as i16, c.col() as i16);
        [(r - 1, col), (r + 1, col), (r, col - 1), (r, col + 1)]
            .into_iter()
            .filter(move |&(r, c)| r >= 0 && c >= 0 && r < board_size as i16 && c < board_size as i16)
            .filter_map(|(r, c)| Coordinate::new(r as u8, c as u8).ok())
    }
}

impl Commander for HuntTargetCommander {
    fn choose_placement(
        &mut self,
        rng: &mut SmallRng,
        own: &PlayerState,
        ship: ShipType,
        board_size: u8,
    ) -> Option<(Coordinate, Orientation)> {
        own.random_placement(rng, ship, board_size)
    }

    fn select_target(&mut self, rng: &mut SmallRng, board_size: u8) -> Option<Coordinate> {
        let targets: Vec<Coordinate> = self
            .open_hits
            .iter()
            .flat_map(|&h| Self::neighbours(h, board_size))
            .filter(|&c| self.unfired(c))
            .collect();
        let pool: Vec<Coordinate> = if targets.is_empty() {
            Coordinate::all(board_size)
                .filter(|&c| self.unfired(c))
                .collect()
        } else {
            targets
        };
        if pool.is_empty() {
            return None;
        }
        Some(pool[rng.random_range(0..pool.len())])
    }

    fn handle_guess_result(&mut self, coord: Coordinate, result: GuessResult) {
        // Every Coordinate fits the 10x10 stride of CellMask.
        self.fired.insert(coord).ok();
        match result {
            GuessResult::Hit => self.open_hits.push(coord),
            GuessResult::Sink(_) => self.open_hits.clear(),
            GuessResult::Miss => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn targets_neighbours_after_a_hit() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut cmd = HuntTargetCommander::new();
        let hit: Coordinate = "C3".parse().unwrap();
        cmd.handle_guess_result(hit, GuessResult::Hit);
        for _ in 0..10 {
            let t = cmd.select_target(&mut rng, 5).unwrap();
            let dist = (t.row() as i16 - 2).abs() + (t.col() as i16 - 2).abs();
            assert_eq!(dist, 1);
        }
    }

    #[test]
    fn never_repeats_a_cell() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut cmd = HuntTargetCommander::new();
        let mut seen = Vec::new();
        while let Some(t) = cmd.select_target(&mut rng, 5) {
            assert!(!seen.contains(&t));
            seen.push(t);
            cmd.handle_guess_result(t, GuessResult::Miss);
        }
        assert_eq!(seen.len(), 25);
    }
}
