#![cfg_attr(not(feature = "std"), no_std)]
//! Rules engine for a two-player, hot-seat Battleship match: settings
//! validation, ship placement, firing, turn handoff and win detection.
//!
//! Presentation layers drive a [`MatchEngine`] with discrete operations and
//! read back snapshots and [`MatchEvent`]s. Timed transitions are returned as
//! [`PendingTransition`] descriptors for the caller to schedule.

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitboard;
mod board;
mod commander;
mod common;
mod config;
mod coordinate;
mod events;
mod game;
pub mod geometry;
#[cfg(feature = "std")]
mod logging;
mod player;
#[cfg(feature = "std")]
pub mod scheduler;
mod settings;
mod ship;
#[cfg(feature = "std")]
pub mod store;

pub use bitboard::{BitBoard, BitBoardError, CellMask};
pub use board::*;
pub use commander::*;
pub use common::*;
pub use config::*;
pub use coordinate::*;
pub use events::*;
pub use game::*;
pub use geometry::{
    coordinate_to_cells, is_fleet_sunk, resolve_drop_target, ship_orientation_of, ScreenPoint,
    TileBounds,
};
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use player::*;
#[cfg(feature = "std")]
pub use scheduler::{SharedEngine, TransitionScheduler};
pub use settings::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use store::{BlobStore, FileStore, MatchStorage, MemoryStore};
