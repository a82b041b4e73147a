//! Notifications emitted by the match engine for the presentation layer.

#[cfg(not(feature = "std"))]
use alloc::string::String;

use core::time::Duration;

use crate::common::GuessResult;
use crate::coordinate::Coordinate;
use crate::game::MatchStage;
use crate::player::Player;
use crate::ship::ShipPlacement;

/// A stage or turn change the engine wants applied after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionKind {
    /// Player1 finished placing; Player2 places next.
    PassToPlayer2,
    /// Both fleets are placed; play starts with Player1.
    BeginPlay,
    /// The shooter missed; the turn passes to the given player.
    PassTurn(Player),
}

/// Descriptor of a deferred transition. The caller shows its transition
/// screen for `delay` and then calls `MatchEngine::apply_transition(id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingTransition {
    pub id: u64,
    pub kind: TransitionKind,
    pub delay: Duration,
}

/// Something the presentation layer may want to react to.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchEvent {
    StageChanged { from: MatchStage, to: MatchStage },
    TurnChanged(Option<Player>),
    ShipPlaced { player: Player, placement: ShipPlacement },
    PlacementsCleared(Player),
    Fired { by: Player, at: Coordinate, result: GuessResult },
    TransitionRequested(PendingTransition),
    GameOver { winner: Player, winner_name: String },
    /// Transient user-facing message, typically a rejected action.
    Notice(String),
}
