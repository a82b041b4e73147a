//! The match state machine: stage, turn and both players' boards.
//!
//! ```text
//! settings ──start──▶ placingShips(P1) ──P1 fleet complete──▶ [PassToPlayer2]
//!                     placingShips(P2) ──P2 fleet complete──▶ [BeginPlay]
//!                     playing(P1) ──hit──▶ playing(same turn)
//!                                 ──miss─▶ [PassTurn(other)]
//!                                 ──fleet sunk─▶ gameOver
//! ```
//!
//! Bracketed transitions are deferred: the engine queues a
//! [`PendingTransition`] and waits for [`MatchEngine::apply_transition`].
//! Every operation either commits fully or returns an error with the state
//! untouched.

#[cfg(not(feature = "std"))]
use alloc::{
    collections::VecDeque,
    string::ToString,
    vec::Vec,
};
#[cfg(feature = "std")]
use std::collections::VecDeque;

use core::fmt;
use core::time::Duration;

use log::{debug, info, warn};

use crate::board::PlayerState;
use crate::common::{GuessResult, MatchError};
use crate::config::{PASS_TURN_DELAY, SWITCH_SIDES_DELAY};
use crate::coordinate::Coordinate;
use crate::events::{MatchEvent, PendingTransition, TransitionKind};
use crate::geometry::{coordinate_to_cells, ship_orientation_of};
use crate::player::Player;
use crate::settings::{MatchSettings, ShipCounts};
use crate::ship::{Orientation, ShipPlacement, ShipType};

/// Top-level phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum MatchStage {
    Settings,
    PlacingShips,
    Playing,
    GameOver,
}

impl fmt::Display for MatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchStage::Settings => "settings",
            MatchStage::PlacingShips => "placingShips",
            MatchStage::Playing => "playing",
            MatchStage::GameOver => "gameOver",
        })
    }
}

/// What to do when a player fires at a cell already fired upon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum RepeatFirePolicy {
    /// Accept the shot and record it again.
    #[default]
    Allow,
    /// Fail with `MatchError::AlreadyFired`.
    Reject,
}

/// Suggested delays attached to pending transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionTiming {
    pub switch_sides: Duration,
    pub pass_turn: Duration,
}

impl TransitionTiming {
    /// No delays; transitions can be applied as soon as they are requested.
    pub const IMMEDIATE: TransitionTiming = TransitionTiming {
        switch_sides: Duration::ZERO,
        pass_turn: Duration::ZERO,
    };
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            switch_sides: SWITCH_SIDES_DELAY,
            pass_turn: PASS_TURN_DELAY,
        }
    }
}

/// Engine behaviour that is not part of the persisted match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchConfig {
    pub repeat_fire: RepeatFirePolicy,
    pub timing: TransitionTiming,
}

/// Serializable match state. Settings are stored separately.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct MatchSnapshot {
    pub stage: MatchStage,
    pub turn: Option<Player>,
    pub player1: PlayerState,
    pub player2: PlayerState,
    /// Whether the turn holder may still fire this turn.
    #[cfg_attr(feature = "std", serde(default = "default_guess_available"))]
    pub guess_available: bool,
}

#[cfg(feature = "std")]
fn default_guess_available() -> bool {
    true
}

/// Core game logic for one hot-seat match between two players.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    config: MatchConfig,
    stage: MatchStage,
    turn: Option<Player>,
    settings: Option<MatchSettings>,
    player1: PlayerState,
    player2: PlayerState,
    guess_available: bool,
    pending: Option<PendingTransition>,
    next_transition_id: u64,
    winner: Option<Player>,
    events: VecDeque<MatchEvent>,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

impl MatchEngine {
    /// A fresh engine in the `settings` stage.
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            stage: MatchStage::Settings,
            turn: None,
            settings: None,
            player1: PlayerState::new(),
            player2: PlayerState::new(),
            guess_available: false,
            pending: None,
            next_transition_id: 1,
            winner: None,
            events: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn stage(&self) -> MatchStage {
        self.stage
    }

    pub fn turn(&self) -> Option<Player> {
        self.turn
    }

    pub fn settings(&self) -> Option<&MatchSettings> {
        self.settings.as_ref()
    }

    pub fn player(&self, player: Player) -> &PlayerState {
        match player {
            Player::Player1 => &self.player1,
            Player::Player2 => &self.player2,
        }
    }

    fn player_mut(&mut self, player: Player) -> &mut PlayerState {
        match player {
            Player::Player1 => &mut self.player1,
            Player::Player2 => &mut self.player2,
        }
    }

    pub fn player1(&self) -> &PlayerState {
        &self.player1
    }

    pub fn player2(&self) -> &PlayerState {
        &self.player2
    }

    /// Whether the turn holder may fire right now.
    pub fn guess_available(&self) -> bool {
        self.stage == MatchStage::Playing && self.pending.is_none() && self.guess_available
    }

    pub fn pending_transition(&self) -> Option<PendingTransition> {
        self.pending
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Display name of the winner once the match is over.
    pub fn winner_name(&self) -> Option<&str> {
        let winner = self.winner?;
        self.settings.as_ref().map(|s| s.player_name(winner))
    }

    /// Ships the acting player still has to place, during `placingShips`.
    pub fn remaining_ship_counts(&self) -> Option<ShipCounts> {
        if self.stage != MatchStage::PlacingShips {
            return None;
        }
        let quota = self.settings.as_ref()?.ship_counts;
        Some(self.player(self.turn?).remaining_counts(&quota))
    }

    /// Take every queued notification, oldest first.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        self.events.drain(..).collect()
    }

    /// Enter `placingShips` with validated settings. Player1 places first.
    pub fn start(&mut self, settings: MatchSettings) -> Result<(), MatchError> {
        let result = self.try_start(settings);
        result.map_err(|e| self.reject(e))
    }

    fn try_start(&mut self, settings: MatchSettings) -> Result<(), MatchError> {
        self.require_stage(MatchStage::Settings, "start a match")?;
        settings.validate()?;
        info!(
            "match started: {} vs {} on {}x{}",
            settings.player1_name, settings.player2_name, settings.board_size, settings.board_size
        );
        self.settings = Some(settings);
        self.player1 = PlayerState::new();
        self.player2 = PlayerState::new();
        self.winner = None;
        self.set_stage(MatchStage::PlacingShips);
        self.set_turn(Some(Player::Player1));
        Ok(())
    }

    /// Place a ship for the acting player, anchored at `anchor`.
    ///
    /// Returns `Ok(false)` without doing anything when `anchor` is `None`
    /// (the drop landed outside the board). When the placement completes
    /// the acting player's fleet, a transition is requested.
    pub fn place_ship(
        &mut self,
        anchor: Option<Coordinate>,
        ship: ShipType,
        orientation: Orientation,
    ) -> Result<bool, MatchError> {
        let result = self.try_place_ship(anchor, ship, orientation);
        result.map_err(|e| self.reject(e))
    }

    fn try_place_ship(
        &mut self,
        anchor: Option<Coordinate>,
        ship: ShipType,
        orientation: Orientation,
    ) -> Result<bool, MatchError> {
        let player = self.acting_player(MatchStage::PlacingShips, "place ships")?;
        let Some(anchor) = anchor else {
            return Ok(false);
        };
        let settings = self.settings.as_ref().ok_or(MatchError::InternalError)?;
        let board_size = settings.board_size;
        let quota = settings.ship_counts.get(ship) as usize;
        let total = settings.ship_counts.total();

        if self.player(player).placed_count(ship) >= quota {
            return Err(MatchError::ShipTypeExhausted(ship));
        }
        let cells = coordinate_to_cells(anchor, ship, orientation, board_size)?;
        let placement = ShipPlacement::new(ship, cells);
        self.player_mut(player).add_placement(placement.clone())?;
        debug!("{} placed {} at {:?}", player, ship, placement.coordinates);
        self.events.push_back(MatchEvent::ShipPlaced { player, placement });

        if self.player(player).placed_total() == total {
            let kind = match player {
                Player::Player1 => TransitionKind::PassToPlayer2,
                Player::Player2 => TransitionKind::BeginPlay,
            };
            self.request_transition(kind, self.config.timing.switch_sides);
        }
        Ok(true)
    }

    /// Remove every ship the acting player has placed so far.
    pub fn reset_placements(&mut self) -> Result<(), MatchError> {
        let result = self
            .acting_player(MatchStage::PlacingShips, "reset placements")
            .map(|player| {
                self.player_mut(player).clear_placements();
                debug!("{} cleared their placements", player);
                self.events.push_back(MatchEvent::PlacementsCleared(player));
            });
        result.map_err(|e| self.reject(e))
    }

    /// Fire at `coord` on the opponent's board.
    ///
    /// A hit keeps the turn; a miss consumes the shot and requests a
    /// `PassTurn` transition. Sinking the opponent's last ship ends the match
    /// immediately with the shooter as winner.
    pub fn fire_at(&mut self, coord: Coordinate) -> Result<GuessResult, MatchError> {
        let result = self.try_fire_at(coord);
        result.map_err(|e| self.reject(e))
    }

    fn try_fire_at(&mut self, coord: Coordinate) -> Result<GuessResult, MatchError> {
        let shooter = self.acting_player(MatchStage::Playing, "fire")?;
        if !self.guess_available {
            return Err(MatchError::NoGuessAvailable);
        }
        let board_size = self
            .settings
            .as_ref()
            .ok_or(MatchError::InternalError)?
            .board_size;
        if !coord.in_bounds(board_size) {
            return Err(MatchError::OutOfBounds);
        }
        let target = shooter.opponent();
        if self.config.repeat_fire == RepeatFirePolicy::Reject
            && self.player(target).was_fired_at(coord)
        {
            return Err(MatchError::AlreadyFired(coord));
        }

        let result = self.player_mut(target).receive_fire(coord);
        debug!("{} fired at {}: {:?}", shooter, coord, result);
        self.events.push_back(MatchEvent::Fired {
            by: shooter,
            at: coord,
            result,
        });

        if self.check_game_over(shooter) {
            return Ok(result);
        }
        if !result.is_hit() {
            self.guess_available = false;
            self.request_transition(TransitionKind::PassTurn(target), self.config.timing.pass_turn);
        }
        Ok(result)
    }

    /// Apply the pending transition with the given id.
    ///
    /// Fails with `StaleTransition`, changing nothing, if the id does not
    /// match (already applied, or the match was reset in between).
    pub fn apply_transition(&mut self, id: u64) -> Result<TransitionKind, MatchError> {
        let pending = match self.pending {
            Some(p) if p.id == id => p,
            _ => {
                debug!("ignoring stale transition {}", id);
                return Err(MatchError::StaleTransition);
            }
        };
        self.pending = None;
        match pending.kind {
            TransitionKind::PassToPlayer2 => self.set_turn(Some(Player::Player2)),
            TransitionKind::BeginPlay => {
                self.set_stage(MatchStage::Playing);
                self.guess_available = true;
                self.set_turn(Some(Player::Player1));
            }
            TransitionKind::PassTurn(to) => {
                self.guess_available = true;
                self.set_turn(Some(to));
            }
        }
        Ok(pending.kind)
    }

    /// Apply whatever transition is pending, if any.
    pub fn apply_pending_transition(&mut self) -> Option<TransitionKind> {
        let id = self.pending?.id;
        self.apply_transition(id).ok()
    }

    /// Discard the match and return to the `settings` stage. Any transition
    /// still scheduled by the caller becomes stale.
    pub fn reset(&mut self) {
        let from = self.stage;
        self.settings = None;
        self.player1 = PlayerState::new();
        self.player2 = PlayerState::new();
        self.guess_available = false;
        self.pending = None;
        self.winner = None;
        self.turn = None;
        self.stage = MatchStage::Settings;
        info!("match reset from {}", from);
        if from != MatchStage::Settings {
            self.events.push_back(MatchEvent::StageChanged {
                from,
                to: MatchStage::Settings,
            });
        }
        self.events.push_back(MatchEvent::TurnChanged(None));
    }

    /// Serializable copy of the match state.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            stage: self.stage,
            turn: self.turn,
            player1: self.player1.clone(),
            player2: self.player2.clone(),
            guess_available: self.guess_available,
        }
    }

    /// Rebuild an engine from stored settings and a snapshot.
    ///
    /// Every placement must be a straight run ending at its anchor, within the
    /// board and the configured ship counts, and fleets must be complete for
    /// the stored stage. A transition that was pending when the
    /// snapshot was taken is requested again, and a playing match whose fleet
    /// is already sunk is moved to `gameOver`.
    pub fn restore(
        settings: Option<MatchSettings>,
        snapshot: MatchSnapshot,
        config: MatchConfig,
    ) -> Result<Self, MatchError> {
        let mut engine = Self::new(config);
        if snapshot.stage == MatchStage::Settings {
            return Ok(engine);
        }
        let settings = settings.ok_or(MatchError::InvalidStage {
            operation: "restore a match without settings",
            stage: snapshot.stage,
        })?;
        settings.validate()?;
        let turn = snapshot.turn.unwrap_or(Player::Player1);

        for (player, saved) in [
            (Player::Player1, snapshot.player1),
            (Player::Player2, snapshot.player2),
        ] {
            let state = engine.player_mut(player);
            for placement in saved.ship_locations {
                check_stored_placement(&placement, settings.board_size)?;
                let ship = placement.ship_type;
                state.add_placement(placement)?;
                if state.placed_count(ship) > settings.ship_counts.get(ship) as usize {
                    return Err(MatchError::ShipTypeExhausted(ship));
                }
            }
            if saved.hit_cells.iter().any(|c| !c.in_bounds(settings.board_size)) {
                return Err(MatchError::OutOfBounds);
            }
            state.hit_cells = saved.hit_cells;
        }

        let total = settings.ship_counts.total();
        let complete = |p: Player| engine.player(p).placed_total() == total;
        let fleets_consistent = match snapshot.stage {
            MatchStage::Settings => true,
            MatchStage::PlacingShips => match turn {
                Player::Player1 => engine.player2.ship_locations.is_empty(),
                Player::Player2 => complete(Player::Player1),
            },
            MatchStage::Playing | MatchStage::GameOver => {
                complete(Player::Player1) && complete(Player::Player2)
            }
        };
        if !fleets_consistent {
            return Err(MatchError::InvalidStage {
                operation: "restore a match with incomplete fleets",
                stage: snapshot.stage,
            });
        }

        engine.settings = Some(settings);
        engine.stage = snapshot.stage;
        engine.turn = Some(turn);
        engine.guess_available = snapshot.guess_available;

        match snapshot.stage {
            MatchStage::Settings => {}
            MatchStage::PlacingShips => {
                if engine.player(turn).placed_total() == total {
                    let kind = match turn {
                        Player::Player1 => TransitionKind::PassToPlayer2,
                        Player::Player2 => TransitionKind::BeginPlay,
                    };
                    engine.request_transition(kind, config.timing.switch_sides);
                }
            }
            MatchStage::Playing => {
                if !engine.check_game_over(turn) && !engine.guess_available {
                    engine.request_transition(
                        TransitionKind::PassTurn(turn.opponent()),
                        config.timing.pass_turn,
                    );
                }
            }
            MatchStage::GameOver => {
                engine.guess_available = false;
                engine.winner = engine.decide_winner(turn);
            }
        }
        info!("match restored at stage {}", engine.stage);
        Ok(engine)
    }

    /// Winner given the current boards; the shooter takes a double sink.
    fn decide_winner(&self, shooter: Player) -> Option<Player> {
        let target_sunk = self.player(shooter.opponent()).is_fleet_sunk();
        let shooter_sunk = self.player(shooter).is_fleet_sunk();
        (target_sunk || shooter_sunk).then_some(shooter)
    }

    fn check_game_over(&mut self, shooter: Player) -> bool {
        let Some(winner) = self.decide_winner(shooter) else {
            return false;
        };
        self.winner = Some(winner);
        self.guess_available = false;
        self.pending = None;
        self.set_stage(MatchStage::GameOver);
        let winner_name = self
            .settings
            .as_ref()
            .map(|s| s.player_name(winner).to_string())
            .unwrap_or_default();
        info!("game over, winner: {} ({})", winner_name, winner);
        self.events.push_back(MatchEvent::GameOver {
            winner,
            winner_name,
        });
        true
    }

    fn acting_player(&self, stage: MatchStage, operation: &'static str) -> Result<Player, MatchError> {
        self.require_stage(stage, operation)?;
        let player = self.turn.ok_or(MatchError::InvalidStage {
            operation,
            stage: self.stage,
        })?;
        if self.pending.is_some() {
            return Err(MatchError::TransitionPending);
        }
        Ok(player)
    }

    fn require_stage(&self, stage: MatchStage, operation: &'static str) -> Result<(), MatchError> {
        if self.stage != stage {
            return Err(MatchError::InvalidStage {
                operation,
                stage: self.stage,
            });
        }
        Ok(())
    }

    fn request_transition(&mut self, kind: TransitionKind, delay: Duration) {
        let pending = PendingTransition {
            id: self.next_transition_id,
            kind,
            delay,
        };
        self.next_transition_id += 1;
        self.pending = Some(pending);
        debug!("transition requested: {:?} after {:?}", kind, delay);
        self.events.push_back(MatchEvent::TransitionRequested(pending));
    }

    fn set_stage(&mut self, to: MatchStage) {
        let from = self.stage;
        self.stage = to;
        info!("stage {} -> {}", from, to);
        self.events.push_back(MatchEvent::StageChanged { from, to });
    }

    fn set_turn(&mut self, turn: Option<Player>) {
        self.turn = turn;
        self.events.push_back(MatchEvent::TurnChanged(turn));
    }

    fn reject(&mut self, err: MatchError) -> MatchError {
        match err {
            MatchError::InvalidStage { .. } | MatchError::InternalError => {
                warn!("rejected: {}", err)
            }
            _ => debug!("rejected: {}", err),
        }
        self.events.push_back(MatchEvent::Notice(err.to_string()));
        err
    }
}

/// A stored placement must cover exactly the cells its anchor and orientation
/// expand to.
fn check_stored_placement(placement: &ShipPlacement, board_size: u8) -> Result<(), MatchError> {
    let anchor = placement.anchor().ok_or(MatchError::InternalError)?;
    let expected = coordinate_to_cells(
        anchor,
        placement.ship_type,
        ship_orientation_of(placement),
        board_size,
    )?;
    let mut cells = placement.coordinates.clone();
    cells.sort();
    if cells != expected {
        return Err(MatchError::InternalError);
    }
    Ok(())
}
