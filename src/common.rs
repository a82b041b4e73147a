//! Common types: shot results and the error taxonomy of the engine.

use core::fmt;

use crate::bitboard::BitBoardError;
use crate::config::SHIP_AREA_MARGIN;
use crate::coordinate::Coordinate;
use crate::game::MatchStage;
use crate::player::Player;
use crate::ship::ShipType;

/// Result of a shot at the opponent's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GuessResult {
    /// Shot struck a ship that is still afloat.
    Hit,
    /// Shot struck open water.
    Miss,
    /// Shot struck the last intact cell of a ship.
    Sink(ShipType),
}

impl GuessResult {
    /// Both `Hit` and `Sink` count as hits.
    pub fn is_hit(&self) -> bool {
        !matches!(self, GuessResult::Miss)
    }
}

/// Settings rejected by the validator. Shown inline on the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError {
    /// A player name is missing.
    NameRequired(Player),
    /// Board edge outside the legal range.
    InvalidBoardSize(u8),
    /// Every ship count is zero.
    NoShipsConfigured,
    /// A ship count is above that type's cap.
    ShipCountExceeded(ShipType),
    /// Fleet too large for the board.
    BoardTooSmall { cells: u32, required: u32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NameRequired(p) => write!(f, "{} name is required", p.display_label()),
            SettingsError::InvalidBoardSize(n) => write!(
                f,
                "Board size {} must be between {} and {}",
                n,
                crate::config::BOARD_SIZE_MIN,
                crate::config::BOARD_SIZE_MAX
            ),
            SettingsError::NoShipsConfigured => write!(f, "At least one ship required"),
            SettingsError::ShipCountExceeded(t) => write!(
                f,
                "Too many {} ships. Maximum value is {}",
                t,
                t.max_count()
            ),
            SettingsError::BoardTooSmall { cells, required } => write!(
                f,
                "Too many ships: fleet needs {} cells ({}x its area) but the board has {}",
                required, SHIP_AREA_MARGIN, cells
            ),
        }
    }
}

/// Errors returned by match operations. State is never modified when one of
/// these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// Operation attempted outside the stage where it is legal.
    InvalidStage {
        operation: &'static str,
        stage: MatchStage,
    },
    /// A stage or turn change is waiting to be applied.
    TransitionPending,
    /// The acting player has already used their shot this turn.
    NoGuessAvailable,
    /// Ship would extend past the board edge.
    OutOfBounds,
    /// Ship would overlap another ship of the same player.
    CellOccupied,
    /// Every ship of this type is already placed.
    ShipTypeExhausted(ShipType),
    /// Cell already fired upon while repeat fire is rejected.
    AlreadyFired(Coordinate),
    /// Transition id does not match the pending transition.
    StaleTransition,
    /// Settings failed validation.
    Settings(SettingsError),
    /// Geometry produced an impossible result.
    InternalError,
}

impl From<SettingsError> for MatchError {
    fn from(err: SettingsError) -> Self {
        MatchError::Settings(err)
    }
}

impl From<BitBoardError> for MatchError {
    fn from(_: BitBoardError) -> Self {
        MatchError::InternalError
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::InvalidStage { operation, stage } => {
                write!(f, "Cannot {} during the {} stage", operation, stage)
            }
            MatchError::TransitionPending => write!(f, "Switching sides, please wait"),
            MatchError::NoGuessAvailable => write!(f, "No guesses left this turn"),
            MatchError::OutOfBounds => write!(f, "Invalid location"),
            MatchError::CellOccupied => write!(f, "Space is already occupied by another ship"),
            MatchError::ShipTypeExhausted(t) => write!(f, "All {} ships are already placed", t),
            MatchError::AlreadyFired(c) => write!(f, "{} was already fired upon", c),
            MatchError::StaleTransition => write!(f, "Transition is no longer pending"),
            MatchError::Settings(e) => write!(f, "Invalid settings: {}", e),
            MatchError::InternalError => write!(f, "Ship coordinates were calculated incorrectly"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SettingsError {}
#[cfg(feature = "std")]
impl std::error::Error for MatchError {}
#[cfg(feature = "std")]
impl std::error::Error for BitBoardError {}
