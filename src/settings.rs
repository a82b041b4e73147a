//! Match configuration and its validation rules.

#[cfg(not(feature = "std"))]
use alloc::string::String;

use crate::common::SettingsError;
use crate::config::{BOARD_SIZE_MAX, BOARD_SIZE_MIN, SHIP_AREA_MARGIN, SHIP_TYPES};
use crate::player::Player;
use crate::ship::ShipType;

/// How many ships of each type every player must place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct ShipCounts {
    pub carrier: u8,
    pub battleship: u8,
    pub cruiser: u8,
    pub submarine: u8,
    pub destroyer: u8,
}

/// Ship counts as entered, where any type may be left unspecified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialShipCounts {
    pub carrier: Option<u8>,
    pub battleship: Option<u8>,
    pub cruiser: Option<u8>,
    pub submarine: Option<u8>,
    pub destroyer: Option<u8>,
}

impl ShipCounts {
    pub fn get(&self, ship: ShipType) -> u8 {
        match ship {
            ShipType::Carrier => self.carrier,
            ShipType::Battleship => self.battleship,
            ShipType::Cruiser => self.cruiser,
            ShipType::Submarine => self.submarine,
            ShipType::Destroyer => self.destroyer,
        }
    }

    pub fn set(&mut self, ship: ShipType, count: u8) {
        let slot = match ship {
            ShipType::Carrier => &mut self.carrier,
            ShipType::Battleship => &mut self.battleship,
            ShipType::Cruiser => &mut self.cruiser,
            ShipType::Submarine => &mut self.submarine,
            ShipType::Destroyer => &mut self.destroyer,
        };
        *slot = count;
    }

    /// Builder-style setter.
    pub fn with(mut self, ship: ShipType, count: u8) -> Self {
        self.set(ship, count);
        self
    }

    /// `(type, count)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (ShipType, u8)> + '_ {
        SHIP_TYPES.iter().map(move |&t| (t, self.get(t)))
    }

    /// Total number of ships a player places.
    pub fn total(&self) -> usize {
        self.iter().map(|(_, n)| n as usize).sum()
    }

    /// Total number of cells a player's fleet covers.
    pub fn total_area(&self) -> u32 {
        self.iter()
            .map(|(t, n)| n as u32 * t.length() as u32)
            .sum()
    }
}

impl From<PartialShipCounts> for ShipCounts {
    fn from(p: PartialShipCounts) -> Self {
        ShipCounts {
            carrier: p.carrier.unwrap_or(0),
            battleship: p.battleship.unwrap_or(0),
            cruiser: p.cruiser.unwrap_or(0),
            submarine: p.submarine.unwrap_or(0),
            destroyer: p.destroyer.unwrap_or(0),
        }
    }
}

/// Immutable configuration of one match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct MatchSettings {
    pub player1_name: String,
    pub player2_name: String,
    pub board_size: u8,
    pub ship_counts: ShipCounts,
}

impl MatchSettings {
    /// Assemble settings, normalising unspecified ship counts to zero. No
    /// validation happens here; see [`MatchSettings::validate`].
    pub fn new(
        player1_name: impl Into<String>,
        player2_name: impl Into<String>,
        board_size: u8,
        ship_counts: impl Into<ShipCounts>,
    ) -> Self {
        Self {
            player1_name: player1_name.into(),
            player2_name: player2_name.into(),
            board_size,
            ship_counts: ship_counts.into(),
        }
    }

    /// Assemble and validate in one step.
    pub fn try_new(
        player1_name: impl Into<String>,
        player2_name: impl Into<String>,
        board_size: u8,
        ship_counts: impl Into<ShipCounts>,
    ) -> Result<Self, SettingsError> {
        let settings = Self::new(player1_name, player2_name, board_size, ship_counts);
        settings.validate()?;
        Ok(settings)
    }

    /// Check names, board size and ship counts.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.player1_name.trim().is_empty() {
            return Err(SettingsError::NameRequired(Player::Player1));
        }
        if self.player2_name.trim().is_empty() {
            return Err(SettingsError::NameRequired(Player::Player2));
        }
        if !validate_board_size(self.board_size as i64) {
            return Err(SettingsError::InvalidBoardSize(self.board_size));
        }
        validate_ship_counts(&self.ship_counts, self.board_size)
    }

    /// Display name of `player`.
    pub fn player_name(&self, player: Player) -> &str {
        match player {
            Player::Player1 => &self.player1_name,
            Player::Player2 => &self.player2_name,
        }
    }
}

/// True iff `n` lies within `[BOARD_SIZE_MIN, BOARD_SIZE_MAX]`.
pub fn validate_board_size(n: i64) -> bool {
    (BOARD_SIZE_MIN as i64..=BOARD_SIZE_MAX as i64).contains(&n)
}

/// True iff `0 <= n <= ship.max_count()`.
pub fn validate_ship_count(ship: ShipType, n: i64) -> bool {
    (0..=ship.max_count() as i64).contains(&n)
}

/// Check the fleet as a whole against the board it will be placed on.
///
/// The board must keep at least half of its cells free: the fleet area times
/// `SHIP_AREA_MARGIN` may not exceed `board_size²`.
pub fn validate_ship_counts(counts: &ShipCounts, board_size: u8) -> Result<(), SettingsError> {
    if counts.total() == 0 {
        return Err(SettingsError::NoShipsConfigured);
    }
    for (ship, n) in counts.iter() {
        if !validate_ship_count(ship, n as i64) {
            return Err(SettingsError::ShipCountExceeded(ship));
        }
    }
    let cells = board_size as u32 * board_size as u32;
    let required = counts.total_area() * SHIP_AREA_MARGIN;
    if cells < required {
        return Err(SettingsError::BoardTooSmall { cells, required });
    }
    Ok(())
}
