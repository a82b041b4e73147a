use core::time::Duration;

use crate::ship::ShipType;

/// Smallest legal board edge.
pub const BOARD_SIZE_MIN: u8 = 5;
/// Largest legal board edge.
pub const BOARD_SIZE_MAX: u8 = 10;
/// Initial board size offered by a settings screen.
pub const DEFAULT_BOARD_SIZE: u8 = (BOARD_SIZE_MIN + BOARD_SIZE_MAX) / 2;

pub const NUM_SHIP_TYPES: usize = 5;
pub const SHIP_TYPES: [ShipType; NUM_SHIP_TYPES] = [
    ShipType::Carrier,
    ShipType::Battleship,
    ShipType::Cruiser,
    ShipType::Submarine,
    ShipType::Destroyer,
];

/// Board area must be at least this many times the total ship area.
pub const SHIP_AREA_MARGIN: u32 = 2;

/// Storage key of the serialized settings blob.
pub const SETTINGS_KEY: &str = "battleship-settings";
/// Storage key of the serialized match snapshot blob.
pub const SNAPSHOT_KEY: &str = "battleship-match";

/// Suggested delay before handing the board to the other player between
/// placement phases.
pub const SWITCH_SIDES_DELAY: Duration = Duration::from_millis(5000);
/// Suggested delay before passing the turn after a miss.
pub const PASS_TURN_DELAY: Duration = Duration::from_millis(2000);

/// Environment variable consulted by `init_logging`.
pub const LOG_ENV_VAR: &str = "BATTLESHIP_LOG";
