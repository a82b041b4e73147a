use core::fmt;

/// One of the two seats in a match. Also the turn token: only the player
/// holding the turn may place or fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Player {
    Player1,
    Player2,
}

impl Player {
    /// The other seat.
    pub fn opponent(self) -> Player {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }

    /// Capitalised seat label used in headers, e.g. `Player1`.
    pub fn display_label(self) -> &'static str {
        match self {
            Player::Player1 => "Player1",
            Player::Player2 => "Player2",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}
