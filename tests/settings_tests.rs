use battleship_engine::{
    validate_board_size, validate_ship_count, validate_ship_counts, MatchSettings,
    PartialShipCounts, Player, SettingsError, ShipCounts, ShipType, DEFAULT_BOARD_SIZE,
};

#[test]
fn single_carrier_fits_smallest_board() {
    let counts = ShipCounts::default().with(ShipType::Carrier, 1);
    assert_eq!(validate_ship_counts(&counts, 5), Ok(()));
}

#[test]
fn carrier_and_two_battleships_overflow_smallest_board() {
    let counts = ShipCounts::default()
        .with(ShipType::Carrier, 1)
        .with(ShipType::Battleship, 2);
    assert_eq!(
        validate_ship_counts(&counts, 5),
        Err(SettingsError::BoardTooSmall {
            cells: 25,
            required: 26
        })
    );
    assert_eq!(validate_ship_counts(&counts, 6), Ok(()));
}

#[test]
fn empty_fleet_is_rejected() {
    assert_eq!(
        validate_ship_counts(&ShipCounts::default(), 10),
        Err(SettingsError::NoShipsConfigured)
    );
}

#[test]
fn per_type_cap_is_checked_before_area() {
    let counts = ShipCounts::default().with(ShipType::Carrier, 2);
    assert_eq!(
        validate_ship_counts(&counts, 5),
        Err(SettingsError::ShipCountExceeded(ShipType::Carrier))
    );
}

#[test]
fn settings_validate_names_and_board_size() {
    let counts = ShipCounts::default().with(ShipType::Destroyer, 1);
    assert_eq!(
        MatchSettings::try_new("  ", "Bo", 5, counts),
        Err(SettingsError::NameRequired(Player::Player1))
    );
    assert_eq!(
        MatchSettings::try_new("Ann", "", 5, counts),
        Err(SettingsError::NameRequired(Player::Player2))
    );
    assert_eq!(
        MatchSettings::try_new("Ann", "Bo", 11, counts),
        Err(SettingsError::InvalidBoardSize(11))
    );
    let ok = MatchSettings::try_new("Ann", "Bo", DEFAULT_BOARD_SIZE, counts).unwrap();
    assert_eq!(ok.player_name(Player::Player2), "Bo");
    assert_eq!(DEFAULT_BOARD_SIZE, 7);
}

#[test]
fn partial_counts_are_normalised() {
    let partial = PartialShipCounts {
        submarine: Some(4),
        destroyer: None,
        ..Default::default()
    };
    let s = MatchSettings::try_new("Ann", "Bo", 10, partial).unwrap();
    assert_eq!(s.ship_counts, ShipCounts::default().with(ShipType::Submarine, 4));
}

#[test]
fn scalar_validators() {
    assert!(validate_board_size(7));
    assert!(!validate_board_size(0));
    assert!(validate_ship_count(ShipType::Submarine, 4));
    assert!(!validate_ship_count(ShipType::Submarine, 5));
}

#[test]
fn errors_render_readable_messages() {
    assert_eq!(
        SettingsError::NoShipsConfigured.to_string(),
        "At least one ship required"
    );
    assert_eq!(
        SettingsError::ShipCountExceeded(ShipType::Battleship).to_string(),
        "Too many Battleship ships. Maximum value is 2"
    );
}

#[test]
fn missing_name_names_the_seat() {
    let err = MatchSettings::try_new("Ann", "  ", 7, ShipCounts::default().with(ShipType::Cruiser, 1))
        .unwrap_err();
    assert_eq!(err, SettingsError::NameRequired(Player::Player2));
    assert_eq!(err.to_string(), "Player2 name is required");
    assert_eq!(Player::Player1.display_label(), "Player1");
}
