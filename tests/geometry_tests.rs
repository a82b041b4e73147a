use battleship_engine::{
    coordinate_to_cells, is_fleet_sunk, ship_orientation_of, Coordinate, GuessResult,
    Orientation, PlayerState, ShipPlacement, ShipType,
};

fn c(s: &str) -> Coordinate {
    s.parse().unwrap()
}

#[test]
fn carrier_at_bottom_right_corner() {
    let up = coordinate_to_cells(c("J10"), ShipType::Carrier, Orientation::BottomToTop, 10).unwrap();
    assert_eq!(up, vec![c("F10"), c("G10"), c("H10"), c("I10"), c("J10")]);

    let left = coordinate_to_cells(c("J10"), ShipType::Carrier, Orientation::RightToLeft, 10).unwrap();
    assert_eq!(left, vec![c("J6"), c("J7"), c("J8"), c("J9"), c("J10")]);
}

#[test]
fn orientation_is_inferred_from_cells() {
    let vertical = ShipPlacement::new(ShipType::Destroyer, vec![c("B3"), c("C3")]);
    assert_eq!(ship_orientation_of(&vertical), Orientation::BottomToTop);

    let horizontal = ShipPlacement::new(ShipType::Cruiser, vec![c("E3"), c("E4"), c("E5")]);
    assert_eq!(ship_orientation_of(&horizontal), Orientation::RightToLeft);
}

#[test]
fn anchor_is_the_bottom_or_right_cell() {
    let cells = coordinate_to_cells(c("D4"), ShipType::Submarine, Orientation::BottomToTop, 7).unwrap();
    let ship = ShipPlacement::new(ShipType::Submarine, cells);
    assert_eq!(ship.anchor(), Some(c("D4")));
    assert!(ship.is_anchor_cell(c("D4")));
    assert!(!ship.is_anchor_cell(c("B4")));
}

#[test]
fn fleet_sinks_only_when_every_cell_is_hit() {
    let mut state = PlayerState::new();
    state
        .add_placement(ShipPlacement::new(ShipType::Destroyer, vec![c("A1"), c("A2")]))
        .unwrap();
    state
        .add_placement(ShipPlacement::new(ShipType::Destroyer, vec![c("C1"), c("D1")]))
        .unwrap();

    assert_eq!(state.receive_fire(c("A1")), GuessResult::Hit);
    assert_eq!(state.receive_fire(c("A2")), GuessResult::Sink(ShipType::Destroyer));
    assert!(!is_fleet_sunk(&state));
    assert_eq!(state.receive_fire(c("B1")), GuessResult::Miss);
    assert_eq!(state.receive_fire(c("C1")), GuessResult::Hit);
    assert_eq!(state.receive_fire(c("D1")), GuessResult::Sink(ShipType::Destroyer));
    assert!(is_fleet_sunk(&state));
    assert!(state.is_fleet_sunk());
}

#[test]
fn empty_fleet_counts_as_sunk() {
    assert!(is_fleet_sunk(&PlayerState::new()));
}

#[test]
fn repeated_fire_sinks_a_ship_once() {
    let mut state = PlayerState::new();
    state
        .add_placement(ShipPlacement::new(ShipType::Destroyer, vec![c("B2"), c("B3")]))
        .unwrap();
    assert_eq!(state.receive_fire(c("B2")), GuessResult::Hit);
    assert_eq!(state.receive_fire(c("B2")), GuessResult::Hit);
    assert!(!is_fleet_sunk(&state));
    assert_eq!(state.receive_fire(c("B3")), GuessResult::Sink(ShipType::Destroyer));
    assert_eq!(state.receive_fire(c("B3")), GuessResult::Hit);
    let hits = state.hit_mask().unwrap();
    assert!(state.ship_locations[0].is_sunk(&hits));
    assert!(is_fleet_sunk(&state));
}
