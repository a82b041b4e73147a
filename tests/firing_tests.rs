use battleship_engine::{
    Coordinate, GuessResult, MatchConfig, MatchEngine, MatchError, MatchEvent, MatchSettings,
    MatchStage, Orientation, Player, RepeatFirePolicy, ShipCounts, ShipType, TransitionKind,
    TransitionTiming,
};

fn c(s: &str) -> Coordinate {
    s.parse().unwrap()
}

/// Board 5, one destroyer each: player1 at B3/C3, player2 at E4/E5.
fn playing_engine(policy: RepeatFirePolicy) -> MatchEngine {
    let mut engine = MatchEngine::new(MatchConfig {
        repeat_fire: policy,
        timing: TransitionTiming::IMMEDIATE,
    });
    let settings =
        MatchSettings::try_new("Ann", "Bo", 5, ShipCounts::default().with(ShipType::Destroyer, 1))
            .unwrap();
    engine.start(settings).unwrap();
    engine
        .place_ship(Some(c("C3")), ShipType::Destroyer, Orientation::BottomToTop)
        .unwrap();
    engine.apply_pending_transition().unwrap();
    engine
        .place_ship(Some(c("E5")), ShipType::Destroyer, Orientation::RightToLeft)
        .unwrap();
    assert_eq!(engine.apply_pending_transition(), Some(TransitionKind::BeginPlay));
    engine.drain_events();
    engine
}

#[test]
fn hits_keep_the_turn_and_sinking_the_fleet_wins() {
    let mut engine = playing_engine(RepeatFirePolicy::Allow);

    assert_eq!(engine.fire_at(c("E4")), Ok(GuessResult::Hit));
    assert_eq!(engine.turn(), Some(Player::Player1));
    assert!(engine.guess_available());
    assert_eq!(engine.pending_transition(), None);

    assert_eq!(engine.fire_at(c("E5")), Ok(GuessResult::Sink(ShipType::Destroyer)));
    assert_eq!(engine.stage(), MatchStage::GameOver);
    assert_eq!(engine.winner(), Some(Player::Player1));
    assert_eq!(engine.winner_name(), Some("Ann"));

    let events = engine.drain_events();
    assert!(events.contains(&MatchEvent::GameOver {
        winner: Player::Player1,
        winner_name: "Ann".to_string()
    }));

    // Terminal: nothing else is accepted.
    assert!(matches!(
        engine.fire_at(c("A1")),
        Err(MatchError::InvalidStage { stage: MatchStage::GameOver, .. })
    ));
    assert!(matches!(
        engine.place_ship(Some(c("A2")), ShipType::Destroyer, Orientation::RightToLeft),
        Err(MatchError::InvalidStage { .. })
    ));
}

#[test]
fn miss_consumes_the_shot_and_passes_the_turn() {
    let mut engine = playing_engine(RepeatFirePolicy::Allow);

    assert_eq!(engine.fire_at(c("A1")), Ok(GuessResult::Miss));
    assert_eq!(engine.turn(), Some(Player::Player1));
    assert!(!engine.guess_available());
    assert_eq!(engine.fire_at(c("A2")), Err(MatchError::TransitionPending));

    let pending = engine.pending_transition().unwrap();
    assert_eq!(pending.kind, TransitionKind::PassTurn(Player::Player2));
    engine.apply_transition(pending.id).unwrap();
    assert_eq!(engine.turn(), Some(Player::Player2));
    assert!(engine.guess_available());

    // Player2 shoots at player1's board.
    assert_eq!(engine.fire_at(c("B3")), Ok(GuessResult::Hit));
    assert_eq!(engine.player(Player::Player1).hit_cells, vec![c("B3")]);
    assert_eq!(engine.player(Player::Player2).hit_cells, vec![c("A1")]);
}

#[test]
fn applying_a_transition_twice_is_stale() {
    let mut engine = playing_engine(RepeatFirePolicy::Allow);
    engine.fire_at(c("A1")).unwrap();
    let id = engine.pending_transition().unwrap().id;
    engine.apply_transition(id).unwrap();
    let snapshot = engine.snapshot();
    assert_eq!(engine.apply_transition(id), Err(MatchError::StaleTransition));
    assert_eq!(engine.snapshot(), snapshot);
}

#[test]
fn repeat_fire_is_recorded_when_allowed() {
    let mut engine = playing_engine(RepeatFirePolicy::Allow);
    engine.fire_at(c("E4")).unwrap();
    assert_eq!(engine.fire_at(c("E4")), Ok(GuessResult::Hit));
    assert_eq!(engine.player(Player::Player2).hit_cells, vec![c("E4"), c("E4")]);
}

#[test]
fn repeat_fire_is_rejected_when_configured() {
    let mut engine = playing_engine(RepeatFirePolicy::Reject);
    engine.fire_at(c("E4")).unwrap();
    assert_eq!(engine.fire_at(c("E4")), Err(MatchError::AlreadyFired(c("E4"))));
    assert_eq!(engine.player(Player::Player2).hit_cells, vec![c("E4")]);
    assert!(engine.guess_available());
}

#[test]
fn shots_off_the_board_are_rejected() {
    let mut engine = playing_engine(RepeatFirePolicy::Allow);
    assert_eq!(engine.fire_at(c("F1")), Err(MatchError::OutOfBounds));
    assert!(engine.player(Player::Player2).hit_cells.is_empty());
    assert!(engine.guess_available());
}

#[test]
fn firing_during_placement_is_invalid() {
    let mut engine = MatchEngine::default();
    let settings =
        MatchSettings::try_new("Ann", "Bo", 5, ShipCounts::default().with(ShipType::Destroyer, 1))
            .unwrap();
    engine.start(settings).unwrap();
    assert!(matches!(
        engine.fire_at(c("A1")),
        Err(MatchError::InvalidStage { stage: MatchStage::PlacingShips, .. })
    ));
}

#[test]
fn reset_discards_everything_and_stales_transitions() {
    let mut engine = playing_engine(RepeatFirePolicy::Allow);
    engine.fire_at(c("A1")).unwrap();
    let id = engine.pending_transition().unwrap().id;

    engine.reset();
    assert_eq!(engine.stage(), MatchStage::Settings);
    assert_eq!(engine.turn(), None);
    assert!(engine.settings().is_none());
    assert!(engine.player(Player::Player1).ship_locations.is_empty());
    assert_eq!(engine.apply_transition(id), Err(MatchError::StaleTransition));
    assert_eq!(engine.stage(), MatchStage::Settings);
}

#[test]
fn pending_transition_carries_configured_delay() {
    let mut engine = MatchEngine::default();
    let settings =
        MatchSettings::try_new("Ann", "Bo", 5, ShipCounts::default().with(ShipType::Destroyer, 1))
            .unwrap();
    engine.start(settings).unwrap();
    engine
        .place_ship(Some(c("C3")), ShipType::Destroyer, Orientation::BottomToTop)
        .unwrap();
    let pending = engine.pending_transition().unwrap();
    assert_eq!(pending.delay, battleship_engine::SWITCH_SIDES_DELAY);
}
