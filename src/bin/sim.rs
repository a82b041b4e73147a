use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::bail;
use battleship_engine::scheduler::lock_engine;
use battleship_engine::{
    init_logging, Commander, FileStore, HuntTargetCommander, MatchConfig, MatchEngine,
    MatchSettings, MatchStage, MatchStorage, Player, RepeatFirePolicy, SharedEngine, ShipCounts,
    TransitionScheduler, TransitionTiming, DEFAULT_BOARD_SIZE,
};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

/// Play a full hot-seat match between two automated players.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    board_size: u8,
    #[arg(long, default_value = "Player 1")]
    player1: String,
    #[arg(long, default_value = "Player 2")]
    player2: String,
    #[arg(long, default_value_t = 1)]
    carrier: u8,
    #[arg(long, default_value_t = 1)]
    battleship: u8,
    #[arg(long, default_value_t = 1)]
    cruiser: u8,
    #[arg(long, default_value_t = 1)]
    submarine: u8,
    #[arg(long, default_value_t = 1)]
    destroyer: u8,
    /// Reject shots at cells already fired upon.
    #[arg(long)]
    reject_repeat: bool,
    /// Delay applied to every pending transition.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
    /// Persist settings and snapshots as JSON files in this directory.
    #[arg(long)]
    store_dir: Option<PathBuf>,
}

enum Step {
    Finished,
    Waiting,
    Acted,
}

fn seat(player: Player) -> usize {
    match player {
        Player::Player1 => 0,
        Player::Player2 => 1,
    }
}

/// Perform one action for whoever holds the turn.
fn step(
    engine: &mut MatchEngine,
    rng: &mut SmallRng,
    commanders: &mut [HuntTargetCommander; 2],
    shots: &mut [usize; 2],
) -> anyhow::Result<Step> {
    if engine.stage() == MatchStage::GameOver {
        return Ok(Step::Finished);
    }
    if engine.pending_transition().is_some() {
        return Ok(Step::Waiting);
    }
    let Some(turn) = engine.turn() else {
        bail!("no player holds the turn at stage {}", engine.stage());
    };
    let Some(board_size) = engine.settings().map(|s| s.board_size) else {
        bail!("match has no settings");
    };
    let commander = &mut commanders[seat(turn)];

    match engine.stage() {
        MatchStage::PlacingShips => {
            let remaining = engine.remaining_ship_counts().unwrap_or_default();
            let Some((ship, _)) = remaining.iter().find(|&(_, n)| n > 0) else {
                bail!("{} has nothing left to place", turn);
            };
            let Some((anchor, orientation)) =
                commander.choose_placement(rng, engine.player(turn), ship, board_size)
            else {
                bail!("no room left for a {}", ship);
            };
            engine.place_ship(Some(anchor), ship, orientation)?;
        }
        MatchStage::Playing => {
            let Some(target) = commander.select_target(rng, board_size) else {
                bail!("{} has no cells left to fire at", turn);
            };
            let result = engine.fire_at(target)?;
            commander.handle_guess_result(target, result);
            shots[seat(turn)] += 1;
        }
        stage => bail!("unexpected stage {}", stage),
    }
    Ok(Step::Acted)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    let counts = ShipCounts {
        carrier: cli.carrier,
        battleship: cli.battleship,
        cruiser: cli.cruiser,
        submarine: cli.submarine,
        destroyer: cli.destroyer,
    };
    let settings = MatchSettings::try_new(cli.player1, cli.player2, cli.board_size, counts)?;
    let delay = Duration::from_millis(cli.delay_ms);
    let config = MatchConfig {
        repeat_fire: if cli.reject_repeat {
            RepeatFirePolicy::Reject
        } else {
            RepeatFirePolicy::Allow
        },
        timing: TransitionTiming {
            switch_sides: delay,
            pass_turn: delay,
        },
    };

    let mut storage = match cli.store_dir {
        Some(dir) => Some(MatchStorage::new(FileStore::open(dir)?)),
        None => None,
    };
    if let Some(storage) = storage.as_mut() {
        storage.save_settings(&settings)?;
    }

    let engine: SharedEngine = Arc::new(Mutex::new(MatchEngine::new(config)));
    let mut scheduler = TransitionScheduler::new(engine.clone());
    lock_engine(&engine).start(settings)?;

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut commanders = [HuntTargetCommander::new(), HuntTargetCommander::new()];
    let mut shots = [0usize; 2];

    loop {
        let (events, snapshot, outcome) = {
            let mut guard = lock_engine(&engine);
            let outcome = step(&mut guard, &mut rng, &mut commanders, &mut shots)?;
            (guard.drain_events(), guard.snapshot(), outcome)
        };
        scheduler.schedule_requested(&events);
        if let Some(storage) = storage.as_mut() {
            storage.save_snapshot(&snapshot)?;
        }
        match outcome {
            Step::Finished => break,
            Step::Waiting => scheduler.settle().await?,
            Step::Acted => {}
        }
    }

    let guard = lock_engine(&engine);
    let result = json!({
        "seed": seed,
        "stage": guard.stage().to_string(),
        "winner": guard.winner(),
        "winner_name": guard.winner_name(),
        "shots": { "player1": shots[0], "player2": shots[1] },
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
