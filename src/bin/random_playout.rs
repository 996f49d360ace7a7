//! Seeded random self-play.
//!
//! Plays uniformly random legal moves until each game ends and prints how it
//! ended. Every committed position is checked for the mover's king being left
//! in check.
//!
//! Usage:
//! `cargo run --release --bin random_playout -- --games 100 --seed 7`

use std::collections::BTreeMap;

use clap::Parser;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use plum_rules::game_state::chess_types::PROMOTION_KINDS;
use plum_rules::game_state::game_engine::GameEngine;
use plum_rules::move_generation::legal_move_checks::is_king_in_check;
use plum_rules::move_generation::legal_move_generator::legal_moves;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Number of games to play.
    #[clap(long, default_value = "20")]
    games: u32,
    /// RNG seed; the same seed replays the same games.
    #[clap(long, default_value = "1")]
    seed: u64,
    /// Stop a game that is still running after this many half-moves.
    #[clap(long, value_name = "PLIES", default_value = "600")]
    max_plies: u32,
    /// Log filter used when RUST_LOG is not set.
    #[clap(long, value_name = "FILTER", default_value = "info")]
    log_level: String,
}

fn play_one(rng: &mut StdRng, max_plies: u32) -> Result<GameEngine, String> {
    let mut engine = GameEngine::new();
    for _ in 0..max_plies {
        if engine.is_over() {
            break;
        }
        let moves = legal_moves(engine.state());
        let picked = moves
            .as_slice()
            .choose(rng)
            .ok_or("running game without legal moves")?;
        let mover = engine.side_to_move();
        if !engine.propose_move(picked.source, picked.target) {
            return Err(format!("generated move {}{} was rejected", picked.source, picked.target));
        }
        if engine.pending_promotion().is_some() {
            let kind = PROMOTION_KINDS.choose(rng).ok_or("no promotion kinds")?;
            engine.try_promote(*kind).map_err(|e| e.to_string())?;
        }
        if is_king_in_check(engine.board(), mover) {
            return Err(format!("{mover:?} left in check: {}", engine.to_fen()));
        }
    }
    Ok(engine)
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let mut rng = StdRng::seed_from_u64(cli.seed);
    let mut tally = BTreeMap::<String, u32>::new();

    for game in 1..=cli.games {
        match play_one(&mut rng, cli.max_plies) {
            Ok(engine) => {
                let label = engine
                    .reason_text()
                    .unwrap_or_else(|| "Unfinished.".to_owned());
                debug!(game, plies = engine.ledger().len(), fen = %engine.to_fen(), "game finished");
                println!("game {game}: {label} ({} ledger entries)", engine.ledger().len());
                *tally.entry(label).or_default() += 1;
            }
            Err(err) => {
                eprintln!("game {game}: rules violation: {err}");
                std::process::exit(1);
            }
        }
    }

    info!(games = cli.games, seed = cli.seed, "playout complete");
    println!("\n== summary ==");
    for (label, count) in tally {
        println!("{count:>5}  {label}");
    }
}
