//! Interactive console for playing a game against yourself.
//!
//! Usage:
//! `cargo run -- [--fen "<FEN>"] [--log-level debug]`

use clap::Parser;
use tracing_subscriber::EnvFilter;

use plum_rules::console::console_top::run_stdio_loop;
use plum_rules::game_state::chess_rules::EngineConfig;
use plum_rules::game_state::game_engine::GameEngine;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Start from this position instead of the standard setup.
    #[clap(long, value_name = "FEN")]
    fen: Option<String>,
    /// Quiet half-moves that end the game automatically.
    #[clap(long, value_name = "PLIES", default_value = "150")]
    automatic_halfmove_limit: u16,
    /// Log filter used when RUST_LOG is not set.
    #[clap(long, value_name = "FILTER", default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let config = EngineConfig::default().with_automatic_halfmove_limit(cli.automatic_halfmove_limit);
    let engine = match cli.fen.as_deref() {
        Some(fen) => match GameEngine::from_fen_with_config(fen, config) {
            Ok(engine) => engine,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(2);
            }
        },
        None => GameEngine::with_config(config),
    };

    if let Err(err) = run_stdio_loop(engine) {
        eprintln!("console error: {err}");
        std::process::exit(1);
    }
}
