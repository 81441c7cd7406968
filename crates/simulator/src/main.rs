//! fin-chess CLI
//!
//! Map a portfolio onto the board, or play simulated games against the
//! market opponent.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chess_core::Color;
use clap::{Parser, Subcommand};
use session::{map_portfolio, unmapped_symbols, Difficulty, SessionConfig};
use simulator::{MatchConfig, MatchRunner, SimulationResults};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Financial Chess: play your portfolio against the market.
#[derive(Parser, Debug)]
#[command(name = "fin-chess")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the piece role of every holding
    Map {
        /// Session config (TOML)
        config: PathBuf,
    },

    /// Play simulated games against the market opponent
    Play {
        /// Session config (TOML)
        config: PathBuf,

        /// Number of games
        #[arg(long, short = 'g', default_value_t = 10)]
        games: u32,

        /// Base seed (overrides the config)
        #[arg(long, short = 's')]
        seed: Option<u64>,

        /// Opponent tier: easy, medium or hard (overrides the config)
        #[arg(long, short = 'd')]
        difficulty: Option<String>,

        /// Activate the next configured event every N plies
        #[arg(long, default_value_t = 10)]
        event_every: u32,

        /// Write results as JSON
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Map { config } => run_map(config),
        Commands::Play {
            config,
            games,
            seed,
            difficulty,
            event_every,
            output,
        } => run_play(config, games, seed, difficulty, event_every, output),
    }
}

fn load(path: &Path) -> Result<SessionConfig> {
    SessionConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn run_map(path: PathBuf) -> Result<()> {
    let config = load(&path)?;
    let mappings = map_portfolio(&config.holdings);
    let session = config
        .create_session()
        .context("Failed to set up the board")?;

    println!("=== Portfolio on {:?} ===", config.human_side);
    println!();
    println!("{:<8} {:<8} {:<6} Reasoning", "Symbol", "Piece", "Square");
    println!("{}", "-".repeat(72));
    for mapping in &mappings {
        let square = session
            .assignment()
            .square_of(&mapping.symbol)
            .map(|sq| sq.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:<8} {:<6} {}",
            mapping.symbol, mapping.piece, square, mapping.reasoning
        );
    }

    let unmapped = unmapped_symbols(&config.holdings, &mappings);
    if !unmapped.is_empty() {
        println!();
        println!("Not on the board: {}", unmapped.join(", "));
    }
    Ok(())
}

fn run_play(
    path: PathBuf,
    games: u32,
    seed: Option<u64>,
    difficulty: Option<String>,
    event_every: u32,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut config = load(&path)?;
    if let Some(name) = difficulty {
        config.difficulty = Difficulty::parse_or_default(&name);
    }

    let match_config = MatchConfig {
        num_games: games,
        max_plies: config.max_plies,
        event_every,
        seed: seed.or(config.seed),
        verbose: true,
    };

    println!(
        "=== {} games vs the {} market opponent (player on {}) ===",
        games,
        config.difficulty,
        match config.human_side {
            Color::White => "White",
            Color::Black => "Black",
        }
    );
    println!();

    let runner = MatchRunner::new(match_config.clone(), config.clone());
    let (result, records) = runner.run_match().context("Simulation failed")?;

    println!();
    println!("=== Final Result ===");
    println!(
        "Player: {} wins, {} losses, {} draws",
        result.wins, result.losses, result.draws
    );
    println!("Score: {:.1}%", result.score() * 100.0);

    if let Some(output) = output {
        let results = SimulationResults::new(
            config.difficulty,
            config.human_side,
            match_config,
            map_portfolio(&config.holdings),
            result,
            records,
        );
        results.save(&output)?;
        info!(path = %output.display(), "results saved");
    }
    Ok(())
}
