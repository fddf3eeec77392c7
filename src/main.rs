//! gomoku-mcts: a Gomoku MCTS engine.
//!
//! ## Usage
//!
//! - `gomoku-mcts` - Show a demo
//! - `gomoku-mcts protocol` - Speak the Gomocup protocol on stdin/stdout
//! - `gomoku-mcts demo` - Play one engine move on a small position
//! - `gomoku-mcts selfplay` - Engine vs engine until the game ends
//!
//! Logs go to stderr; `RUST_LOG` overrides `--log-level`.

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use gomoku_mcts::board::{Board, Color};
use gomoku_mcts::config::EngineConfig;
use gomoku_mcts::constants::{DEFAULT_BOARD_SIZE, N_ITERATIONS};
use gomoku_mcts::engine::{apply_move, compute_move};
use gomoku_mcts::error::EngineError;
use gomoku_mcts::position::{GameState, Status};
use gomoku_mcts::protocol::ProtocolEngine;

/// gomoku-mcts: a Gomoku MCTS engine
#[derive(Parser)]
#[command(name = "gomoku-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board side length
    #[arg(long, global = true, default_value_t = DEFAULT_BOARD_SIZE)]
    board_size: usize,

    /// MCTS iterations per move
    #[arg(long, global = true, default_value_t = N_ITERATIONS)]
    iterations: usize,

    /// Seed for the search's random source
    #[arg(long, global = true, default_value_t = 0)]
    seed: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Gomocup text protocol on stdin/stdout
    Protocol,
    /// Play one engine move on a small position
    Demo,
    /// Let the engine play both sides
    Selfplay,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = EngineConfig::default()
        .with_board_size(cli.board_size)
        .with_iterations(cli.iterations)
        .with_seed(cli.seed);
    config.validate().context("invalid engine settings")?;
    info!(
        board_size = config.board_size,
        iterations = config.iterations,
        seed = config.seed,
        "engine configured"
    );

    match cli.command {
        Some(Commands::Protocol) => {
            let mut engine = ProtocolEngine::with_config(config);
            engine.run(io::stdin().lock(), io::stdout())
        }
        Some(Commands::Demo) | None => run_demo(&config),
        Some(Commands::Selfplay) => run_selfplay(&config),
    }
}

fn run_demo(config: &EngineConfig) -> Result<()> {
    println!("gomoku-mcts: Gomoku MCTS Engine\n");

    // Black has three in a row; White to move
    let c = config.board_size / 2;
    let mut board = Board::new(config.board_size);
    for (row, col, color) in [
        (c, c - 1, Color::Black),
        (c - 1, c, Color::White),
        (c, c, Color::Black),
        (c + 1, c + 1, Color::White),
        (c, c + 1, Color::Black),
    ] {
        board = apply_move(&board, row, col, color)?;
    }
    println!("{board}");

    println!("Running {} MCTS iterations for white...", config.iterations);
    match compute_move(&board, Color::White, config)? {
        Some(choice) => println!("White plays {} ({})", choice.mv, choice.reason),
        None => println!("No move: {}", EngineError::NoCandidateMoves),
    }
    Ok(())
}

fn run_selfplay(config: &EngineConfig) -> Result<()> {
    let mut state = GameState::new(config.board_size, config.win_length);

    while !state.status().is_terminal() {
        let player = state.to_move();
        let Some(choice) = compute_move(state.board(), player, config)? else {
            break;
        };
        state
            .play(choice.mv)
            .with_context(|| format!("engine chose an illegal move {}", choice.mv))?;
        println!(
            "{:>3}. {player} {} ({})",
            state.move_count(),
            choice.mv,
            choice.reason
        );
    }

    println!("\n{}", state.board());
    match state.status() {
        Status::Won(color) => println!("{color} wins after {} moves", state.move_count()),
        _ => println!("Draw after {} moves", state.move_count()),
    }
    Ok(())
}
