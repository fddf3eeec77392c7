//! gomoku-mcts: a Gomoku (five-in-a-row) engine built on Monte Carlo Tree Search.
//!
//! Moves are chosen in layers: forced tactical moves first (win, block,
//! critical block), then MCTS with heuristic-guided expansion and playouts
//! over a pruned candidate set.
//!
//! ## Modules
//!
//! - [`constants`] - Board defaults, heuristic weights, and search parameters
//! - [`config`] - Runtime engine configuration
//! - [`error`] - Engine error kinds
//! - [`board`] - Board grid and win detection
//! - [`position`] - Game state: board, side to move, and status
//! - [`candidates`] - Candidate move generation
//! - [`eval`] - Heuristic move scoring
//! - [`threat`] - Forced-move analysis
//! - [`mcts`] - Monte Carlo Tree Search
//! - [`playout`] - Simulated continuations for leaf evaluation
//! - [`engine`] - `apply_move` / `compute_move`
//! - [`protocol`] - Gomocup text protocol adapter
//!
//! ## Example
//!
//! ```
//! use gomoku_mcts::board::{Board, Color};
//! use gomoku_mcts::config::EngineConfig;
//! use gomoku_mcts::engine::{apply_move, compute_move};
//!
//! let config = EngineConfig::default().with_iterations(100);
//!
//! // Black opens in the center
//! let board = apply_move(&Board::new(15), 7, 7, Color::Black)?;
//!
//! // Ask the engine for White's reply
//! if let Some(choice) = compute_move(&board, Color::White, &config)? {
//!     println!("White plays {} ({})", choice.mv, choice.reason);
//! }
//! # Ok::<(), gomoku_mcts::error::EngineError>(())
//! ```

pub mod board;
pub mod candidates;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod eval;
pub mod mcts;
pub mod playout;
pub mod position;
pub mod protocol;
pub mod threat;
