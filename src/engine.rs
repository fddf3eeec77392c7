//! The engine's public contract: `apply_move` and `compute_move`.
//!
//! `compute_move` layers the decision:
//! 1. Forced moves from the threat analyzer (win, block, critical block)
//! 2. Narrow the candidates to offensive threats if there are any
//! 3. MCTS over what remains
//! 4. Any legal cell, should everything above come back empty
//!
//! Nothing here mutates the caller's board. Applying the chosen move,
//! re-checking the win, and switching turns are up to the caller.

use std::fmt;

use fastrand::Rng;
use tracing::debug;

use crate::board::{Board, Color, Move};
use crate::candidates::candidates;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::eval::{best_scoring, score_move};
use crate::mcts::search;
use crate::position::GameState;
use crate::threat::{ThreatKind, analyze};

/// Why the engine picked its move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reason {
    Win,
    Block,
    CriticalBlock,
    Search,
    Fallback,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::Win => "win",
            Reason::Block => "block",
            Reason::CriticalBlock => "critical-block",
            Reason::Search => "search",
            Reason::Fallback => "fallback",
        }
    }
}

impl From<ThreatKind> for Reason {
    fn from(kind: ThreatKind) -> Self {
        match kind {
            ThreatKind::Win => Reason::Win,
            ThreatKind::Block => Reason::Block,
            ThreatKind::ForkBlock => Reason::CriticalBlock,
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chosen move and the reason for it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveChoice {
    pub mv: Move,
    pub reason: Reason,
}

/// Place `player`'s stone on a copy of `board`.
pub fn apply_move(
    board: &Board,
    row: usize,
    col: usize,
    player: Color,
) -> Result<Board, EngineError> {
    let mut next = board.clone();
    next.place(Move::new(row, col), player)?;
    Ok(next)
}

/// Check that a board fits the configuration it is searched with.
fn check_board(board: &Board, config: &EngineConfig) -> Result<(), EngineError> {
    config.validate()?;
    if board.size() != config.board_size {
        return Err(EngineError::DegenerateConfig(format!(
            "board is {0}x{0} but config expects {1}x{1}",
            board.size(),
            config.board_size
        )));
    }
    if board.win_length() != config.win_length {
        return Err(EngineError::DegenerateConfig(format!(
            "board wins at {} but config expects {}",
            board.win_length(),
            config.win_length
        )));
    }
    Ok(())
}

/// Choose a move for `player`, seeding the search from `config.seed`.
///
/// Returns `Ok(None)` when the board is full: no move exists and the game is
/// a draw.
pub fn compute_move(
    board: &Board,
    player: Color,
    config: &EngineConfig,
) -> Result<Option<MoveChoice>, EngineError> {
    let mut rng = Rng::with_seed(config.seed);
    compute_move_with_rng(board, player, config, &mut rng)
}

/// [`compute_move`] with an injected random source.
pub fn compute_move_with_rng(
    board: &Board,
    player: Color,
    config: &EngineConfig,
    rng: &mut Rng,
) -> Result<Option<MoveChoice>, EngineError> {
    check_board(board, config)?;
    if board.is_full() {
        debug!("board is full, no move to make");
        return Ok(None);
    }

    if let Some(threat) = analyze(board, player, config.pruning_radius) {
        let choice = MoveChoice {
            mv: threat.mv,
            reason: threat.kind.into(),
        };
        debug!(mv = %choice.mv, reason = %choice.reason, "forced move");
        return Ok(Some(choice));
    }

    let all = candidates(board, config.pruning_radius, config.candidate_cap);
    let threats: Vec<Move> = all
        .iter()
        .copied()
        .filter(|&mv| score_move(board, mv, player) > config.threat_threshold)
        .collect();
    let pool = if threats.is_empty() { &all } else { &threats };
    debug!(
        candidates = all.len(),
        threats = threats.len(),
        iterations = config.iterations,
        "searching"
    );

    let state = GameState::from_board(board.clone(), player);
    if let Some(mv) = search(&state, pool, config.iterations, config, rng) {
        let choice = MoveChoice {
            mv,
            reason: Reason::Search,
        };
        debug!(mv = %choice.mv, "search move");
        return Ok(Some(choice));
    }

    // Not reachable with a working generator; keep the game going anyway.
    let fallback = best_scoring(board, pool, player)
        .filter(|&mv| board.is_free(mv))
        .or_else(|| board.empty_cells().next());
    Ok(fallback.map(|mv| MoveChoice {
        mv,
        reason: Reason::Fallback,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EngineConfig {
        EngineConfig::for_testing()
    }

    #[test]
    fn test_apply_move() {
        let board = Board::new(15);
        let next = apply_move(&board, 7, 7, Color::Black).unwrap();
        assert_eq!(next.get(7, 7), Some(Color::Black));
        assert!(board.is_empty());

        assert!(matches!(
            apply_move(&next, 7, 7, Color::White),
            Err(EngineError::InvalidMove { .. })
        ));
        assert!(matches!(
            apply_move(&next, 15, 0, Color::White),
            Err(EngineError::InvalidMove { .. })
        ));
    }

    #[test]
    fn test_empty_board_plays_center() {
        let board = Board::new(15);
        let choice = compute_move(&board, Color::Black, &config()).unwrap().unwrap();
        assert_eq!(choice.mv, Move::new(7, 7));
        assert_eq!(choice.reason, Reason::Search);
    }

    #[test]
    fn test_full_board_returns_none() {
        let config = EngineConfig::for_testing()
            .with_board_size(2)
            .with_win_length(2);
        let mut board = Board::with_win_length(2, 2);
        board.place(Move::new(0, 0), Color::Black).unwrap();
        board.place(Move::new(0, 1), Color::White).unwrap();
        board.place(Move::new(1, 1), Color::Black).unwrap();
        board.place(Move::new(1, 0), Color::White).unwrap();
        assert_eq!(compute_move(&board, Color::Black, &config).unwrap(), None);
    }

    #[test]
    fn test_rejects_degenerate_config() {
        let board = Board::new(15);
        let config = EngineConfig::for_testing().with_iterations(0);
        assert!(matches!(
            compute_move(&board, Color::Black, &config),
            Err(EngineError::DegenerateConfig(_))
        ));
    }

    #[test]
    fn test_rejects_mismatched_board() {
        let board = Board::new(13);
        assert!(matches!(
            compute_move(&board, Color::Black, &config()),
            Err(EngineError::DegenerateConfig(_))
        ));
    }

    #[test]
    fn test_threat_filter_narrows_search() {
        // Black has an open three; making the four is the only move above the
        // threshold with default settings, and no tactical tier fires for it.
        let mut board = Board::new(15);
        for col in 5..8 {
            board.place(Move::new(7, col), Color::Black).unwrap();
        }
        board.place(Move::new(14, 0), Color::White).unwrap();
        board.place(Move::new(14, 14), Color::White).unwrap();
        let choice = compute_move(&board, Color::Black, &config()).unwrap().unwrap();
        assert_eq!(choice.reason, Reason::Search);
        assert!(choice.mv == Move::new(7, 4) || choice.mv == Move::new(7, 8));
    }

    #[test]
    fn test_reason_labels() {
        assert_eq!(Reason::Win.to_string(), "win");
        assert_eq!(Reason::Block.to_string(), "block");
        assert_eq!(Reason::CriticalBlock.to_string(), "critical-block");
        assert_eq!(Reason::Search.to_string(), "search");
        assert_eq!(Reason::from(ThreatKind::ForkBlock), Reason::CriticalBlock);
    }
}
