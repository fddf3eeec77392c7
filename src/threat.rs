//! Tactical layer: forced moves found before any search runs.
//!
//! Three tiers, checked strictly in order and never combined:
//!
//! 1. [`winning_move`] - a cell that completes a line for the player.
//! 2. [`blocking_move`] - a cell that would complete a line for the opponent.
//! 3. [`fork_block`] - a cell where an opponent stone would leave two or more
//!    distinct winning cells, which no single reply could cover.
//!
//! Every tier returns the first qualifying cell in row-major order. Tiers 1
//! and 2 scan the uncapped neighborhood (a completing cell always touches a
//! stone, so radius 1 or more sees all of them); tier 3 scans every empty
//! cell. Hypothetical stones go on a private scratch board and are always
//! removed again before the next probe.

use std::fmt;

use crate::board::{Board, Color, Move, has_five};
use crate::candidates::neighborhood;

/// Which tactical tier produced a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ThreatKind {
    Win,
    Block,
    ForkBlock,
}

impl fmt::Display for ThreatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreatKind::Win => write!(f, "win"),
            ThreatKind::Block => write!(f, "block"),
            ThreatKind::ForkBlock => write!(f, "critical-block"),
        }
    }
}

/// A forced move and the tier that found it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Threat {
    pub mv: Move,
    pub kind: ThreatKind,
}

/// First cell in `moves` where `player` would complete a line.
fn first_completion(board: &Board, moves: &[Move], player: Color) -> Option<Move> {
    moves
        .iter()
        .copied()
        .find(|mv| board.is_free(*mv) && has_five(board, mv.row, mv.col, player))
}

/// A move that wins on the spot for `player`.
pub fn winning_move(board: &Board, player: Color, radius: usize) -> Option<Move> {
    first_completion(board, &neighborhood(board, radius), player)
}

/// A move the opponent would win with, which `player` must take first.
pub fn blocking_move(board: &Board, player: Color, radius: usize) -> Option<Move> {
    first_completion(board, &neighborhood(board, radius), player.opponent())
}

/// Count empty cells where `player` would complete a line, stopping at `limit`.
pub fn count_winning_cells(board: &Board, player: Color, limit: usize) -> usize {
    let mut count = 0;
    for mv in board.empty_cells() {
        if has_five(board, mv.row, mv.col, player) {
            count += 1;
            if count >= limit {
                break;
            }
        }
    }
    count
}

/// A cell that would hand the opponent two or more winning continuations.
///
/// Exhaustive over the empty cells: each is tried as an opponent stone on a
/// scratch copy, then the opponent's winning cells on the rest of the board
/// are counted up to two.
pub fn fork_block(board: &Board, player: Color) -> Option<Move> {
    let opp = player.opponent();
    let mut scratch = board.clone();
    let empties: Vec<Move> = board.empty_cells().collect();

    for mv in empties {
        if scratch.place(mv, opp).is_err() {
            continue;
        }
        let forks = count_winning_cells(&scratch, opp, 2);
        scratch.remove(mv);
        if forks >= 2 {
            return Some(mv);
        }
    }
    None
}

/// Run the tiers in order and report the first forced move.
pub fn analyze(board: &Board, player: Color, radius: usize) -> Option<Threat> {
    if let Some(mv) = winning_move(board, player, radius) {
        return Some(Threat {
            mv,
            kind: ThreatKind::Win,
        });
    }
    if let Some(mv) = blocking_move(board, player, radius) {
        return Some(Threat {
            mv,
            kind: ThreatKind::Block,
        });
    }
    fork_block(board, player).map(|mv| Threat {
        mv,
        kind: ThreatKind::ForkBlock,
    })
}
