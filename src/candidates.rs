//! Candidate move generation with adjacency pruning.
//!
//! Only empty cells near existing stones are worth considering. Both
//! generators return moves in row-major order; the capped variant truncates
//! that order without reshuffling it.

use crate::board::{Board, Move};

/// Empty cells within Chebyshev `radius` of any stone, row-major.
///
/// - Empty board: the center cell only.
/// - Full board: nothing.
/// - No empty cell near any stone: every empty cell. This is part of the
///   contract, not a corner case; the result is only ever empty when the
///   board is full.
pub fn neighborhood(board: &Board, radius: usize) -> Vec<Move> {
    if board.is_empty() {
        return vec![board.center()];
    }
    if board.is_full() {
        return Vec::new();
    }

    let size = board.size();
    let mut near = vec![false; size * size];
    for row in 0..size {
        for col in 0..size {
            if board.get(row, col).is_none() {
                continue;
            }
            let r0 = row.saturating_sub(radius);
            let r1 = row.saturating_add(radius).min(size - 1);
            let c0 = col.saturating_sub(radius);
            let c1 = col.saturating_add(radius).min(size - 1);
            for r in r0..=r1 {
                for c in c0..=c1 {
                    near[r * size + c] = true;
                }
            }
        }
    }

    let moves: Vec<Move> = board
        .empty_cells()
        .filter(|mv| near[mv.row * size + mv.col])
        .collect();

    if moves.is_empty() {
        return board.empty_cells().collect();
    }
    moves
}

/// [`neighborhood`] truncated to the first `cap` moves in row-major order.
pub fn candidates(board: &Board, radius: usize, cap: usize) -> Vec<Move> {
    let mut moves = neighborhood(board, radius);
    moves.truncate(cap);
    moves
}
