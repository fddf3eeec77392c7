//! Pattern-based heuristic scoring of a single point.
//!
//! The score of a point for a player adds, per axis, a tier for the run the
//! player would extend by playing there and a smaller tier for the opponent
//! run it would cut. A small center bonus breaks ties toward the middle.
//!
//! The same score orders moves at tree expansion, drives the greedy half of
//! the playout policy, picks out offensive threats for the arbiter, and backs
//! the arbiter's last-resort fallback.

use crate::board::{Board, Color, Move};
use crate::constants::{
    AXES, CENTER_BONUS, SCORE_DENY_FOUR, SCORE_DENY_THREE, SCORE_DENY_TWO, SCORE_OWN_FOUR,
    SCORE_OWN_THREE, SCORE_OWN_TWO,
};

/// Tier for a run the player would build.
#[inline]
fn own_tier(run: usize) -> i32 {
    match run {
        0 | 1 => 0,
        2 => SCORE_OWN_TWO,
        3 => SCORE_OWN_THREE,
        _ => SCORE_OWN_FOUR,
    }
}

/// Tier for an opponent run taken away.
#[inline]
fn deny_tier(run: usize) -> i32 {
    match run {
        0 | 1 => 0,
        2 => SCORE_DENY_TWO,
        3 => SCORE_DENY_THREE,
        _ => SCORE_DENY_FOUR,
    }
}

/// Bonus decaying linearly with Manhattan distance from the center:
/// `CENTER_BONUS` at the center, 0 at the farthest corner.
fn center_bonus(board: &Board, row: usize, col: usize) -> i32 {
    let center = board.center();
    let dist = row.abs_diff(center.row) + col.abs_diff(center.col);
    let max_dist = 2 * center.row.max(board.size() - 1 - center.row);
    if max_dist == 0 {
        return CENTER_BONUS;
    }
    (CENTER_BONUS * (max_dist - dist.min(max_dist)) as i32) / max_dist as i32
}

/// Heuristic value of `player` playing at `(row, col)`.
pub fn score(board: &Board, row: usize, col: usize, player: Color) -> i32 {
    let opp = player.opponent();
    let mut total = 0;
    for &axis in &AXES {
        total += own_tier(board.axis_run(row, col, player, axis));
        total += deny_tier(board.axis_run(row, col, opp, axis));
    }
    total + center_bonus(board, row, col)
}

#[inline]
pub fn score_move(board: &Board, mv: Move, player: Color) -> i32 {
    score(board, mv.row, mv.col, player)
}

/// The highest-scoring move, first in order on ties.
pub fn best_scoring(board: &Board, moves: &[Move], player: Color) -> Option<Move> {
    let mut best: Option<(Move, i32)> = None;
    for &mv in moves {
        let s = score_move(board, mv, player);
        if best.is_none_or(|(_, b)| s > b) {
            best = Some((mv, s));
        }
    }
    best.map(|(mv, _)| mv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(black: &[(usize, usize)], white: &[(usize, usize)]) -> Board {
        let mut board = Board::new(15);
        for &mv in black {
            board.place(mv.into(), Color::Black).unwrap();
        }
        for &mv in white {
            board.place(mv.into(), Color::White).unwrap();
        }
        board
    }

    #[test]
    fn test_center_bonus_decays() {
        let board = Board::new(15);
        assert_eq!(score(&board, 7, 7, Color::Black), CENTER_BONUS);
        assert_eq!(score(&board, 0, 0, Color::Black), 0);
        assert!(score(&board, 7, 8, Color::Black) <= CENTER_BONUS);
        assert!(score(&board, 7, 8, Color::Black) >= score(&board, 3, 3, Color::Black));
    }

    #[test]
    fn test_center_bonus_below_smallest_tier() {
        let board = Board::new(15);
        for row in 0..15 {
            for col in 0..15 {
                assert!(score(&board, row, col, Color::White) < SCORE_DENY_TWO);
            }
        }
    }

    #[test]
    fn test_own_four_tier() {
        let board = board_with(&[(0, 0), (0, 1), (0, 2)], &[]);
        // Extending to four along the row
        let s = score(&board, 0, 3, Color::Black);
        assert!(s >= SCORE_OWN_FOUR);
        assert!(s < SCORE_OWN_FOUR + SCORE_OWN_THREE);
    }

    #[test]
    fn test_deny_tiers() {
        let board = board_with(&[(0, 0), (0, 1), (0, 2)], &[]);
        let s = score(&board, 0, 3, Color::White);
        assert!(s >= SCORE_DENY_FOUR);
        assert!(s < SCORE_OWN_FOUR);

        let board = board_with(&[], &[(10, 10)]);
        let s = score(&board, 10, 11, Color::Black);
        assert!(s >= SCORE_DENY_TWO && s < SCORE_OWN_TWO);
    }

    #[test]
    fn test_tiers_accumulate_across_axes() {
        // Point (5, 5) extends a row pair and a column pair
        let board = board_with(&[(5, 3), (5, 4), (3, 5), (4, 5)], &[]);
        let s = score(&board, 5, 5, Color::Black);
        assert!(s >= 2 * SCORE_OWN_THREE);
    }

    #[test]
    fn test_best_scoring_prefers_first_on_ties() {
        let board = Board::new(15);
        let moves = [Move::new(7, 6), Move::new(6, 7), Move::new(0, 0)];
        // (7,6) and (6,7) are equidistant from the center
        assert_eq!(
            best_scoring(&board, &moves, Color::Black),
            Some(Move::new(7, 6))
        );
        assert_eq!(best_scoring(&board, &[], Color::Black), None);
    }
}
