//! Monte Carlo playouts (short simulated continuations).
//!
//! A playout plays at most `playout_horizon` plies from a position with a
//! cheap mixed policy:
//! - Take an immediate win for the side to move if one exists
//! - Otherwise, with probability `playout_random`, a uniformly random candidate
//! - Otherwise a random pick among the `playout_top_k` best-scoring candidates
//!
//! Randomness comes from the caller's seeded `fastrand::Rng`, never a global
//! generator, so a fixed seed replays the same games.

use fastrand::Rng;

use crate::board::{Move, has_five};
use crate::candidates::candidates;
use crate::config::EngineConfig;
use crate::eval::score_move;
use crate::position::{GameState, Status};

/// Play out a position and return how it ended.
///
/// Returns `Won(color)` if someone completes a line within the horizon and
/// `Draw` otherwise (no candidates left, or the horizon ran out).
pub fn mcplayout(state: &mut GameState, config: &EngineConfig, rng: &mut Rng) -> Status {
    if state.status().is_terminal() {
        return state.status();
    }

    for _ in 0..config.playout_horizon {
        let Some(mv) = choose_move(state, config, rng) else {
            return Status::Draw;
        };
        match state.play(mv) {
            Ok(Status::Ongoing) => {}
            Ok(status) => return status,
            Err(_) => return Status::Draw,
        }
    }

    Status::Draw
}

/// Pick the next playout move for the side to move.
fn choose_move(state: &GameState, config: &EngineConfig, rng: &mut Rng) -> Option<Move> {
    let board = state.board();
    let player = state.to_move();
    let moves = candidates(board, config.pruning_radius, config.candidate_cap);
    if moves.is_empty() {
        return None;
    }

    // Never miss a win on the spot
    if let Some(&mv) = moves
        .iter()
        .find(|mv| has_five(board, mv.row, mv.col, player))
    {
        return Some(mv);
    }

    if rng.f64() < config.playout_random {
        return Some(moves[rng.usize(..moves.len())]);
    }

    // Stable sort keeps row-major order among equal scores
    let mut scored: Vec<(Move, i32)> = moves
        .iter()
        .map(|&mv| (mv, score_move(board, mv, player)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    let k = config.playout_top_k.min(scored.len());
    Some(scored[rng.usize(..k)].0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    fn config() -> EngineConfig {
        EngineConfig::for_testing()
    }

    #[test]
    fn test_terminal_state_returns_immediately() {
        let mut state = GameState::new(15, 5);
        for i in 0..4 {
            state.play(Move::new(0, i)).unwrap();
            state.play(Move::new(1, i)).unwrap();
        }
        state.play(Move::new(0, 4)).unwrap();
        let mut rng = Rng::with_seed(1);
        let before = state.move_count();
        assert_eq!(
            mcplayout(&mut state, &config(), &mut rng),
            Status::Won(Color::Black)
        );
        assert_eq!(state.move_count(), before);
    }

    #[test]
    fn test_takes_immediate_win() {
        // Black to move with four in a row; white stones sit below so the
        // capped candidate list still reaches the winning cell
        let mut state = GameState::new(15, 5);
        for i in 3..7 {
            state.play(Move::new(7, i)).unwrap();
            state.play(Move::new(13, 2 * i - 6)).unwrap();
        }
        assert_eq!(state.to_move(), Color::Black);
        for seed in 0..10 {
            let mut copy = state.clone();
            let mut rng = Rng::with_seed(seed);
            assert_eq!(
                mcplayout(&mut copy, &config(), &mut rng),
                Status::Won(Color::Black)
            );
            assert_eq!(copy.move_count(), state.move_count() + 1);
        }
    }

    #[test]
    fn test_horizon_bounds_length() {
        let mut state = GameState::new(15, 5);
        state.play(Move::new(7, 7)).unwrap();
        let config = EngineConfig::for_testing().with_playout_horizon(3);
        let mut rng = Rng::with_seed(42);
        let status = mcplayout(&mut state, &config, &mut rng);
        assert!(state.move_count() <= 4);
        assert_ne!(status, Status::Ongoing);
    }

    #[test]
    fn test_zero_horizon_is_draw() {
        let mut state = GameState::new(15, 5);
        let config = EngineConfig::for_testing().with_playout_horizon(0);
        let mut rng = Rng::with_seed(3);
        assert_eq!(mcplayout(&mut state, &config, &mut rng), Status::Draw);
        assert_eq!(state.move_count(), 0);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut start = GameState::new(15, 5);
        start.play(Move::new(7, 7)).unwrap();
        start.play(Move::new(7, 8)).unwrap();

        let mut a = start.clone();
        let mut b = start.clone();
        let sa = mcplayout(&mut a, &config(), &mut Rng::with_seed(99));
        let sb = mcplayout(&mut b, &config(), &mut Rng::with_seed(99));
        assert_eq!(sa, sb);
        assert_eq!(a.history(), b.history());
    }

    #[test]
    fn test_moves_stay_near_stones() {
        let mut state = GameState::new(15, 5);
        state.play(Move::new(7, 7)).unwrap();
        let config = EngineConfig::for_testing()
            .with_playout_horizon(1)
            .with_pruning_radius(1);
        let mut rng = Rng::with_seed(5);
        mcplayout(&mut state, &config, &mut rng);
        let mv = state.last_move().unwrap();
        assert_eq!(mv.distance(Move::new(7, 7)), 1);
    }
}
