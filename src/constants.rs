//! Constants for board geometry, pattern scores, and search parameters.
//!
//! These are the compile-time defaults. Everything tunable at runtime is
//! carried by [`EngineConfig`](crate::config::EngineConfig), which starts
//! from the values below.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). Common sizes are 13 and 15.
pub const DEFAULT_BOARD_SIZE: usize = 15;

/// Number of stones in a row needed to win.
pub const WIN_LENGTH: usize = 5;

/// The four line axes as (row, col) steps.
/// Order: horizontal, vertical, diagonal, anti-diagonal
pub const AXES: [(isize, isize); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal (down-right)
    (1, -1), // Anti-diagonal (down-left)
];

// =============================================================================
// Candidate Generation
// =============================================================================

/// Chebyshev radius around existing stones considered for new moves.
pub const PRUNING_RADIUS: usize = 2;

/// Maximum number of candidates handed to the search.
pub const CANDIDATE_CAP: usize = 25;

// =============================================================================
// Heuristic Pattern Scores
// =============================================================================

/// Own run of four or more through the point.
pub const SCORE_OWN_FOUR: i32 = 10_000;

/// Opponent run of four or more denied by taking the point.
pub const SCORE_DENY_FOUR: i32 = 5_000;

/// Own run of three.
pub const SCORE_OWN_THREE: i32 = 100;

/// Opponent run of three denied.
pub const SCORE_DENY_THREE: i32 = 50;

/// Own run of two.
pub const SCORE_OWN_TWO: i32 = 10;

/// Opponent run of two denied.
pub const SCORE_DENY_TWO: i32 = 5;

/// Center-proximity bonus at the exact center. Stays below the smallest
/// pattern score so it only ever breaks ties.
pub const CENTER_BONUS: i32 = 4;

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Default number of iterations per search.
pub const N_ITERATIONS: usize = 1000;

/// UCB1 exploration constant.
pub const EXPLORATION_CONSTANT: f64 = 1.4;

/// Number of untried moves scored when expanding a node.
pub const EXPANSION_PREFIX: usize = 5;

/// Evaluator score above which a move counts as an offensive threat.
pub const THREAT_THRESHOLD: i32 = 1_000;

// =============================================================================
// Playout Policy
// =============================================================================

/// Maximum plies played in one simulation.
pub const PLAYOUT_HORIZON: usize = 16;

/// Probability of a uniformly random playout move.
pub const PROB_RANDOM_MOVE: f64 = 0.7;

/// Number of top-scoring candidates the greedy playout move is drawn from.
pub const PLAYOUT_TOP_K: usize = 3;

// =============================================================================
// Rewards
// =============================================================================

/// Reward for a simulated win of the player to move at a node.
pub const REWARD_WIN: f64 = 1.0;

/// Reward for a simulated draw.
pub const REWARD_DRAW: f64 = 0.5;

/// Reward for a simulated loss.
pub const REWARD_LOSS: f64 = 0.0;
