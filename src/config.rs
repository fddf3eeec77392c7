//! Engine configuration parameters.

use crate::constants::{
    CANDIDATE_CAP, DEFAULT_BOARD_SIZE, EXPANSION_PREFIX, EXPLORATION_CONSTANT, N_ITERATIONS,
    PLAYOUT_HORIZON, PLAYOUT_TOP_K, PROB_RANDOM_MOVE, PRUNING_RADIUS, THREAT_THRESHOLD,
    WIN_LENGTH,
};
use crate::error::EngineError;

/// Configuration for one `compute_move` call.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Number of MCTS iterations per search.
    pub iterations: usize,

    /// Stones in a row needed to win.
    pub win_length: usize,

    /// Board side length.
    pub board_size: usize,

    /// Chebyshev radius around stones used for candidate generation.
    pub pruning_radius: usize,

    /// UCB1 exploration constant `C`.
    pub exploration_constant: f64,

    /// Maximum plies per playout.
    pub playout_horizon: usize,

    /// Maximum number of candidates considered by the search.
    pub candidate_cap: usize,

    /// Evaluator score above which a candidate is an offensive threat.
    pub threat_threshold: i32,

    /// Number of untried moves scored at expansion.
    pub expansion_prefix: usize,

    /// Probability that a playout move is drawn uniformly at random.
    pub playout_random: f64,

    /// The greedy playout move is drawn from this many top-scoring candidates.
    pub playout_top_k: usize,

    /// Seed for the search's random source.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            iterations: N_ITERATIONS,
            win_length: WIN_LENGTH,
            board_size: DEFAULT_BOARD_SIZE,
            pruning_radius: PRUNING_RADIUS,
            exploration_constant: EXPLORATION_CONSTANT,
            playout_horizon: PLAYOUT_HORIZON,
            candidate_cap: CANDIDATE_CAP,
            threat_threshold: THREAT_THRESHOLD,
            expansion_prefix: EXPANSION_PREFIX,
            playout_random: PROB_RANDOM_MOVE,
            playout_top_k: PLAYOUT_TOP_K,
            seed: 0,
        }
    }
}

impl EngineConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 50,
            playout_horizon: 8,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set board size.
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    /// Builder pattern: set win length.
    pub fn with_win_length(mut self, len: usize) -> Self {
        self.win_length = len;
        self
    }

    /// Builder pattern: set pruning radius.
    pub fn with_pruning_radius(mut self, radius: usize) -> Self {
        self.pruning_radius = radius;
        self
    }

    /// Builder pattern: set exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set playout horizon.
    pub fn with_playout_horizon(mut self, plies: usize) -> Self {
        self.playout_horizon = plies;
        self
    }

    /// Builder pattern: set candidate cap.
    pub fn with_candidate_cap(mut self, cap: usize) -> Self {
        self.candidate_cap = cap;
        self
    }

    /// Builder pattern: set seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject configurations no search can run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        let fail = |msg: String| Err(EngineError::DegenerateConfig(msg));

        if self.iterations == 0 {
            return fail("iterations must be positive".into());
        }
        if self.win_length == 0 {
            return fail("win_length must be positive".into());
        }
        if self.board_size < self.win_length {
            return fail(format!(
                "board_size {} is smaller than win_length {}",
                self.board_size, self.win_length
            ));
        }
        if self.pruning_radius == 0 {
            return fail("pruning_radius must be at least 1".into());
        }
        if self.candidate_cap == 0 {
            return fail("candidate_cap must be positive".into());
        }
        if self.expansion_prefix == 0 {
            return fail("expansion_prefix must be positive".into());
        }
        if self.playout_top_k == 0 {
            return fail("playout_top_k must be positive".into());
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return fail(format!(
                "exploration_constant {} must be finite and non-negative",
                self.exploration_constant
            ));
        }
        if !(0.0..=1.0).contains(&self.playout_random) {
            return fail(format!(
                "playout_random {} must lie in [0, 1]",
                self.playout_random
            ));
        }
        Ok(())
    }
}
