//! Error kinds surfaced by the engine.

use thiserror::Error;

/// Errors returned by the public engine API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The coordinate is off the board or the cell is already taken.
    #[error("invalid move at ({row}, {col}): {reason}")]
    InvalidMove {
        row: usize,
        col: usize,
        reason: &'static str,
    },

    /// Nothing left to play. The arbiter reports this as `Ok(None)`.
    #[error("no candidate moves available")]
    NoCandidateMoves,

    /// Configuration rejected before any search runs.
    #[error("degenerate configuration: {0}")]
    DegenerateConfig(String),
}

impl EngineError {
    pub(crate) fn occupied(row: usize, col: usize) -> Self {
        EngineError::InvalidMove {
            row,
            col,
            reason: "cell is occupied",
        }
    }

    pub(crate) fn out_of_range(row: usize, col: usize) -> Self {
        EngineError::InvalidMove {
            row,
            col,
            reason: "coordinate out of range",
        }
    }
}
