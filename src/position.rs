//! Game state: board, side to move, history, and terminal status.
//!
//! `GameState` is the value the search tree stores per node. Every move goes
//! through [`GameState::play`], which runs the win detector on the placed
//! stone and settles the terminal status, so the status can never disagree
//! with the board.

use crate::board::{Board, Color, Move, has_five};
use crate::error::EngineError;

/// Terminal status of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Ongoing,
    Won(Color),
    Draw,
}

impl Status {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Status::Ongoing
    }

    /// The winner, if the game ended with one.
    #[inline]
    pub fn winner(self) -> Option<Color> {
        match self {
            Status::Won(c) => Some(c),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    to_move: Color,
    history: Vec<Move>,
    status: Status,
}

impl GameState {
    /// New game on an empty board. Black moves first.
    pub fn new(board_size: usize, win_length: usize) -> Self {
        Self {
            board: Board::with_win_length(board_size, win_length),
            to_move: Color::Black,
            history: Vec::new(),
            status: Status::Ongoing,
        }
    }

    /// Wrap an existing board with `to_move` to play.
    ///
    /// No history is known for such a board, so `last_move` is `None` and
    /// `move_count` reports the stone count. The status is `Draw` for a full
    /// board, `Ongoing` otherwise; callers hand in positions still in play.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        let status = if board.is_full() {
            Status::Draw
        } else {
            Status::Ongoing
        };
        Self {
            board,
            to_move,
            history: Vec::new(),
            status,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Number of stones on the board.
    #[inline]
    pub fn move_count(&self) -> usize {
        self.board.stone_count()
    }

    /// Last move played through this state, if any.
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// Moves played through this state, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Play a move for the side to move and advance the turn.
    pub fn play(&mut self, mv: Move) -> Result<Status, EngineError> {
        if self.status.is_terminal() {
            return Err(EngineError::InvalidMove {
                row: mv.row,
                col: mv.col,
                reason: "game is already over",
            });
        }
        let mover = self.to_move;
        self.board.place(mv, mover)?;
        self.history.push(mv);
        self.to_move = mover.opponent();

        self.status = if has_five(&self.board, mv.row, mv.col, mover) {
            Status::Won(mover)
        } else if self.board.is_full() {
            Status::Draw
        } else {
            Status::Ongoing
        };
        Ok(self.status)
    }

    /// Take back the last move played through this state.
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.history.pop()?;
        self.board.remove(mv);
        self.to_move = self.to_move.opponent();
        self.status = Status::Ongoing;
        Some(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let state = GameState::new(15, 5);
        assert_eq!(state.to_move(), Color::Black);
        assert_eq!(state.move_count(), 0);
        assert_eq!(state.last_move(), None);
        assert_eq!(state.status(), Status::Ongoing);
    }

    #[test]
    fn test_play_alternates_and_tracks_last_move() {
        let mut state = GameState::new(15, 5);
        state.play(Move::new(7, 7)).unwrap();
        assert_eq!(state.to_move(), Color::White);
        assert_eq!(state.last_move(), Some(Move::new(7, 7)));
        // Last move belongs to the player not to move
        assert_eq!(
            state.board().at(Move::new(7, 7)),
            Some(state.to_move().opponent())
        );

        state.play(Move::new(7, 8)).unwrap();
        assert_eq!(state.to_move(), Color::Black);
        assert_eq!(state.move_count(), 2);
    }

    #[test]
    fn test_occupied_move_leaves_state_untouched() {
        let mut state = GameState::new(15, 5);
        state.play(Move::new(7, 7)).unwrap();
        assert!(state.play(Move::new(7, 7)).is_err());
        assert_eq!(state.to_move(), Color::White);
        assert_eq!(state.move_count(), 1);
    }

    #[test]
    fn test_win_sets_status_and_blocks_further_play() {
        let mut state = GameState::new(15, 5);
        for i in 0..4 {
            state.play(Move::new(0, i)).unwrap();
            state.play(Move::new(1, i)).unwrap();
        }
        let status = state.play(Move::new(0, 4)).unwrap();
        assert_eq!(status, Status::Won(Color::Black));
        assert_eq!(status.winner(), Some(Color::Black));
        assert!(state.play(Move::new(5, 5)).is_err());
    }

    #[test]
    fn test_full_board_is_draw() {
        // 2x2 board cannot hold a line of 5
        let mut state = GameState::new(2, 5);
        for mv in [(0, 0), (0, 1), (1, 0)] {
            assert_eq!(state.play(mv.into()).unwrap(), Status::Ongoing);
        }
        assert_eq!(state.play(Move::new(1, 1)).unwrap(), Status::Draw);
    }

    #[test]
    fn test_undo() {
        let mut state = GameState::new(15, 5);
        state.play(Move::new(7, 7)).unwrap();
        state.play(Move::new(6, 6)).unwrap();
        assert_eq!(state.undo(), Some(Move::new(6, 6)));
        assert_eq!(state.to_move(), Color::White);
        assert_eq!(state.last_move(), Some(Move::new(7, 7)));
        assert!(state.board().is_free(Move::new(6, 6)));
        state.undo();
        assert_eq!(state.undo(), None);
    }

    #[test]
    fn test_from_board() {
        let mut board = Board::new(9);
        board.place(Move::new(4, 4), Color::Black).unwrap();
        let state = GameState::from_board(board, Color::White);
        assert_eq!(state.move_count(), 1);
        assert_eq!(state.to_move(), Color::White);
        assert_eq!(state.last_move(), None);
    }
}
