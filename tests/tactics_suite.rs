//! Tactical regression positions.
//!
//! Each test sets up a position from a text diagram and checks the engine's
//! decision and the reason it reports for it. Diagrams are anchored at the
//! top-left corner of a 15x15 board:
//! - `X` - black stone
//! - `O` - white stone
//! - `.` - empty

use gomoku_mcts::board::{Board, Color, Move};
use gomoku_mcts::config::EngineConfig;
use gomoku_mcts::engine::{MoveChoice, Reason, compute_move};
use gomoku_mcts::position::GameState;

// =============================================================================
// Helper functions
// =============================================================================

/// Place stones from a diagram on an empty 15x15 board.
fn setpos(diagram: &[&str]) -> Board {
    let mut board = Board::new(15);
    for (row, line) in diagram.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            let color = match ch {
                'X' => Color::Black,
                'O' => Color::White,
                '.' => continue,
                other => panic!("bad diagram character {other:?} at ({row}, {col})"),
            };
            if let Err(e) = board.place(Move::new(row, col), color) {
                panic!("illegal stone in setpos: {e}");
            }
        }
    }
    board
}

/// Ask the engine for `player`'s move with the test budget.
fn decide(board: &Board, player: Color) -> MoveChoice {
    compute_move(board, player, &EngineConfig::for_testing())
        .unwrap()
        .unwrap_or_else(|| panic!("no move on\n{board}"))
}

// =============================================================================
// Completing a line
// =============================================================================

#[test]
fn test_win_fills_broken_four() {
    let board = setpos(&[
        "........",
        "..XX.XX.",
        "..OOO...",
        "......O.",
    ]);
    let choice = decide(&board, Color::Black);
    assert_eq!(choice.mv, Move::new(1, 4), "got {}\n{board}", choice.mv);
    assert_eq!(choice.reason, Reason::Win);
}

#[test]
fn test_win_on_diagonal() {
    let board = setpos(&[
        "O.......",
        ".X......",
        "..X..O..",
        "...X....",
        "....X.O.",
        "........",
    ]);
    let choice = decide(&board, Color::Black);
    assert_eq!(choice.mv, Move::new(5, 5), "got {}\n{board}", choice.mv);
    assert_eq!(choice.reason, Reason::Win);
}

#[test]
fn test_win_takes_precedence_over_block() {
    let board = setpos(&[
        ".........",
        ".XXXX....",
        ".........",
        "...OOOO..",
        ".........",
    ]);
    // White to move: its own open four wins before Black's threat matters
    let choice = decide(&board, Color::White);
    assert_eq!(choice.reason, Reason::Win);
    assert!(
        choice.mv == Move::new(3, 2) || choice.mv == Move::new(3, 7),
        "got {}\n{board}",
        choice.mv
    );
}

// =============================================================================
// Blocking
// =============================================================================

#[test]
fn test_block_four_against_wall() {
    let board = setpos(&[
        "XXXX.....",
        "........O",
    ]);
    let choice = decide(&board, Color::White);
    assert_eq!(choice.mv, Move::new(0, 4), "got {}\n{board}", choice.mv);
    assert_eq!(choice.reason, Reason::Block);
}

#[test]
fn test_block_vertical_four() {
    let board = setpos(&[
        "..O......",
        "..X......",
        "..X..O...",
        "..X......",
        "..X......",
        ".........",
    ]);
    let choice = decide(&board, Color::White);
    assert_eq!(choice.mv, Move::new(5, 2), "got {}\n{board}", choice.mv);
    assert_eq!(choice.reason, Reason::Block);
}

// =============================================================================
// Critical blocks
// =============================================================================

#[test]
fn test_critical_block_split_three() {
    // X.XX: filling the gap makes an open four
    let board = setpos(&[
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..X.XX....",
        "..........",
        "..........",
        ".........O",
    ]);
    let choice = decide(&board, Color::White);
    assert_eq!(choice.mv, Move::new(5, 3), "got {}\n{board}", choice.mv);
    assert_eq!(choice.reason, Reason::CriticalBlock);
}

#[test]
fn test_critical_block_at_crossing() {
    // Two capped threes; a black stone at the crossing threatens both lines
    let board = setpos(&[
        "..........",
        "......O...",
        "......X...",
        "......X...",
        "......X...",
        "..........",
        ".OXXX.....",
    ]);
    let choice = decide(&board, Color::White);
    assert_eq!(choice.mv, Move::new(6, 6), "got {}\n{board}", choice.mv);
    assert_eq!(choice.reason, Reason::CriticalBlock);
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_search_extends_open_three() {
    let board = setpos(&[
        "..........",
        "..........",
        "..........",
        "..........",
        "...XXX....",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "..........",
        "O.........",
    ]);
    let choice = decide(&board, Color::Black);
    assert_eq!(choice.reason, Reason::Search);
    assert!(
        choice.mv == Move::new(4, 2) || choice.mv == Move::new(4, 6),
        "got {}\n{board}",
        choice.mv
    );
}

#[test]
fn test_selfplay_reaches_end_on_small_board() {
    let config = EngineConfig::for_testing()
        .with_board_size(7)
        .with_win_length(4)
        .with_iterations(30);
    let mut state = GameState::new(7, 4);

    while !state.status().is_terminal() {
        let choice = compute_move(state.board(), state.to_move(), &config)
            .unwrap()
            .expect("ongoing game has a move");
        state.play(choice.mv).unwrap();
        assert!(state.move_count() <= 49);
    }
    assert!(state.status().is_terminal());
}
