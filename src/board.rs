//! Board representation and line-of-five detection.
//!
//! The board is a plain row-major grid of `Option<Color>`. It knows its own
//! win length so that [`has_five`] is the single place deciding whether a
//! line is long enough.

use std::fmt;

use crate::constants::{AXES, WIN_LENGTH};
use crate::error::EngineError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// A board coordinate, 0-indexed. Ordering is row-major.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Chebyshev distance to another coordinate.
    pub fn distance(self, other: Move) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl From<(usize, usize)> for Move {
    fn from((row, col): (usize, usize)) -> Self {
        Move::new(row, col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    win_length: usize,
    cells: Vec<Option<Color>>,
    stones: usize,
}

impl Board {
    /// Empty board with the default win length.
    pub fn new(size: usize) -> Self {
        Self::with_win_length(size, WIN_LENGTH)
    }

    pub fn with_win_length(size: usize, win_length: usize) -> Self {
        Self {
            size,
            win_length,
            cells: vec![None; size * size],
            stones: 0,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn win_length(&self) -> usize {
        self.win_length
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Stone at a cell. Out-of-range coordinates read as empty.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        if !self.in_bounds(row, col) {
            return None;
        }
        self.cells[self.idx(row, col)]
    }

    #[inline]
    pub fn at(&self, mv: Move) -> Option<Color> {
        self.get(mv.row, mv.col)
    }

    /// True if the cell is on the board and empty.
    #[inline]
    pub fn is_free(&self, mv: Move) -> bool {
        self.in_bounds(mv.row, mv.col) && self.cells[self.idx(mv.row, mv.col)].is_none()
    }

    /// Number of stones on the board.
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.stones
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stones == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stones == self.cells.len()
    }

    /// The center cell (lower-right of the four middle cells on even sizes).
    pub fn center(&self) -> Move {
        Move::new(self.size / 2, self.size / 2)
    }

    /// Place a stone. Fails on occupied or out-of-range cells.
    pub fn place(&mut self, mv: Move, color: Color) -> Result<(), EngineError> {
        if !self.in_bounds(mv.row, mv.col) {
            return Err(EngineError::out_of_range(mv.row, mv.col));
        }
        let i = self.idx(mv.row, mv.col);
        if self.cells[i].is_some() {
            return Err(EngineError::occupied(mv.row, mv.col));
        }
        self.cells[i] = Some(color);
        self.stones += 1;
        Ok(())
    }

    /// Remove a stone, returning what was there.
    pub fn remove(&mut self, mv: Move) -> Option<Color> {
        if !self.in_bounds(mv.row, mv.col) {
            return None;
        }
        let i = self.idx(mv.row, mv.col);
        let prev = self.cells[i].take();
        if prev.is_some() {
            self.stones -= 1;
        }
        prev
    }

    /// All empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Move> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| Move::new(i / self.size, i % self.size))
    }

    /// Step from a cell, returning `None` when leaving the board.
    #[inline]
    fn step(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        self.in_bounds(r, c).then_some((r, c))
    }

    /// Count contiguous `color` stones from `(row, col)` walking in one
    /// direction, not counting the start cell.
    fn walk(&self, row: usize, col: usize, dr: isize, dc: isize, color: Color) -> usize {
        let mut count = 0;
        let (mut r, mut c) = (row, col);
        while let Some((nr, nc)) = self.step(r, c, dr, dc) {
            if self.cells[self.idx(nr, nc)] != Some(color) {
                break;
            }
            count += 1;
            r = nr;
            c = nc;
        }
        count
    }

    /// Length of the `color` run through `(row, col)` along one axis.
    ///
    /// The point itself always counts, occupied or not, so this measures the
    /// run a stone placed there would belong to.
    pub fn axis_run(&self, row: usize, col: usize, color: Color, axis: (isize, isize)) -> usize {
        let (dr, dc) = axis;
        1 + self.walk(row, col, dr, dc, color) + self.walk(row, col, -dr, -dc, color)
    }
}

/// Does `player` have a line of at least `win_length` through `(row, col)`?
///
/// The point is counted as a `player` stone, so this also answers "would
/// playing here win". Exits on the first axis that reaches the threshold.
pub fn has_five(board: &Board, row: usize, col: usize, player: Color) -> bool {
    if !board.in_bounds(row, col) {
        return false;
    }
    AXES.iter()
        .any(|&axis| board.axis_run(row, col, player, axis) >= board.win_length())
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let ch = match self.get(row, col) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
