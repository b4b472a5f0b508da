//! Board representation for N×N tic-tac-toe

pub mod bitboard;
pub mod board;


use std::fmt;

use crate::error::GameError;

// Re-exports
pub use bitboard::Bitboard;
pub use board::Board;

/// Largest supported board width (5x5)
pub const MAX_SIZE: usize = 5;
pub const MAX_CELLS: usize = MAX_SIZE * MAX_SIZE; // 25

/// Contents of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

/// Side to move. X moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get opponent
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => f.write_str("X"),
            Player::O => f.write_str("O"),
        }
    }
}

/// Supported board widths.
///
/// Only full-length lines win, so a 4x4 game needs four in a row and a
/// 5x5 game five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardSize {
    Three = 3,
    Four = 4,
    Five = 5,
}

impl BoardSize {
    pub const ALL: [BoardSize; 3] = [BoardSize::Three, BoardSize::Four, BoardSize::Five];

    /// Board width
    #[inline]
    pub const fn n(self) -> usize {
        self as usize
    }

    /// Number of cells (N*N)
    #[inline]
    pub const fn cells(self) -> usize {
        self.n() * self.n()
    }

    /// Mask with one bit per cell of this board
    #[inline]
    pub const fn full_mask(self) -> Bitboard {
        Bitboard::from_bits((1u32 << self.cells()) - 1)
    }

    /// Every winning line as a cell mask, in canonical check order:
    /// rows, columns, main diagonal, anti-diagonal.
    #[inline]
    pub fn lines(self) -> &'static [Bitboard] {
        match self {
            BoardSize::Three => &LINES_3,
            BoardSize::Four => &LINES_4,
            BoardSize::Five => &LINES_5,
        }
    }
}

impl TryFrom<u8> for BoardSize {
    type Error = GameError;

    fn try_from(size: u8) -> Result<Self, Self::Error> {
        match size {
            3 => Ok(BoardSize::Three),
            4 => Ok(BoardSize::Four),
            5 => Ok(BoardSize::Five),
            _ => Err(GameError::InvalidSize { size }),
        }
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.n(), self.n())
    }
}

/// Number of lines on an N×N board: N rows + N columns + 2 diagonals
const fn line_count(n: usize) -> usize {
    2 * n + 2
}

const fn build_lines<const L: usize>(n: usize) -> [Bitboard; L] {
    let mut lines = [Bitboard::new(); L];
    let mut i = 0;
    while i < n {
        let mut row = 0u32;
        let mut col = 0u32;
        let mut j = 0;
        while j < n {
            row |= 1 << (i * n + j);
            col |= 1 << (j * n + i);
            j += 1;
        }
        lines[i] = Bitboard::from_bits(row);
        lines[n + i] = Bitboard::from_bits(col);
        i += 1;
    }
    let mut diag = 0u32;
    let mut anti = 0u32;
    let mut k = 0;
    while k < n {
        diag |= 1 << (k * n + k);
        anti |= 1 << (k * n + (n - 1 - k));
        k += 1;
    }
    lines[2 * n] = Bitboard::from_bits(diag);
    lines[2 * n + 1] = Bitboard::from_bits(anti);
    lines
}

static LINES_3: [Bitboard; line_count(3)] = build_lines(3);
static LINES_4: [Bitboard; line_count(4)] = build_lines(4);
static LINES_5: [Bitboard; line_count(5)] = build_lines(5);

/// Position on the board (0-indexed, row-major)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major cell index on a board of width `size`
    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize, size: usize) -> Self {
        Self {
            row: (idx / size) as u8,
            col: (idx % size) as u8,
        }
    }

    /// True if the position lies on a board of width `size`
    #[inline]
    pub fn is_within(self, size: BoardSize) -> bool {
        (self.row as usize) < size.n() && (self.col as usize) < size.n()
    }
}

impl From<(u8, u8)> for Pos {
    fn from((row, col): (u8, u8)) -> Self {
        Pos::new(row, col)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
