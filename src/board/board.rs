//! Board structure: a size-parameterized grid of two bitboards

use std::fmt;

use super::bitboard::Bitboard;
use super::{BoardSize, Cell, Player, Pos};
use crate::error::{GameError, Result};

/// N×N game board.
///
/// The board is a plain `Copy` value, so restoring a saved board is a
/// single assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    size: BoardSize,
    /// X marks bitboard
    x: Bitboard,
    /// O marks bitboard
    o: Bitboard,
}

impl Board {
    /// Empty board of the given size
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            x: Bitboard::new(),
            o: Bitboard::new(),
        }
    }

    #[inline]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Bounds-checked cell access
    pub fn get(&self, pos: Pos) -> Result<Cell> {
        let idx = self.index_of(pos)?;
        Ok(self.cell_at(idx))
    }

    /// Cell at a row-major index known to be on the board
    #[inline]
    pub fn cell_at(&self, idx: usize) -> Cell {
        if self.x.get(idx) {
            Cell::X
        } else if self.o.get(idx) {
            Cell::O
        } else {
            Cell::Empty
        }
    }

    /// Check if position is on the board and empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        matches!(self.get(pos), Ok(Cell::Empty))
    }

    /// Place a mark without validation.
    /// Used by the search for transient placements; game moves go through
    /// `GameState::apply_move`.
    #[inline]
    pub fn place(&mut self, pos: Pos, player: Player) {
        let idx = pos.to_index(self.size.n());
        match player {
            Player::X => self.x.set(idx),
            Player::O => self.o.set(idx),
        }
    }

    /// Remove a mark
    #[inline]
    pub fn remove(&mut self, pos: Pos) {
        let idx = pos.to_index(self.size.n());
        self.x.clear(idx);
        self.o.clear(idx);
    }

    /// Place a mark on an empty, in-range cell.
    /// On failure the board is left untouched.
    pub fn try_place(&mut self, pos: Pos, player: Player) -> Result<()> {
        let idx = self.index_of(pos)?;
        if self.cell_at(idx) != Cell::Empty {
            return Err(GameError::CellOccupied {
                row: pos.row,
                col: pos.col,
            });
        }
        self.place(pos, player);
        Ok(())
    }

    /// Bitboard of a player's marks
    #[inline]
    pub fn marks(&self, player: Player) -> Bitboard {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Bitboard of empty cells
    #[inline]
    pub fn empty_mask(&self) -> Bitboard {
        Bitboard::from_bits(self.size.full_mask().bits() & !(self.x | self.o).bits())
    }

    /// Empty cells in strict row-major order.
    /// This order decides every tie in the search.
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> {
        self.empty_mask().positions(self.size.n())
    }

    /// Number of empty cells
    #[inline]
    pub fn empty_count(&self) -> usize {
        self.empty_mask().count() as usize
    }

    /// True when no cell is empty
    #[inline]
    pub fn is_full(&self) -> bool {
        self.empty_mask().is_empty()
    }

    /// Build a board from whitespace-separated rows of `X`, `O` and `.`.
    /// The row count decides the size; every row must be that long.
    pub fn from_rows(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text.split_whitespace().collect();
        let count =
            u8::try_from(rows.len()).map_err(|_| GameError::InvalidSize { size: u8::MAX })?;
        let size = BoardSize::try_from(count)?;

        let mut board = Board::new(size);
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != size.n() {
                return Err(GameError::RowLength {
                    row: row as u8,
                    len,
                    size: count,
                });
            }
            for (col, mark) in line.chars().enumerate() {
                let pos = Pos::new(row as u8, col as u8);
                match mark {
                    'X' | 'x' => board.place(pos, Player::X),
                    'O' | 'o' => board.place(pos, Player::O),
                    '.' => {}
                    _ => {
                        return Err(GameError::UnknownMark {
                            mark,
                            row: pos.row,
                            col: pos.col,
                        })
                    }
                }
            }
        }
        Ok(board)
    }

    fn index_of(&self, pos: Pos) -> Result<usize> {
        if !pos.is_within(self.size) {
            return Err(GameError::InvalidCoordinate {
                row: pos.row,
                col: pos.col,
                size: self.size.n() as u8,
            });
        }
        Ok(pos.to_index(self.size.n()))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size.n();
        for row in 0..n {
            for col in 0..n {
                let ch = match self.cell_at(row * n + col) {
                    Cell::X => 'X',
                    Cell::O => 'O',
                    Cell::Empty => '.',
                };
                write!(f, "{ch}")?;
            }
            if row + 1 < n {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
