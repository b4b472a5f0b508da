//! Error types for game-state operations

use thiserror::Error;

/// Rejections reported to the caller. None of them is fatal: the state
/// that produced the error is left exactly as it was.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("invalid board size {size} (expected 3, 4 or 5)")]
    InvalidSize { size: u8 },

    #[error("invalid coordinate ({row}, {col}) on a {size}x{size} board")]
    InvalidCoordinate { row: u8, col: u8, size: u8 },

    #[error("row {row} has {len} cells, expected {size}")]
    RowLength { row: u8, len: usize, size: u8 },

    #[error("unknown mark {mark:?} at ({row}, {col})")]
    UnknownMark { mark: char, row: u8, col: u8 },

    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: u8, col: u8 },

    #[error("game already over")]
    GameOver,
}

pub type Result<T> = std::result::Result<T, GameError>;
