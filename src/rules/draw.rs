//! Draw detection

use crate::board::{Board, Player};

use super::win::has_line;

/// Checks if the board is full (all cells occupied).
#[inline]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// A draw is a full board on which neither player holds a line.
/// A full board with a line is a win, never a draw.
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && !has_line(board, Player::X) && !has_line(board, Player::O)
}
