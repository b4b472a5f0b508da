//! 3x3 opening heuristic
//!
//! A shortcut in front of the full search, used only on 3x3 boards:
//!
//! 1. take a winning cell if one exists,
//! 2. otherwise block a cell where X would win,
//! 3. otherwise play the first cell of the priority order (center, corners,
//!    edges) that the search rates as good as its best move.
//!
//! The priority step is checked against the search because the plain
//! priority order walks into a fork (X corner, O center, X opposite corner,
//! O corner).

use crate::board::{Board, Player, Pos};
use crate::rules::has_line;

use super::minimax::{Searcher, AI_PLAYER};

/// Center, then corners, then edges
pub const PRIORITY: [Pos; 9] = [
    Pos::new(1, 1),
    Pos::new(0, 0),
    Pos::new(0, 2),
    Pos::new(2, 0),
    Pos::new(2, 2),
    Pos::new(0, 1),
    Pos::new(1, 0),
    Pos::new(1, 2),
    Pos::new(2, 1),
];

/// Move picked by the heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningMove {
    /// Completes a line for O
    Win(Pos),
    /// Occupies a cell that would complete a line for X
    Block(Pos),
    /// Priority-order cell with its search score
    Priority { pos: Pos, score: i32 },
}

impl OpeningMove {
    pub fn pos(self) -> Pos {
        match self {
            OpeningMove::Win(pos) | OpeningMove::Block(pos) => pos,
            OpeningMove::Priority { pos, .. } => pos,
        }
    }
}

/// First empty cell, in row-major order, that completes a line for `player`.
/// Each probe is undone before the next one.
pub fn find_completing_move(board: &mut Board, player: Player) -> Option<Pos> {
    let n = board.size().n();
    let empties = board.empty_mask();
    for idx in empties.iter_ones() {
        let pos = Pos::from_index(idx, n);
        board.place(pos, player);
        let wins = has_line(board, player);
        board.remove(pos);
        if wins {
            return Some(pos);
        }
    }
    None
}

/// First priority cell whose score equals the best score available
fn priority_move(scored: &[(Pos, i32)]) -> Option<OpeningMove> {
    let best = scored.iter().map(|&(_, score)| score).max()?;
    PRIORITY.iter().find_map(|&pos| {
        scored
            .iter()
            .find(|&&(cell, score)| cell == pos && score == best)
            .map(|&(pos, score)| OpeningMove::Priority { pos, score })
    })
}

/// Run the heuristic for O. `None` means no step applied and the caller
/// should fall back to the full search.
pub fn opening_move(board: &mut Board, searcher: &mut Searcher) -> Option<OpeningMove> {
    if let Some(pos) = find_completing_move(board, AI_PLAYER) {
        return Some(OpeningMove::Win(pos));
    }
    if let Some(pos) = find_completing_move(board, AI_PLAYER.opponent()) {
        return Some(OpeningMove::Block(pos));
    }
    let scored = searcher.score_moves(board);
    priority_move(&scored)
}
