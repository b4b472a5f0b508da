//! Search module for the tic-tac-toe AI
//!
//! Contains:
//! - Depth-limited minimax with alpha-beta pruning and an adaptive horizon
//! - The 3x3 opening heuristic (win, block, priority cell)

pub mod minimax;
pub mod opening;

pub use minimax::{
    adaptive_max_depth, evaluate, SearchResult, SearchStats, Searcher, AI_PLAYER, WIN_SCORE,
};
pub use opening::{opening_move, OpeningMove, PRIORITY};
