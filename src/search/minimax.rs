//! Depth-limited minimax with alpha-beta pruning
//!
//! The engine always plays O (the maximizing side) against X.
//!
//! # Board discipline
//!
//! The search mutates a single board in place: every candidate is placed,
//! searched and removed again before the next one is tried, including when
//! a branch is cut off. When a call returns the board is bit-identical to
//! what it was on entry. No copy is taken per branch.
//!
//! # Example
//!
//! ```
//! use tictactoe::board::{Board, BoardSize, Player, Pos};
//! use tictactoe::search::Searcher;
//!
//! let mut board = Board::new(BoardSize::Three);
//! board.place(Pos::new(0, 0), Player::O);
//! board.place(Pos::new(0, 1), Player::O);
//!
//! let mut searcher = Searcher::new();
//! let result = searcher.search(&mut board);
//! assert_eq!(result.best_move, Some(Pos::new(0, 2)));
//! ```

use std::thread;

use crate::board::{Board, BoardSize, Player, Pos};
use crate::rules::has_line;

/// Score of a position won by O at the root
pub const WIN_SCORE: i32 = 10;

/// Bound used for the initial alpha-beta window
const INF: i32 = WIN_SCORE * 100;

/// Side the engine plays
pub const AI_PLAYER: Player = Player::O;

/// Static evaluation, independent of depth and of whose turn it is:
/// +10 if O holds a line, -10 if X does, 0 otherwise.
#[inline]
pub fn evaluate(board: &Board) -> i32 {
    if has_line(board, Player::O) {
        WIN_SCORE
    } else if has_line(board, Player::X) {
        -WIN_SCORE
    } else {
        0
    }
}

/// Search horizon for a position, trading strength for latency on the
/// larger boards. The table is fixed policy.
///
/// | size | empty cells | depth |
/// |------|-------------|-------|
/// | 3    | any         | 6     |
/// | 4    | > 8         | 4     |
/// | 4    | <= 8        | 6     |
/// | 5    | > 12        | 3     |
/// | 5    | <= 12       | 5     |
pub fn adaptive_max_depth(size: BoardSize, empty_count: usize) -> i32 {
    match size {
        BoardSize::Three => 6,
        BoardSize::Four if empty_count > 8 => 4,
        BoardSize::Four => 6,
        BoardSize::Five if empty_count > 12 => 3,
        BoardSize::Five => 5,
    }
}

/// Search statistics for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited by `minimax`
    pub nodes: u64,
    /// Branches abandoned because `beta <= alpha`
    pub cutoffs: u64,
}

impl SearchStats {
    /// Merge another stats into this one (for combining worker stats)
    fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.cutoffs += other.cutoffs;
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, `None` only when the board has no empty cell
    pub best_move: Option<Pos>,
    /// Minimax score of the best move
    pub score: i32,
    /// Horizon used for this search
    pub max_depth: i32,
    /// Search diagnostics
    pub stats: SearchStats,
}

impl SearchResult {
    fn no_move(max_depth: i32) -> Self {
        Self {
            best_move: None,
            score: 0,
            max_depth,
            stats: SearchStats::default(),
        }
    }
}

/// Minimax searcher. Holds nothing but counters between calls; the board
/// is always passed in.
#[derive(Debug, Default)]
pub struct Searcher {
    stats: SearchStats,
}

impl Searcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics of the last top-level call
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Recursive alpha-beta minimax.
    ///
    /// Terminal scores are `10 - depth` for an O line and `-10 + depth` for
    /// an X line, so faster wins and slower losses are preferred. A full
    /// board scores 0, and so does reaching `max_depth` without a result.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        depth: i32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        max_depth: i32,
    ) -> i32 {
        self.stats.nodes += 1;

        match evaluate(board) {
            WIN_SCORE => return WIN_SCORE - depth,
            score if score == -WIN_SCORE => return score + depth,
            _ => {}
        }
        if board.is_full() || depth >= max_depth {
            return 0;
        }

        let n = board.size().n();
        let empties = board.empty_mask();

        if maximizing {
            let mut best = -INF;
            for idx in empties.iter_ones() {
                let pos = Pos::from_index(idx, n);
                board.place(pos, Player::O);
                let score = self.minimax(board, depth + 1, false, alpha, beta, max_depth);
                board.remove(pos);

                best = best.max(score);
                alpha = alpha.max(best);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        } else {
            let mut best = INF;
            for idx in empties.iter_ones() {
                let pos = Pos::from_index(idx, n);
                board.place(pos, Player::X);
                let score = self.minimax(board, depth + 1, true, alpha, beta, max_depth);
                board.remove(pos);

                best = best.min(score);
                beta = beta.min(best);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        }
    }

    /// Score a single O placement with a fresh window
    fn score_candidate(&mut self, board: &mut Board, pos: Pos, max_depth: i32) -> i32 {
        board.place(pos, AI_PLAYER);
        let score = self.minimax(board, 0, false, -INF, INF, max_depth);
        board.remove(pos);
        score
    }

    /// Minimax score of a single O move, searched at the adaptive depth
    pub fn score_move(&mut self, board: &mut Board, pos: Pos) -> i32 {
        self.stats = SearchStats::default();
        let max_depth = adaptive_max_depth(board.size(), board.empty_count());
        self.score_candidate(board, pos, max_depth)
    }

    /// Minimax score of every empty cell, in row-major order
    pub fn score_moves(&mut self, board: &mut Board) -> Vec<(Pos, i32)> {
        self.stats = SearchStats::default();
        let max_depth = adaptive_max_depth(board.size(), board.empty_count());
        let n = board.size().n();
        let empties = board.empty_mask();

        empties
            .iter_ones()
            .map(|idx| {
                let pos = Pos::from_index(idx, n);
                (pos, self.score_candidate(board, pos, max_depth))
            })
            .collect()
    }

    /// Best O move for the position.
    ///
    /// Candidates are tried in row-major order and only a strictly greater
    /// score replaces the current best, so ties go to the first cell.
    #[must_use]
    pub fn search(&mut self, board: &mut Board) -> SearchResult {
        let max_depth = adaptive_max_depth(board.size(), board.empty_count());
        let scored = self.score_moves(board);

        match pick_best(&scored) {
            Some((pos, score)) => SearchResult {
                best_move: Some(pos),
                score,
                max_depth,
                stats: self.stats.clone(),
            },
            None => SearchResult::no_move(max_depth),
        }
    }

    /// Convenience wrapper returning only the move
    #[must_use]
    pub fn best_move(&mut self, board: &mut Board) -> Option<Pos> {
        self.search(board).best_move
    }

    /// Same result as [`Searcher::search`], with the top-level candidates
    /// split over `threads` scoped workers.
    ///
    /// Each worker gets its own copy of the board; the shared board is never
    /// touched from more than one thread.
    #[must_use]
    pub fn search_parallel(&mut self, board: &Board, threads: usize) -> SearchResult {
        self.stats = SearchStats::default();
        let max_depth = adaptive_max_depth(board.size(), board.empty_count());
        let candidates: Vec<Pos> = board.empty_cells().collect();
        if candidates.is_empty() {
            return SearchResult::no_move(max_depth);
        }

        let threads = threads.clamp(1, candidates.len());
        let chunk = candidates.len().div_ceil(threads);

        let parts: Vec<(Vec<(Pos, i32)>, SearchStats)> = thread::scope(|scope| {
            let handles: Vec<_> = candidates
                .chunks(chunk)
                .map(|part| {
                    let mut local = *board;
                    scope.spawn(move || {
                        let mut worker = Searcher::new();
                        let scored: Vec<(Pos, i32)> = part
                            .iter()
                            .map(|&pos| (pos, worker.score_candidate(&mut local, pos, max_depth)))
                            .collect();
                        (scored, worker.stats)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        });

        // Chunks are joined in order, so the concatenation stays row-major
        let mut scored = Vec::with_capacity(candidates.len());
        for (part, stats) in parts {
            scored.extend(part);
            self.stats.merge(&stats);
        }

        match pick_best(&scored) {
            Some((pos, score)) => SearchResult {
                best_move: Some(pos),
                score,
                max_depth,
                stats: self.stats.clone(),
            },
            None => SearchResult::no_move(max_depth),
        }
    }
}

/// First candidate with the strictly greatest score
fn pick_best(scored: &[(Pos, i32)]) -> Option<(Pos, i32)> {
    let mut best: Option<(Pos, i32)> = None;
    for &(pos, score) in scored {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((pos, score)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &str) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_evaluate() {
        assert_eq!(evaluate(&board("OOO X.X ...")), WIN_SCORE);
        assert_eq!(evaluate(&board("XXX O.O ...")), -WIN_SCORE);
        assert_eq!(evaluate(&board("XOX XOO OXX")), 0);
        assert_eq!(evaluate(&Board::new(BoardSize::Four)), 0);
    }

    #[test]
    fn test_adaptive_depth_table() {
        assert_eq!(adaptive_max_depth(BoardSize::Three, 9), 6);
        assert_eq!(adaptive_max_depth(BoardSize::Three, 1), 6);
        assert_eq!(adaptive_max_depth(BoardSize::Four, 16), 4);
        assert_eq!(adaptive_max_depth(BoardSize::Four, 9), 4);
        assert_eq!(adaptive_max_depth(BoardSize::Four, 8), 6);
        assert_eq!(adaptive_max_depth(BoardSize::Five, 25), 3);
        assert_eq!(adaptive_max_depth(BoardSize::Five, 13), 3);
        assert_eq!(adaptive_max_depth(BoardSize::Five, 12), 5);
    }

    #[test]
    fn test_search_takes_win() {
        let mut b = board("OO. ... ...");
        let result = Searcher::new().search(&mut b);
        assert_eq!(result.best_move, Some(Pos::new(0, 2)));
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn test_search_blocks_row() {
        let mut b = board("XX. .O. ...");
        let result = Searcher::new().search(&mut b);
        assert_eq!(result.best_move, Some(Pos::new(0, 2)));
    }

    #[test]
    fn test_search_restores_board() {
        for rows in ["X.. .O. ..X", "XX.. .O.. ..O. X...", "X.... ..... ..O.. ..... ....X"] {
            let mut b = board(rows);
            let before = b;
            let _ = Searcher::new().search(&mut b);
            assert_eq!(b, before, "board changed by search on {rows}");
        }
    }

    #[test]
    fn test_minimax_restores_board_after_cutoff() {
        let mut b = board("X.. ... ...");
        let before = b;
        let mut searcher = Searcher::new();
        // A narrow window forces early cutoffs
        let _ = searcher.minimax(&mut b, 0, true, -1, 1, 6);
        assert!(searcher.stats().cutoffs > 0);
        assert_eq!(b, before);
    }

    #[test]
    fn test_minimax_terminal_scores() {
        let mut searcher = Searcher::new();
        let mut o_won = board("OOO XX. ...");
        assert_eq!(searcher.minimax(&mut o_won, 3, false, -INF, INF, 6), WIN_SCORE - 3);

        let mut x_won = board("XXX OO. ...");
        assert_eq!(searcher.minimax(&mut x_won, 2, true, -INF, INF, 6), -WIN_SCORE + 2);

        let mut drawn = board("XOX XOO OXX");
        assert_eq!(searcher.minimax(&mut drawn, 0, true, -INF, INF, 6), 0);

        // Horizon reached without a result
        let mut open = board("... ... ...");
        assert_eq!(searcher.minimax(&mut open, 6, true, -INF, INF, 6), 0);
    }

    #[test]
    fn test_search_full_board_has_no_move() {
        let mut b = board("XOX XOO OXX");
        let result = Searcher::new().search(&mut b);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_ties_go_to_first_cell() {
        // Every opening move draws with best play, so the first cell wins
        let mut b = Board::new(BoardSize::Three);
        let scored = Searcher::new().score_moves(&mut b);
        assert!(scored.iter().all(|&(_, score)| score == 0));
        assert_eq!(Searcher::new().best_move(&mut b), Some(Pos::new(0, 0)));
    }

    #[test]
    fn test_pick_best_keeps_first_of_equals() {
        let scored = [
            (Pos::new(0, 0), 0),
            (Pos::new(0, 1), 3),
            (Pos::new(0, 2), 3),
            (Pos::new(1, 0), -2),
        ];
        assert_eq!(pick_best(&scored), Some((Pos::new(0, 1), 3)));
        assert_eq!(pick_best(&[]), None);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        for rows in ["X.. ... ...", "X... .O.. ..X. ....", "XO... ..... ..X.. ..... ....."] {
            let mut b = board(rows);
            let sequential = Searcher::new().search(&mut b);
            for threads in [1, 2, 3, 8] {
                let parallel = Searcher::new().search_parallel(&b, threads);
                assert_eq!(parallel.best_move, sequential.best_move, "{rows} x{threads}");
                assert_eq!(parallel.score, sequential.score);
                assert_eq!(parallel.stats.nodes, sequential.stats.nodes);
            }
        }
    }

    #[test]
    fn test_search_4x4_blocks_four() {
        let mut b = board("XXX. OO.. .... ....");
        assert_eq!(Searcher::new().best_move(&mut b), Some(Pos::new(0, 3)));
    }

    #[test]
    fn test_search_5x5_completes_line() {
        let mut b = board("OOOO. XXX.. X.... ..... .....");
        assert_eq!(Searcher::new().best_move(&mut b), Some(Pos::new(0, 4)));
    }
}
