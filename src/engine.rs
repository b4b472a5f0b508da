//! Main AI engine integrating the heuristic and the search
//!
//! The engine always plays O. On a 3x3 board the move comes from the
//! opening heuristic when one of its steps applies:
//!
//! 1. **Immediate win**: a cell that completes an O line
//! 2. **Block**: a cell that would complete an X line
//! 3. **Priority**: center, corners, edges, checked against the search
//!
//! Larger boards, and the 3x3 case where no step applies, use the
//! depth-limited alpha-beta search directly.
//!
//! # Example
//!
//! ```
//! use tictactoe::{AIEngine, GameState, Pos};
//!
//! let mut game = GameState::new_game(3).unwrap();
//! game.play(Pos::new(0, 0)).unwrap();
//!
//! let mut engine = AIEngine::new();
//! let result = engine.get_move_with_stats(&game);
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::Instant;

use tracing::{debug, instrument};

use crate::board::{Board, BoardSize, Pos};
use crate::error::{GameError, Result};
use crate::game::{GameState, GameStatus};
use crate::search::{opening_move, OpeningMove, SearchResult, Searcher, AI_PLAYER, WIN_SCORE};

/// Type of search that produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Completes a line for O
    ImmediateWin,
    /// Stops X from completing a line
    Block,
    /// Priority-order cell (3x3 only)
    Priority,
    /// Alpha-beta search result
    Minimax,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Minimax score of the move (root perspective, O positive)
    pub score: i32,
    /// Type of search that found this move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    /// Create a result from the opening heuristic. `score` is the search
    /// score of the chosen cell.
    #[inline]
    fn from_opening(choice: OpeningMove, score: i32, time_ms: u64, nodes: u64) -> Self {
        let search_type = match choice {
            OpeningMove::Win(_) => SearchType::ImmediateWin,
            OpeningMove::Block(_) => SearchType::Block,
            OpeningMove::Priority { .. } => SearchType::Priority,
        };
        Self {
            best_move: Some(choice.pos()),
            score,
            search_type,
            time_ms,
            nodes,
        }
    }

    /// Create a result from alpha-beta search
    #[inline]
    fn from_minimax(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type: SearchType::Minimax,
            time_ms,
            nodes: result.stats.nodes,
        }
    }
}

/// Main AI engine.
///
/// # Example
///
/// ```
/// use tictactoe::{AIEngine, Board, GameState, Player, Pos};
///
/// let board = Board::from_rows("XX. .O. ...").unwrap();
/// let game = GameState::from_board(board, Player::O);
///
/// let mut engine = AIEngine::new();
/// assert_eq!(engine.get_move(&game), Some(Pos::new(0, 2)));
/// ```
#[derive(Debug)]
pub struct AIEngine {
    searcher: Searcher,
    /// Worker threads for the root split; 1 searches on the calling thread
    threads: usize,
}

impl AIEngine {
    /// Create a new AI engine that searches on the calling thread.
    #[must_use]
    pub fn new() -> Self {
        Self::with_threads(1)
    }

    /// Create an engine that splits the root candidates over `threads`
    /// workers. The chosen move is the same as with one thread.
    #[must_use]
    pub fn with_threads(threads: usize) -> Self {
        Self {
            searcher: Searcher::new(),
            threads: threads.max(1),
        }
    }

    /// Engine using every available core.
    #[must_use]
    pub fn parallel() -> Self {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::with_threads(threads)
    }

    #[must_use]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Get the best O move for the position.
    ///
    /// Returns `None` only when the board has no empty cell.
    #[must_use]
    pub fn get_move(&mut self, state: &GameState) -> Option<Pos> {
        self.get_move_with_stats(state).best_move
    }

    /// Get the best O move with search statistics.
    ///
    /// The state is never modified: the search runs on one copy of the
    /// board, which it restores itself after every probe.
    #[instrument(level = "debug", skip_all, fields(size = %state.size(), empty = state.board().empty_count()))]
    pub fn get_move_with_stats(&mut self, state: &GameState) -> MoveResult {
        let mut board = *state.board();
        let result = self.best_move_on(&mut board);
        debug!(
            best_move = ?result.best_move,
            search_type = ?result.search_type,
            score = result.score,
            nodes = result.nodes,
            time_ms = result.time_ms,
            "engine move"
        );
        result
    }

    /// Search directly on a board. The board is restored before returning.
    pub fn best_move_on(&mut self, board: &mut Board) -> MoveResult {
        let start = Instant::now();

        if board.size() == BoardSize::Three {
            if let Some(choice) = opening_move(board, &mut self.searcher) {
                let (score, nodes) = match choice {
                    // A completed line scores at depth 0 without searching
                    OpeningMove::Win(_) => (WIN_SCORE, 0),
                    OpeningMove::Block(pos) => {
                        let score = self.searcher.score_move(board, pos);
                        (score, self.searcher.stats().nodes)
                    }
                    OpeningMove::Priority { score, .. } => (score, self.searcher.stats().nodes),
                };
                return MoveResult::from_opening(
                    choice,
                    score,
                    start.elapsed().as_millis() as u64,
                    nodes,
                );
            }
        }

        let result = if self.threads > 1 {
            self.searcher.search_parallel(board, self.threads)
        } else {
            self.searcher.search(board)
        };
        MoveResult::from_minimax(result, start.elapsed().as_millis() as u64)
    }

    /// Play O's reply if it is O's turn in a running round.
    ///
    /// Returns `Ok(None)` when it is not the engine's turn or the round is
    /// over. The move goes through `GameState::play`, so the round status
    /// is updated like for any other move.
    pub fn respond(&mut self, state: &mut GameState) -> Result<Option<MoveResult>> {
        if state.status() != GameStatus::InProgress || state.current_player() != AI_PLAYER {
            return Ok(None);
        }
        let result = self.get_move_with_stats(state);
        let pos = result.best_move.ok_or(GameError::GameOver)?;
        state.play(pos)?;
        Ok(Some(result))
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}
