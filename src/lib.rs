//! N×N tic-tac-toe with a minimax opponent
//!
//! Plays tic-tac-toe on 3x3, 4x4 and 5x5 boards. A player wins by filling
//! a whole row, column or diagonal; shorter runs never count. X moves first;
//! the AI plays O.
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Line and draw detection
//! - [`game`]: Game state and the round state machine
//! - [`search`]: Alpha-beta minimax and the 3x3 opening heuristic
//! - [`engine`]: Main AI engine integrating all components
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use tictactoe::{AIEngine, GameState, GameStatus, Pos};
//!
//! let mut game = GameState::new_game(3).unwrap();
//! let mut engine = AIEngine::new();
//!
//! // Human plays X in a corner
//! game.play(Pos::new(0, 0)).unwrap();
//!
//! // AI responds as O
//! if let Some(pos) = engine.get_move(&game) {
//!     assert_eq!(game.play(pos), Ok(GameStatus::InProgress));
//!     println!("AI plays at ({}, {})", pos.row, pos.col);
//! }
//! ```
//!
//! # Search Depth
//!
//! The search horizon depends on the board and on how full it is:
//! 6 plies on 3x3, 4 (early) or 6 (late) on 4x4, 3 (early) or 5 (late)
//! on 5x5.

pub mod board;
pub mod cli;
pub mod engine;
pub mod error;
pub mod game;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, BoardSize, Cell, Player, Pos};
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{GameError, Result};
pub use game::{GameState, GameStatus};
