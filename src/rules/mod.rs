//! Line checking for N×N tic-tac-toe
//!
//! Only full-length lines count: a row, a column, the main diagonal or the
//! anti-diagonal entirely held by one player. Lines are always checked in
//! the same order (rows, columns, main diagonal, anti-diagonal).

pub mod draw;
pub mod win;

// Re-exports for convenient access
pub use draw::{is_draw, is_full};
pub use win::{has_line, winner, winning_line};
