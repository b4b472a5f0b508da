//! Win condition checking
//!
//! A player wins by owning every cell of a row, a column or either
//! diagonal. Shorter runs never count, even on 4x4 and 5x5 boards.

use tracing::instrument;

use crate::board::{Bitboard, Board, Player, Pos};

/// Check if `player` holds a full line.
/// Rows are checked first, then columns, then the two diagonals.
#[inline]
pub fn has_line(board: &Board, player: Player) -> bool {
    let marks = board.marks(player);
    board.size().lines().iter().any(|&line| marks.contains(line))
}

/// The first full line held by `player`, in canonical check order
fn find_line(board: &Board, player: Player) -> Option<Bitboard> {
    let marks = board.marks(player);
    board
        .size()
        .lines()
        .iter()
        .copied()
        .find(|&line| marks.contains(line))
}

/// Positions of the winning line, if `player` has one
pub fn winning_line(board: &Board, player: Player) -> Option<Vec<Pos>> {
    find_line(board, player).map(|line| line.positions(board.size().n()).collect())
}

/// Check for a winner.
///
/// X is checked before O; a position reached through legal play never has
/// both.
#[instrument(level = "trace", skip(board))]
pub fn winner(board: &Board) -> Option<Player> {
    [Player::X, Player::O]
        .into_iter()
        .find(|&player| has_line(board, player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardSize;

    #[test]
    fn test_empty_board_has_no_line() {
        for size in BoardSize::ALL {
            let board = Board::new(size);
            assert!(!has_line(&board, Player::X));
            assert!(!has_line(&board, Player::O));
            assert_eq!(winner(&board), None);
        }
    }

    #[test]
    fn test_row_win() {
        let board = Board::from_rows("... XXX O.O").unwrap();
        assert!(has_line(&board, Player::X));
        assert!(!has_line(&board, Player::O));
        assert_eq!(winner(&board), Some(Player::X));
    }

    #[test]
    fn test_column_win() {
        let board = Board::from_rows("O.X O.X O..").unwrap();
        assert!(has_line(&board, Player::O));
        assert!(!has_line(&board, Player::X));
    }

    #[test]
    fn test_main_diagonal_win() {
        let board = Board::from_rows("O... .O.. ..O. ...O").unwrap();
        assert!(has_line(&board, Player::O));
    }

    #[test]
    fn test_anti_diagonal_win() {
        let board = Board::from_rows("....X ...X. ..X.. .X... X....").unwrap();
        assert!(has_line(&board, Player::X));
    }

    #[test]
    fn test_short_run_is_not_a_win() {
        // Three in a row on 4x4 and four in a row on 5x5 do not count
        let board = Board::from_rows("XXX. .... .... ....").unwrap();
        assert!(!has_line(&board, Player::X));

        let board = Board::from_rows("OOOO. ..... ..... ..... .....").unwrap();
        assert!(!has_line(&board, Player::O));

        let board = Board::from_rows("X.... .X... ..X.. ...X. .....").unwrap();
        assert!(!has_line(&board, Player::X));
    }

    #[test]
    fn test_winning_line_positions() {
        let board = Board::from_rows("..O .O. O..").unwrap();
        assert_eq!(
            winning_line(&board, Player::O),
            Some(vec![Pos::new(0, 2), Pos::new(1, 1), Pos::new(2, 0)])
        );
        assert_eq!(winning_line(&board, Player::X), None);
    }

    #[test]
    fn test_winning_line_prefers_rows() {
        // Row 0 and column 0 are both complete; the row is reported
        let board = Board::from_rows("XXX X.. X..").unwrap();
        assert_eq!(
            winning_line(&board, Player::X),
            Some(vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2)])
        );
    }
}
