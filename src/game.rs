//! Game state and the round state machine
//!
//! A round is `InProgress` until a move completes a line (`Won`) or fills
//! the board (`Draw`). Terminal rounds reject moves until `reset`.
//!
//! `apply_move` only places a mark and never advances the turn, so the
//! terminal checks in `play` see the board before the switch.

use tracing::{debug, instrument};

use crate::board::{Board, BoardSize, Player, Pos};
use crate::error::{GameError, Result};
use crate::rules;

/// Current status of the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Waiting for a move
    InProgress,
    /// Terminal: the player completed a line
    Won(Player),
    /// Terminal: full board, no line
    Draw,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Complete state of one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    status: GameStatus,
    /// Accepted moves, oldest first
    history: Vec<Pos>,
}

impl GameState {
    /// Fresh round: empty board, X to move.
    pub fn new_game(size: u8) -> Result<Self> {
        Ok(Self::with_size(BoardSize::try_from(size)?))
    }

    pub fn with_size(size: BoardSize) -> Self {
        Self {
            board: Board::new(size),
            current_player: Player::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Resume from an arbitrary position with `to_move` on turn.
    /// The status is derived from the board.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let status = match rules::winner(&board) {
            Some(player) => GameStatus::Won(player),
            None if rules::is_draw(&board) => GameStatus::Draw,
            None => GameStatus::InProgress,
        };
        Self {
            board,
            current_player: to_move,
            status,
            history: Vec::new(),
        }
    }

    /// Clear the board for a new round of the given size.
    pub fn reset(&mut self, size: BoardSize) {
        *self = Self::with_size(size);
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn size(&self) -> BoardSize {
        self.board.size()
    }

    #[inline]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn history(&self) -> &[Pos] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Pos> {
        self.history.last().copied()
    }

    /// Place the current player's mark.
    ///
    /// Fails with `InvalidCoordinate` or `CellOccupied` and leaves the board
    /// unchanged. Does not switch the turn.
    pub fn apply_move(&mut self, pos: Pos) -> Result<()> {
        self.board.try_place(pos, self.current_player)?;
        self.history.push(pos);
        Ok(())
    }

    /// Hand the turn to the other player.
    #[inline]
    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> {
        self.board.empty_cells()
    }

    pub fn winner(&self) -> Option<Player> {
        rules::winner(&self.board)
    }

    pub fn is_draw(&self) -> bool {
        rules::is_draw(&self.board)
    }

    /// Positions of the winning line, if the round was won
    pub fn winning_line(&self) -> Option<Vec<Pos>> {
        match self.status {
            GameStatus::Won(player) => rules::winning_line(&self.board, player),
            _ => None,
        }
    }

    /// One full transition of the round: apply the move, check for a line
    /// or a draw, and switch the turn if the round goes on.
    #[instrument(level = "debug", skip(self), fields(player = %self.current_player))]
    pub fn play(&mut self, pos: Pos) -> Result<GameStatus> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        self.apply_move(pos)?;

        let mover = self.current_player;
        if rules::has_line(&self.board, mover) {
            self.status = GameStatus::Won(mover);
            debug!(%mover, "round won");
        } else if rules::is_draw(&self.board) {
            self.status = GameStatus::Draw;
            debug!("round drawn");
        } else {
            self.switch_player();
        }
        Ok(self.status)
    }
}
