//! Session state for the tic-tac-toe GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::search::AI_PLAYER;
use crate::ui::theme;
use crate::{AIEngine, BoardSize, GameState, GameStatus, MoveResult, Player, Pos};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Two humans alternate on the same board
    #[default]
    Multiplayer,
    /// Human plays X, the engine answers as O
    VsAi,
}

impl GameMode {
    pub fn label(self) -> &'static str {
        match self {
            GameMode::Multiplayer => "Multiplayer",
            GameMode::VsAi => "Play vs AI",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            GameMode::Multiplayer => GameMode::VsAi,
            GameMode::VsAi => GameMode::Multiplayer,
        }
    }
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
    },
}

/// Everything the window shows between frames
pub struct Session {
    pub game: GameState,
    pub mode: GameMode,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub message: Option<String>,
    /// Cell that was just played and when
    flash: Option<(Pos, Instant)>,
    parallel: bool,
}

impl Session {
    pub fn new(size: BoardSize, mode: GameMode, parallel: bool) -> Self {
        Self {
            game: GameState::with_size(size),
            mode,
            last_ai_result: None,
            ai_state: AiState::Idle,
            message: None,
            flash: None,
            parallel,
        }
    }

    /// Start a new round on the current size. A pending AI reply is dropped.
    pub fn reset(&mut self) {
        self.game.reset(self.game.size());
        self.last_ai_result = None;
        self.ai_state = AiState::Idle;
        self.message = None;
        self.flash = None;
    }

    /// Switch board size; always starts a new round
    pub fn set_size(&mut self, size: BoardSize) {
        debug!(%size, "board size changed");
        self.game.reset(size);
        self.reset();
    }

    /// Switch mode; always starts a new round
    pub fn set_mode(&mut self, mode: GameMode) {
        debug!(mode = mode.label(), "mode changed");
        self.mode = mode;
        self.reset();
    }

    pub fn is_over(&self) -> bool {
        self.game.status().is_terminal()
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        self.mode == GameMode::VsAi
            && !self.is_over()
            && self.game.current_player() == AI_PLAYER
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt a human move at the given position
    pub fn try_play(&mut self, pos: Pos) -> Result<(), String> {
        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }
        if self.is_ai_turn() {
            return Err("Not your turn".to_string());
        }
        self.execute_move(pos).map_err(|e| e.to_string())
    }

    fn execute_move(&mut self, pos: Pos) -> crate::Result<()> {
        self.game.play(pos)?;
        self.flash = Some((pos, Instant::now()));
        self.message = None;
        Ok(())
    }

    /// Start AI thinking on a background thread
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() {
            return;
        }

        let state = self.game.clone();
        let parallel = self.parallel;
        let (tx, rx) = channel();

        thread::spawn(move || {
            let mut engine = if parallel {
                AIEngine::parallel()
            } else {
                AIEngine::new()
            };
            let result = engine.get_move_with_stats(&state);
            // The receiver is gone if the round was reset meanwhile
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking { receiver, .. } => match receiver.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some(move_result) = result {
            self.ai_state = AiState::Idle;
            let best_move = move_result.best_move;
            self.last_ai_result = Some(move_result);

            match best_move.map(|pos| self.execute_move(pos)) {
                Some(Ok(())) => {}
                Some(Err(e)) => {
                    warn!(error = %e, "AI move rejected");
                    self.message = Some(format!("AI move rejected: {e}"));
                }
                None => self.message = Some("AI could not find a move".to_string()),
            }
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Flash strength of the last played cell, fading from 1 to 0
    pub fn flash(&self) -> Option<(Pos, f32)> {
        let (pos, at) = self.flash?;
        let t = at.elapsed().as_secs_f32() / theme::FLASH_SECONDS;
        (t < 1.0).then(|| (pos, 1.0 - t))
    }

    /// Turn or result line shown above the board
    pub fn status_text(&self) -> String {
        match self.game.status() {
            GameStatus::InProgress => format!("Player {}'s Turn", self.game.current_player()),
            GameStatus::Won(player) => format!("Player {player} Wins!"),
            GameStatus::Draw => "It's a Draw!".to_string(),
        }
    }

    /// Whether the given player is controlled by a human
    pub fn is_human(&self, player: Player) -> bool {
        self.mode == GameMode::Multiplayer || player != AI_PLAYER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wait_for_ai(session: &mut Session) {
        let deadline = Instant::now() + Duration::from_secs(30);
        while session.is_ai_thinking() && Instant::now() < deadline {
            session.check_ai_result();
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_multiplayer_alternates() {
        let mut session = Session::new(BoardSize::Three, GameMode::Multiplayer, false);
        assert_eq!(session.status_text(), "Player X's Turn");
        session.try_play(Pos::new(0, 0)).unwrap();
        assert_eq!(session.status_text(), "Player O's Turn");
        assert!(!session.is_ai_turn());
        session.try_play(Pos::new(1, 1)).unwrap();
        assert_eq!(session.game.history().len(), 2);
    }

    #[test]
    fn test_occupied_click_reports_error() {
        let mut session = Session::new(BoardSize::Three, GameMode::Multiplayer, false);
        session.try_play(Pos::new(0, 0)).unwrap();
        assert!(session.try_play(Pos::new(0, 0)).is_err());
        assert_eq!(session.game.current_player(), Player::O);
    }

    #[test]
    fn test_ai_replies_in_background() {
        let mut session = Session::new(BoardSize::Three, GameMode::VsAi, false);
        session.try_play(Pos::new(0, 0)).unwrap();
        assert!(session.is_ai_turn());
        assert_eq!(session.try_play(Pos::new(2, 2)), Err("Not your turn".to_string()));

        session.start_ai_thinking();
        assert!(session.is_ai_thinking());
        wait_for_ai(&mut session);

        assert_eq!(session.game.last_move(), Some(Pos::new(1, 1)));
        assert_eq!(session.game.current_player(), Player::X);
        assert!(session.last_ai_result.is_some());
    }

    #[test]
    fn test_reset_drops_pending_ai_move() {
        let mut session = Session::new(BoardSize::Three, GameMode::VsAi, false);
        session.try_play(Pos::new(0, 0)).unwrap();
        session.start_ai_thinking();
        session.reset();
        assert!(!session.is_ai_thinking());
        session.check_ai_result();
        assert!(session.game.history().is_empty());
    }

    #[test]
    fn test_win_message_and_size_change() {
        let mut session = Session::new(BoardSize::Three, GameMode::Multiplayer, false);
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            session.try_play(Pos::new(row, col)).unwrap();
        }
        assert!(session.is_over());
        assert_eq!(session.status_text(), "Player X Wins!");
        assert!(session.try_play(Pos::new(2, 2)).is_err());

        session.set_size(BoardSize::Four);
        assert!(!session.is_over());
        assert_eq!(session.game.size(), BoardSize::Four);
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(GameMode::Multiplayer.toggled(), GameMode::VsAi);
        let mut session = Session::new(BoardSize::Three, GameMode::Multiplayer, false);
        session.try_play(Pos::new(0, 0)).unwrap();
        session.set_mode(GameMode::VsAi);
        assert!(session.game.history().is_empty());
        assert!(session.is_human(Player::X));
        assert!(!session.is_human(Player::O));
    }
}
