use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use super::board::Board;
use super::bot_controller::calculate_random_move;
use super::types::{Mark, Mode, RoundOutcome, SessionPhase};
use super::win_detector::check_win_with_line;

/// Everything a presenter needs to redraw the board and indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub current_player: Mark,
    pub active: bool,
    pub mode: Option<Mode>,
    pub phase: SessionPhase,
    pub outcome: RoundOutcome,
}

/// Authoritative state of one tic-tac-toe session.
///
/// A new engine has no mode and ignores moves until `select_mode` is called.
/// Invalid moves are silent no-ops and report `None`.
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    current_player: Mark,
    active: bool,
    mode: Option<Mode>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Mark::Circle,
            active: false,
            mode: None,
        }
    }

    pub fn with_mode(mode: Mode) -> Self {
        let mut engine = Self::new();
        engine.select_mode(mode);
        engine
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn select_mode(&mut self, mode: Mode) {
        self.mode = Some(mode);
        self.restart();
    }

    pub fn restart(&mut self) {
        self.board.clear();
        self.current_player = Mark::Circle;
        self.active = true;
    }

    /// Places the current player's mark on `index`.
    ///
    /// Returns `None` without touching any state when the round is not active
    /// or the cell is taken. Panics if `index` is not a board cell.
    pub fn place_mark(&mut self, index: usize) -> Option<RoundOutcome> {
        assert!(Board::is_valid_index(index), "cell index {} out of range", index);

        if !self.active || !self.board.is_empty_at(index) {
            return None;
        }

        self.board.set(index, self.current_player);

        if let Some(line) = check_win_with_line(&self.board) {
            self.active = false;
            return Some(RoundOutcome::from(line));
        }

        if self.board.is_full() {
            self.active = false;
            return Some(RoundOutcome::Drawn);
        }

        self.current_player = self.current_player.opponent();
        Some(RoundOutcome::InProgress)
    }

    pub fn is_bot_turn(&self) -> bool {
        self.active
            && self
                .mode
                .and_then(Mode::bot_mark)
                .is_some_and(|bot_mark| bot_mark == self.current_player)
    }

    /// Plays a uniformly random empty cell for the bot.
    ///
    /// A no-op unless it is currently the bot's turn, so a late timer cannot
    /// place a mark for the wrong side.
    pub fn compute_bot_move(&mut self, rng: &mut SessionRng) -> Option<RoundOutcome> {
        if !self.is_bot_turn() {
            return None;
        }
        let index = calculate_random_move(&self.board, rng)?;
        self.place_mark(index)
    }

    pub fn outcome(&self) -> RoundOutcome {
        if let Some(line) = check_win_with_line(&self.board) {
            return RoundOutcome::from(line);
        }
        if self.board.is_full() {
            return RoundOutcome::Drawn;
        }
        RoundOutcome::InProgress
    }

    pub fn phase(&self) -> SessionPhase {
        if self.mode.is_none() {
            SessionPhase::AwaitingMode
        } else if self.outcome().is_finished() {
            SessionPhase::RoundOver
        } else {
            SessionPhase::Playing
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            current_player: self.current_player,
            active: self.active,
            mode: self.mode,
            phase: self.phase(),
            outcome: self.outcome(),
        }
    }
}
