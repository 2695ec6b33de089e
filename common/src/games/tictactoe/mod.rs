mod board;
mod bot_controller;
mod game_engine;
mod presenter;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::{Board, CELL_COUNT};
pub use bot_controller::calculate_random_move;
pub use game_engine::{GameEngine, GameSnapshot};
pub use presenter::GamePresenter;
pub use session::{PlayerCommand, TicTacToeSession, TicTacToeSessionHandle};
pub use settings::{TicTacToeGameConfig, TicTacToeSessionSettings};
pub use types::{Cell, Mark, Mode, RoundOutcome, SessionPhase, WinningLine};
pub use win_detector::{WINNING_LINES, check_win, check_win_with_line};
