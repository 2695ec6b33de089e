use std::time::Duration;

use tokio::sync::mpsc;

use crate::games::SessionRng;
use crate::{SessionId, log};
use super::board::Board;
use super::game_engine::GameEngine;
use super::presenter::GamePresenter;
use super::settings::TicTacToeSessionSettings;
use super::types::{Mode, RoundOutcome};

/// Input a presenter forwards on behalf of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    SelectMode(Mode),
    PlaceMark(usize),
    Restart,
}

#[derive(Debug)]
enum SessionCommand {
    Player(PlayerCommand),
    BotMove { round: u64 },
    AutoRestart { round: u64 },
}

#[derive(Debug, Clone)]
pub struct TicTacToeSessionHandle {
    session_id: SessionId,
    command_tx: mpsc::UnboundedSender<SessionCommand>,
}

impl TicTacToeSessionHandle {
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn send(&self, command: PlayerCommand) -> Result<(), String> {
        self.command_tx
            .send(SessionCommand::Player(command))
            .map_err(|_| format!("Session {} is closed", self.session_id))
    }
}

/// Owns one `GameEngine` and is its only writer.
///
/// Commands are applied one at a time in arrival order. Bot moves and
/// auto-restarts are delayed commands sent back into the same queue; they are
/// never cancelled and are dropped on arrival when their round is over.
pub struct TicTacToeSession<P: GamePresenter> {
    session_id: SessionId,
    engine: GameEngine,
    settings: TicTacToeSessionSettings,
    rng: SessionRng,
    presenter: P,
    round: u64,
    timer_tx: mpsc::WeakUnboundedSender<SessionCommand>,
    command_rx: mpsc::UnboundedReceiver<SessionCommand>,
}

impl<P: GamePresenter> TicTacToeSession<P> {
    pub fn create(
        session_id: SessionId,
        settings: TicTacToeSessionSettings,
        presenter: P,
    ) -> (Self, TicTacToeSessionHandle) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let rng = match settings.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };

        let mut engine = GameEngine::new();
        if let Some(mode) = settings.default_mode {
            engine.select_mode(mode);
        }

        let session = Self {
            session_id: session_id.clone(),
            engine,
            settings,
            rng,
            presenter,
            round: 0,
            timer_tx: command_tx.downgrade(),
            command_rx,
        };

        let handle = TicTacToeSessionHandle {
            session_id,
            command_tx,
        };

        (session, handle)
    }

    /// Runs until every handle is dropped.
    pub async fn run(mut self) {
        log!("[session:{}] Started with bot seed {}", self.session_id, self.rng.seed());

        self.present_state().await;

        while let Some(command) = self.command_rx.recv().await {
            self.handle_command(command).await;
        }

        log!("[session:{}] Closed", self.session_id);
    }

    async fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Player(PlayerCommand::SelectMode(mode)) => {
                log!("[session:{}] Mode selected: {:?}", self.session_id, mode);
                self.engine.select_mode(mode);
                self.start_new_round().await;
            }
            SessionCommand::Player(PlayerCommand::Restart) => {
                if self.engine.mode().is_none() {
                    log!("[session:{}] Ignoring restart before mode selection", self.session_id);
                    return;
                }
                self.engine.restart();
                self.start_new_round().await;
            }
            SessionCommand::Player(PlayerCommand::PlaceMark(index)) => {
                if !Board::is_valid_index(index) {
                    log!("[session:{}] Ignoring out-of-range cell {}", self.session_id, index);
                    return;
                }
                if self.engine.is_bot_turn() {
                    log!("[session:{}] Ignoring cell {} during bot turn", self.session_id, index);
                    return;
                }
                let outcome = self.engine.place_mark(index);
                self.after_move(outcome).await;
            }
            SessionCommand::BotMove { round } => {
                if round != self.round {
                    return;
                }
                let outcome = self.engine.compute_bot_move(&mut self.rng);
                self.after_move(outcome).await;
            }
            SessionCommand::AutoRestart { round } => {
                if round != self.round {
                    return;
                }
                self.engine.restart();
                self.start_new_round().await;
            }
        }
    }

    async fn start_new_round(&mut self) {
        self.round += 1;
        self.present_state().await;
    }

    async fn after_move(&mut self, outcome: Option<RoundOutcome>) {
        let Some(outcome) = outcome else {
            return;
        };

        self.present_state().await;

        match outcome {
            RoundOutcome::InProgress => {
                if self.engine.is_bot_turn() {
                    self.schedule(
                        SessionCommand::BotMove { round: self.round },
                        self.settings.bot_move_delay,
                    );
                }
            }
            RoundOutcome::Won { winner, .. } => {
                log!("[session:{}] Round {} won by {:?}", self.session_id, self.round, winner);
                self.finish_round(outcome).await;
            }
            RoundOutcome::Drawn => {
                log!("[session:{}] Round {} drawn", self.session_id, self.round);
                self.finish_round(outcome).await;
            }
        }
    }

    async fn finish_round(&mut self, outcome: RoundOutcome) {
        self.presenter.present_round_over(outcome).await;
        self.schedule(
            SessionCommand::AutoRestart { round: self.round },
            self.settings.restart_delay,
        );
    }

    /// Timers keep only a weak sender so a pending delay never keeps a
    /// closed session alive.
    fn schedule(&self, command: SessionCommand, delay: Duration) {
        let timer_tx = self.timer_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(command_tx) = timer_tx.upgrade() {
                let _ = command_tx.send(command);
            }
        });
    }

    async fn present_state(&self) {
        self.presenter.present_state(self.engine.snapshot()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::game_engine::GameSnapshot;
    use crate::games::tictactoe::types::{Cell, Mark, SessionPhase};
    use tokio::time::{Instant, timeout};

    #[derive(Debug)]
    enum PresenterEvent {
        State(GameSnapshot),
        RoundOver(RoundOutcome),
    }

    #[derive(Clone)]
    struct ChannelPresenter {
        events: mpsc::UnboundedSender<PresenterEvent>,
    }

    impl GamePresenter for ChannelPresenter {
        async fn present_state(&self, snapshot: GameSnapshot) {
            let _ = self.events.send(PresenterEvent::State(snapshot));
        }

        async fn present_round_over(&self, outcome: RoundOutcome) {
            let _ = self.events.send(PresenterEvent::RoundOver(outcome));
        }
    }

    fn test_settings() -> TicTacToeSessionSettings {
        TicTacToeSessionSettings {
            bot_move_delay: Duration::from_millis(500),
            restart_delay: Duration::from_millis(3000),
            seed: Some(17),
            default_mode: None,
        }
    }

    fn start(
        settings: TicTacToeSessionSettings,
    ) -> (
        TicTacToeSessionHandle,
        mpsc::UnboundedReceiver<PresenterEvent>,
        tokio::task::JoinHandle<()>,
    ) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let (session, handle) = TicTacToeSession::create(
            SessionId::new("test".to_string()),
            settings,
            ChannelPresenter { events },
        );
        let task = tokio::spawn(session.run());
        (handle, events_rx, task)
    }

    async fn next_state(events: &mut mpsc::UnboundedReceiver<PresenterEvent>) -> GameSnapshot {
        match events.recv().await {
            Some(PresenterEvent::State(snapshot)) => snapshot,
            other => panic!("expected state, got {:?}", other),
        }
    }

    async fn next_round_over(events: &mut mpsc::UnboundedReceiver<PresenterEvent>) -> RoundOutcome {
        match events.recv().await {
            Some(PresenterEvent::RoundOver(outcome)) => outcome,
            other => panic!("expected round over, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_starts_awaiting_mode() {
        let (handle, mut events, _task) = start(test_settings());

        let initial = next_state(&mut events).await;
        assert_eq!(initial.phase, SessionPhase::AwaitingMode);
        assert!(!initial.active);

        handle.send(PlayerCommand::PlaceMark(0)).unwrap();
        handle.send(PlayerCommand::SelectMode(Mode::TwoPlayer)).unwrap();

        let playing = next_state(&mut events).await;
        assert_eq!(playing.phase, SessionPhase::Playing);
        assert_eq!(playing.board, Board::new());
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_mode_skips_selection() {
        let settings = TicTacToeSessionSettings {
            default_mode: Some(Mode::SinglePlayer),
            ..test_settings()
        };
        let (_handle, mut events, _task) = start(settings);

        let initial = next_state(&mut events).await;
        assert_eq!(initial.mode, Some(Mode::SinglePlayer));
        assert_eq!(initial.phase, SessionPhase::Playing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bot_answers_after_delay() {
        let (handle, mut events, _task) = start(test_settings());
        next_state(&mut events).await;

        handle.send(PlayerCommand::SelectMode(Mode::SinglePlayer)).unwrap();
        next_state(&mut events).await;

        handle.send(PlayerCommand::PlaceMark(4)).unwrap();
        let after_human = next_state(&mut events).await;
        assert_eq!(after_human.board.get(4), Cell::Circle);
        assert_eq!(after_human.current_player, Mark::Cross);

        let started = Instant::now();
        let after_bot = next_state(&mut events).await;

        assert!(started.elapsed() >= Duration::from_millis(500));
        assert_eq!(after_bot.board.count(Mark::Cross), 1);
        assert_eq!(after_bot.board.count(Mark::Circle), 1);
        assert_eq!(after_bot.current_player, Mark::Circle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clicks_during_bot_turn_are_ignored() {
        let (handle, mut events, _task) = start(test_settings());
        next_state(&mut events).await;

        handle.send(PlayerCommand::SelectMode(Mode::SinglePlayer)).unwrap();
        next_state(&mut events).await;

        handle.send(PlayerCommand::PlaceMark(0)).unwrap();
        handle.send(PlayerCommand::PlaceMark(1)).unwrap();
        next_state(&mut events).await;

        let after_bot = next_state(&mut events).await;
        assert_eq!(after_bot.board.get(0), Cell::Circle);
        assert_eq!(after_bot.board.count(Mark::Circle), 1);
        assert_eq!(after_bot.board.count(Mark::Cross), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_won_round_is_announced_and_auto_restarts() {
        let (handle, mut events, _task) = start(test_settings());
        next_state(&mut events).await;

        handle.send(PlayerCommand::SelectMode(Mode::TwoPlayer)).unwrap();
        next_state(&mut events).await;

        for index in [0, 3, 1, 4] {
            handle.send(PlayerCommand::PlaceMark(index)).unwrap();
            next_state(&mut events).await;
        }
        handle.send(PlayerCommand::PlaceMark(2)).unwrap();

        let final_state = next_state(&mut events).await;
        assert_eq!(final_state.phase, SessionPhase::RoundOver);
        assert!(!final_state.active);

        let outcome = next_round_over(&mut events).await;
        assert_eq!(outcome, RoundOutcome::Won { winner: Mark::Circle, line: [0, 1, 2] });

        let started = Instant::now();
        let fresh = next_state(&mut events).await;

        assert!(started.elapsed() >= Duration::from_millis(3000));
        assert_eq!(fresh.board, Board::new());
        assert_eq!(fresh.current_player, Mark::Circle);
        assert_eq!(fresh.mode, Some(Mode::TwoPlayer));
        assert!(fresh.active);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_restart_drops_stale_auto_restart() {
        let (handle, mut events, _task) = start(test_settings());
        next_state(&mut events).await;

        handle.send(PlayerCommand::SelectMode(Mode::TwoPlayer)).unwrap();
        next_state(&mut events).await;

        for index in [0, 1, 2, 3, 5, 4, 6, 8, 7] {
            handle.send(PlayerCommand::PlaceMark(index)).unwrap();
            next_state(&mut events).await;
        }
        assert_eq!(next_round_over(&mut events).await, RoundOutcome::Drawn);

        handle.send(PlayerCommand::Restart).unwrap();
        let restarted = next_state(&mut events).await;
        assert_eq!(restarted.board, Board::new());

        // The auto-restart timer of the drawn round must not reset the new one.
        handle.send(PlayerCommand::PlaceMark(4)).unwrap();
        let moved = next_state(&mut events).await;
        assert_eq!(moved.board.get(4), Cell::Circle);

        let stale = timeout(Duration::from_secs(10), events.recv()).await;
        assert!(stale.is_err(), "unexpected event {:?}", stale);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_bot_timer_is_dropped() {
        let (handle, mut events, _task) = start(test_settings());
        next_state(&mut events).await;

        handle.send(PlayerCommand::SelectMode(Mode::SinglePlayer)).unwrap();
        next_state(&mut events).await;

        handle.send(PlayerCommand::PlaceMark(0)).unwrap();
        handle.send(PlayerCommand::Restart).unwrap();
        next_state(&mut events).await;
        let restarted = next_state(&mut events).await;
        assert_eq!(restarted.board, Board::new());

        let stale = timeout(Duration::from_secs(10), events.recv()).await;
        assert!(stale.is_err(), "unexpected event {:?}", stale);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_before_mode_selection_is_ignored() {
        let (handle, mut events, _task) = start(test_settings());
        next_state(&mut events).await;

        handle.send(PlayerCommand::Restart).unwrap();
        handle.send(PlayerCommand::PlaceMark(4)).unwrap();
        handle.send(PlayerCommand::SelectMode(Mode::TwoPlayer)).unwrap();

        let playing = next_state(&mut events).await;
        assert_eq!(playing.phase, SessionPhase::Playing);
        assert_eq!(playing.mode, Some(Mode::TwoPlayer));
        assert_eq!(playing.board.get(4), Cell::Empty);
        assert_eq!(playing.current_player, Mark::Circle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_range_cell_is_ignored() {
        let (handle, mut events, _task) = start(test_settings());
        next_state(&mut events).await;

        handle.send(PlayerCommand::SelectMode(Mode::TwoPlayer)).unwrap();
        next_state(&mut events).await;

        handle.send(PlayerCommand::PlaceMark(42)).unwrap();
        handle.send(PlayerCommand::PlaceMark(8)).unwrap();

        let moved = next_state(&mut events).await;
        assert_eq!(moved.board.get(8), Cell::Circle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_ends_when_handles_are_dropped() {
        let (handle, mut events, task) = start(test_settings());
        next_state(&mut events).await;

        drop(handle);

        timeout(Duration::from_secs(1), task).await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_timer_does_not_keep_session_alive() {
        let (handle, mut events, task) = start(test_settings());
        next_state(&mut events).await;
        handle.send(PlayerCommand::SelectMode(Mode::SinglePlayer)).unwrap();
        next_state(&mut events).await;
        handle.send(PlayerCommand::PlaceMark(4)).unwrap();
        next_state(&mut events).await;

        drop(handle);

        timeout(Duration::from_millis(1), task).await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_session_rejects_commands() {
        let (handle, mut events, task) = start(test_settings());
        next_state(&mut events).await;
        let spare = handle.clone();
        drop(handle);
        task.abort();
        let _ = task.await;

        assert!(spare.send(PlayerCommand::Restart).is_err());
    }
}
