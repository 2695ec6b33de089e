use std::future::Future;

use super::game_engine::GameSnapshot;
use super::types::RoundOutcome;

/// Rendering side of a session. Implementations only display what they are
/// given; they never hold game state of their own.
pub trait GamePresenter: Send + Sync + Clone + 'static {
    fn present_state(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;

    fn present_round_over(&self, outcome: RoundOutcome) -> impl Future<Output = ()> + Send;
}
