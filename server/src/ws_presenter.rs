use tokio::sync::mpsc;

use common::games::tictactoe::{GamePresenter, GameSnapshot, RoundOutcome};
use common::{SessionId, log};

use crate::messages::ServerMessage;

/// Forwards session output to the websocket send task of one connection.
#[derive(Clone)]
pub struct WsPresenter {
    session_id: SessionId,
    tx: mpsc::Sender<ServerMessage>,
}

impl WsPresenter {
    pub fn new(session_id: SessionId, tx: mpsc::Sender<ServerMessage>) -> Self {
        Self { session_id, tx }
    }

    async fn send(&self, message: ServerMessage) {
        if let Err(e) = self.tx.send(message).await {
            log!("[ws:{}] Failed to send message: {}", self.session_id, e);
        }
    }
}

impl GamePresenter for WsPresenter {
    async fn present_state(&self, snapshot: GameSnapshot) {
        self.send(ServerMessage::State(snapshot)).await;
    }

    async fn present_round_over(&self, outcome: RoundOutcome) {
        self.send(ServerMessage::RoundOver { outcome }).await;
    }
}
