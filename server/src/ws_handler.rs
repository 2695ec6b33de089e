use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use common::games::tictactoe::{TicTacToeSession, TicTacToeSessionHandle};
use common::id_generator::generate_session_id;
use common::log;

use crate::messages::{ClientMessage, ServerMessage};
use crate::web_server::WebServerState;
use crate::ws_presenter::WsPresenter;

const OUTBOUND_QUEUE_SIZE: usize = 128;

/// One browser tab: one socket, one session.
pub async fn handle_websocket(socket: WebSocket, state: WebServerState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let session_id = generate_session_id();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(OUTBOUND_QUEUE_SIZE);

    let send_session_id = session_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let json = match message.to_json() {
                Ok(json) => json,
                Err(e) => {
                    log!("[ws:{}] {}", send_session_id, e);
                    continue;
                }
            };
            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let presenter = WsPresenter::new(session_id.clone(), tx);
    let (session, handle) =
        TicTacToeSession::create(session_id.clone(), state.session_settings.clone(), presenter);
    let session_task = tokio::spawn(session.run());

    log!("[ws:{}] WebSocket client connected", session_id);

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                if !forward_client_message(&handle, text.as_str()) {
                    break;
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                log!("[ws:{}] WebSocket error: {}", session_id, e);
                break;
            }
        }
    }

    drop(handle);
    if let Err(e) = session_task.await {
        log!("[ws:{}] Session task failed: {}", session_id, e);
    }
    send_task.abort();

    log!("[ws:{}] WebSocket client disconnected", session_id);
}

/// Returns `false` once the session can no longer accept commands.
fn forward_client_message(handle: &TicTacToeSessionHandle, text: &str) -> bool {
    let command = match ClientMessage::parse(text).and_then(ClientMessage::into_command) {
        Ok(command) => command,
        Err(e) => {
            log!("[ws:{}] Ignoring client message: {}", handle.session_id(), e);
            return true;
        }
    };

    match handle.send(command) {
        Ok(()) => true,
        Err(e) => {
            log!("[ws:{}] {}", handle.session_id(), e);
            false
        }
    }
}
