use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    Router,
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use common::games::tictactoe::TicTacToeSessionSettings;
use common::log;

use crate::ws_handler::handle_websocket;

#[derive(Clone)]
pub struct WebServerState {
    pub session_settings: TicTacToeSessionSettings,
}

pub fn build_router(state: WebServerState, static_files_path: PathBuf) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws_upgrade_handler))
        .nest_service("/ui", ServeDir::new(&static_files_path))
        .layer(cors)
        .with_state(state)
}

pub async fn run_web_server(
    addr: SocketAddr,
    static_files_path: PathBuf,
    session_settings: TicTacToeSessionSettings,
) -> Result<(), String> {
    if !static_files_path.is_dir() {
        log!("Static directory {} not found, /ui will return 404", static_files_path.display());
    }
    let app = build_router(WebServerState { session_settings }, static_files_path);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind web server address {}: {}", addr, e))?;

    log!("Web server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Web server error: {}", e))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log!("Shutdown signal received"),
        Err(e) => {
            log!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

async fn ws_upgrade_handler(
    ws: WebSocketUpgrade,
    State(state): State<WebServerState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}
