use std::net::SocketAddr;

use common::config::Validate;
use common::games::tictactoe::TicTacToeGameConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE_NAME: &str = "tictactoe_server_config.yaml";

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub web: WebConfig,
    pub game: TicTacToeGameConfig,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct WebConfig {
    pub bind_address: String,
    /// Directory served under `/ui`. The browser assets are not part of this
    /// workspace and are placed here at deploy time.
    pub static_files_path: String,
}

impl WebConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.bind_address
            .parse()
            .map_err(|e| format!("Invalid bind_address '{}': {}", self.bind_address, e))
    }
}

impl Validate for WebConfig {
    fn validate(&self) -> Result<(), String> {
        self.socket_addr()?;
        if self.static_files_path.trim().is_empty() {
            return Err("static_files_path must not be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.web.validate()?;
        self.game.validate()?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            web: WebConfig {
                bind_address: "0.0.0.0:5000".to_string(),
                static_files_path: "static".to_string(),
            },
            game: TicTacToeGameConfig::default(),
        }
    }
}
