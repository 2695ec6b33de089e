use serde::{Deserialize, Serialize};

use common::games::tictactoe::{Board, GameSnapshot, Mode, PlayerCommand, RoundOutcome};

/// JSON frames sent by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    SelectMode { mode: Mode },
    PlaceMark { index: usize },
    Restart,
}

impl ClientMessage {
    pub fn parse(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Failed to decode client message: {}", e))
    }

    pub fn into_command(self) -> Result<PlayerCommand, String> {
        match self {
            ClientMessage::SelectMode { mode } => Ok(PlayerCommand::SelectMode(mode)),
            ClientMessage::PlaceMark { index } if Board::is_valid_index(index) => {
                Ok(PlayerCommand::PlaceMark(index))
            }
            ClientMessage::PlaceMark { index } => Err(format!("Cell index {} out of range", index)),
            ClientMessage::Restart => Ok(PlayerCommand::Restart),
        }
    }
}

/// JSON frames pushed to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    State(GameSnapshot),
    RoundOver { outcome: RoundOutcome },
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to encode server message: {}", e))
    }
}
