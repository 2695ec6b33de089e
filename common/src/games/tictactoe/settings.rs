use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::Mode;

const MAX_DELAY_MS: u64 = 60_000;

/// The `game` section of the server config file.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct TicTacToeGameConfig {
    pub bot_move_delay_ms: u64,
    pub restart_delay_ms: u64,
    /// Fixed bot seed; a fresh random seed per session when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Skips mode selection for new sessions when set.
    #[serde(default)]
    pub default_mode: Option<Mode>,
}

impl Validate for TicTacToeGameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bot_move_delay_ms > MAX_DELAY_MS {
            return Err(format!(
                "bot_move_delay_ms must not exceed {} (got {})",
                MAX_DELAY_MS, self.bot_move_delay_ms
            ));
        }
        if self.restart_delay_ms > MAX_DELAY_MS {
            return Err(format!(
                "restart_delay_ms must not exceed {} (got {})",
                MAX_DELAY_MS, self.restart_delay_ms
            ));
        }
        Ok(())
    }
}

impl Default for TicTacToeGameConfig {
    fn default() -> Self {
        Self {
            bot_move_delay_ms: 500,
            restart_delay_ms: 3000,
            seed: None,
            default_mode: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeSessionSettings {
    pub bot_move_delay: Duration,
    pub restart_delay: Duration,
    pub seed: Option<u64>,
    pub default_mode: Option<Mode>,
}

impl Default for TicTacToeSessionSettings {
    fn default() -> Self {
        Self::from(&TicTacToeGameConfig::default())
    }
}

impl From<&TicTacToeGameConfig> for TicTacToeSessionSettings {
    fn from(config: &TicTacToeGameConfig) -> Self {
        Self {
            bot_move_delay: Duration::from_millis(config.bot_move_delay_ms),
            restart_delay: Duration::from_millis(config.restart_delay_ms),
            seed: config.seed,
            default_mode: config.default_mode,
        }
    }
}
