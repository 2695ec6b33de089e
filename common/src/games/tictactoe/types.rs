use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Circle,
    Cross,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::Circle => Mark::Cross,
            Mark::Cross => Mark::Circle,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Circle,
    Cross,
}

impl Cell {
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Circle => Some(Mark::Circle),
            Cell::Cross => Some(Mark::Cross),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::Circle => Cell::Circle,
            Mark::Cross => Cell::Cross,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    TwoPlayer,
    /// The bot always plays Cross.
    SinglePlayer,
}

impl Mode {
    pub fn bot_mark(self) -> Option<Mark> {
        match self {
            Mode::TwoPlayer => None,
            Mode::SinglePlayer => Some(Mark::Cross),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub cells: [usize; 3],
}

impl WinningLine {
    pub fn new(mark: Mark, cells: [usize; 3]) -> Self {
        Self { mark, cells }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RoundOutcome {
    InProgress,
    Won { winner: Mark, line: [usize; 3] },
    Drawn,
}

impl RoundOutcome {
    pub fn is_finished(&self) -> bool {
        !matches!(self, RoundOutcome::InProgress)
    }
}

impl From<WinningLine> for RoundOutcome {
    fn from(line: WinningLine) -> Self {
        RoundOutcome::Won {
            winner: line.mark,
            line: line.cells,
        }
    }
}

/// Where a session stands from the presenter's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    AwaitingMode,
    Playing,
    RoundOver,
}
