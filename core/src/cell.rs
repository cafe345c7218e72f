use serde::{Deserialize, Serialize};

/// Lifecycle of a single board cell within a round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Idle,
    Hot,
    Consumed,
}

impl CellState {
    pub const fn is_hot(self) -> bool {
        matches!(self, Self::Hot)
    }

    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Idle
    }
}
