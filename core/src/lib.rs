#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use clock::*;
pub use decay::*;
pub use error::*;
pub use game::*;
pub use host::*;
pub use timer::TimerHandle;
pub use timer::TimerKind;
pub use types::*;

pub(crate) use timer::TimerSlot;

mod board;
mod cell;
mod clock;
mod decay;
mod error;
mod game;
mod host;
mod timer;
mod types;

pub const GRID_SIZE: Coord2 = (4, 4);
pub const HOT_TARGET: CellCount = 3;
pub const MAX_POINTS: Points = 10;
pub const DECAY_TICK_MS: u32 = 100;
pub const ROUND_SECS: Seconds = 10;
pub const CLOCK_TICK_MS: u32 = 1000;
pub const COUNTDOWN_FROM: u8 = 3;
pub const COUNTDOWN_TICK_MS: u32 = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: Coord2,
    pub hot_target: CellCount,
    pub max_points: Points,
    pub decay_tick_ms: u32,
    pub round_secs: Seconds,
    pub clock_tick_ms: u32,
    pub countdown_from: u8,
    pub countdown_tick_ms: u32,
}

impl GameConfig {
    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validate(&self) -> Result<()> {
        let reason = if self.hot_target == 0 {
            "hot cell target must be positive"
        } else if self.total_cells() < self.hot_target {
            "board is smaller than the hot cell target"
        } else if self.max_points == 0 {
            "max points must be positive"
        } else if self.round_secs == 0 {
            "round length must be positive"
        } else if self.countdown_from == 0 {
            "countdown must start above zero"
        } else if self.decay_tick_ms == 0 || self.clock_tick_ms == 0 || self.countdown_tick_ms == 0
        {
            "tick periods must be positive"
        } else {
            return Ok(());
        };

        Err(GameError::InvalidConfig(reason))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: GRID_SIZE,
            hot_target: HOT_TARGET,
            max_points: MAX_POINTS,
            decay_tick_ms: DECAY_TICK_MS,
            round_secs: ROUND_SECS,
            clock_tick_ms: CLOCK_TICK_MS,
            countdown_from: COUNTDOWN_FROM,
            countdown_tick_ms: COUNTDOWN_TICK_MS,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    NewBest,
    TimeUp,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    Ignored,
    Scored(Points),
}

impl TapOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Ignored => false,
            Self::Scored(_) => true,
        }
    }
}
