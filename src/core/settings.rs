//! Engine settings
//!
//! Everything that shapes a new game: board geometry, who moves first, which
//! sides the computer plays and how it paces and orders its play. Loaded from
//! JSON by [`settings_persistence`](crate::core::settings_persistence); any
//! field missing from the file takes its default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{CoreError, CoreResult};
use crate::game::ai::ComputerSide;
use crate::game::rules::DEFAULT_BOARD_SIZE;
use crate::game::types::{Parity, Side};

/// Smallest board with a row of men per side and two empty rows between
pub const MIN_BOARD_SIZE: u8 = 4;
pub const MAX_BOARD_SIZE: u8 = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Board edge length, even
    pub board_size: u8,

    /// Checkerboard colour that holds pieces
    pub playable_parity: Parity,

    pub first_side: Side,

    /// Sides played by the heuristic
    pub computer_side: ComputerSide,

    /// Pause before each computer sub-step
    pub think_delay_ms: u64,

    /// Shuffle the computer's discovery order for variety
    pub shuffle_scan_order: bool,

    /// Seed for the shuffled discovery order; drawn from the OS when unset
    pub seed: Option<u64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            playable_parity: Parity::Odd,
            first_side: Side::A,
            computer_side: ComputerSide::B,
            think_delay_ms: 1000,
            shuffle_scan_order: false,
            seed: None,
        }
    }
}

impl EngineSettings {
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    /// Store `delay` at millisecond resolution, saturating at `u64::MAX`
    pub fn set_think_delay(&mut self, delay: Duration) {
        self.think_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
    }

    /// Reject settings no game can be set up from
    pub fn validate(&self) -> CoreResult<()> {
        if self.board_size % 2 != 0 {
            return Err(CoreError::InvalidSettings {
                message: format!("board size {} is not even", self.board_size),
            });
        }
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(CoreError::InvalidSettings {
                message: format!(
                    "board size {} outside {}..={}",
                    self.board_size, MIN_BOARD_SIZE, MAX_BOARD_SIZE
                ),
            });
        }
        Ok(())
    }
}
