//! Turn tracking
//!
//! Single source of truth for which side is active and how many full turns
//! have been resolved.

use crate::game::types::Side;

/// Tracks whose turn it currently is and the current turn number
///
/// The turn number increments each time control returns to the side that
/// moved first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentTurn {
    pub side: Side,
    pub first_side: Side,
    pub turn_number: u32,
}

impl CurrentTurn {
    pub fn new(first_side: Side) -> Self {
        Self {
            side: first_side,
            first_side,
            turn_number: 1,
        }
    }

    /// Hand control to the other side
    pub fn switch(&mut self) {
        self.side = self.side.opponent();
        if self.side == self.first_side {
            self.turn_number += 1;
        }
    }
}

impl Default for CurrentTurn {
    fn default() -> Self {
        CurrentTurn::new(Side::A)
    }
}
