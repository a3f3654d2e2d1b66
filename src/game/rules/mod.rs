//! Checkers rules module - Pure game logic without turn or session coupling
//!
//! Implements board occupancy, per-piece legality probes and the recapture
//! risk model as pure functions over a [`Board`], which keeps them easy to
//! unit test and lets the computer player reason about scratch copies of the
//! position.
//!
//! # Module Structure
//!
//! - `board_state` - Tile grid, occupancy mutators and geometric queries
//! - `piece_moves` - Move / fly / jump / fly-capture probes per piece
//! - `risk` - Recapture risk of a hypothetical destination

pub mod board_state;
pub mod piece_moves;
pub mod risk;


// Re-export commonly used items
pub use board_state::{Board, FlyCapturePath, JumpTarget, Threat, ThreatKind, Tile, DEFAULT_BOARD_SIZE};
pub use piece_moves::{safest, ActionKind, CandidateAction, Piece};
pub use risk::Risk;
