//! Turn management resources
//!
//! Manages turn tracking and the per-side turn state machine.

pub mod current;
pub mod state;

// Re-export all public items
pub use current::CurrentTurn;
pub use state::TurnState;
