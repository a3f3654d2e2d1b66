//! Checkers game resources - Per-game state owned by the session
//!
//! # Resource Categories
//!
//! ## Turn Management
//! - [`CurrentTurn`] - Which side is active and the turn number
//! - [`TurnState`] - Per-side turn state machine (Idle, Selected, chains)
//!
//! ## Player Interaction
//! - [`ForcedCaptureSet`] - Pieces that must capture this turn
//!
//! ## Game History
//! - [`MoveHistory`] - Every executed step of the current game
//!
//! ## Game Status
//! - [`GameOverState`] - Winner and reason once the game is decided

pub mod game_over;
pub mod history;
pub mod selection;
pub mod turn;

pub use game_over::{GameOverReason, GameOverState};
pub use history::{MoveHistory, MoveRecord};
pub use selection::{ForcedCapture, ForcedCaptureSet};
pub use turn::{CurrentTurn, TurnState};
