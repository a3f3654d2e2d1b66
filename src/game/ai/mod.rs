//! Heuristic computer opponent
//!
//! A single-ply player: it enumerates the legal captures (or, without any,
//! the legal non-captures) of every owned piece, scores each destination by
//! its recapture [`Risk`](crate::game::rules::Risk) and plays the best one.
//!
//! # Architecture
//!
//! - [`HeuristicSource`]: per-player scan-order state, stored in the
//!   player's [`MoveSource`](crate::game::player::MoveSource)
//! - [`choose_action`]: the pure decision function
//! - [`AiDriver`]: plays a whole turn on a worker thread against a shared
//!   [`GameSession`](crate::game::session::GameSession)
//!
//! Moves go through the same execution path as interactive input, so
//! crowning still ends a chain and captures still re-probe for continuation.

pub mod resource;
pub mod systems;

pub use resource::{ComputerSide, HeuristicSource};
pub use systems::{choose_action, AIStatistics, AiDriver, AiStep, PendingAITurn, TurnReport};
