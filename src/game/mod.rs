//! Checkers game logic - rule engine, turn state machine and computer player
//!
//! Pure game logic with no rendering. A presentation layer drives a
//! [`GameSession`] through `select` / `target` inputs and renders the
//! [`GameEvent`]s it receives.
//!
//! # Module Organization
//!
//! - `types` - Squares, sides, diagonal directions, board parity
//! - `rules` - Board occupancy, per-piece legality probes, risk scoring
//! - `resources` - Turn tracking, forced-capture set, history, game over
//! - `player` - Selection protocol and move execution for one side
//! - `ai` - Heuristic move selection and the background turn driver
//! - `events` - Notifications to the presentation layer
//! - `session` - The context object owning all of the above

pub mod ai;
pub mod error;
pub mod events;
pub mod player;
pub mod resources;
pub mod rules;
pub mod session;
pub mod types;

pub use error::{GameError, GameResult};
pub use events::{EventBus, GameEvent};
pub use player::{MoveSource, Player, TurnProgress};
pub use session::GameSession;
pub use types::{Direction, Parity, PieceId, Side, Square};
