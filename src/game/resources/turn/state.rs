//! Turn state machine for the active side
//!
//! Tracks where the active player is within its turn: nothing selected, a
//! piece selected, or locked into a capture chain with one piece.

use tracing::error;

use crate::game::error::{GameError, GameResult};
use crate::game::types::PieceId;

/// Fine-grained turn flow state
///
/// ```text
/// Idle ──select──▶ Selected ──target──▶ Idle
///                   │  ▲ re-select        ├──▶ ContinuingJump ──jump──▶ … ──▶ Idle
///                   └──┘                  └──▶ ContinuingFly ──fly-capture──▶ … ──▶ Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TurnState {
    /// Waiting for a piece to be selected
    #[default]
    Idle,

    /// A piece is selected; it may be re-selected or given a target
    Selected(PieceId),

    /// The piece captured with a jump and has another jump available
    ContinuingJump(PieceId),

    /// The king fly-captured and has another fly-capture available
    ContinuingFly(PieceId),
}

impl TurnState {
    /// Selection is allowed only before a chain has started
    pub fn accepts_selection(&self) -> bool {
        matches!(self, TurnState::Idle | TurnState::Selected(_))
    }

    /// Piece currently driving the turn, if any
    pub fn active_piece(&self) -> Option<PieceId> {
        match *self {
            TurnState::Idle => None,
            TurnState::Selected(id) | TurnState::ContinuingJump(id) | TurnState::ContinuingFly(id) => {
                Some(id)
            }
        }
    }

    /// Transition to the next turn state
    ///
    /// # Errors
    ///
    /// Returns `IllegalAction` and leaves the state untouched when the
    /// transition is not part of the machine, e.g. leaving a chain for a
    /// different piece or entering a chain straight from `Idle`.
    pub fn transition_to(&mut self, next: TurnState) -> GameResult<()> {
        let valid = match (*self, next) {
            (_, TurnState::Idle) => true,
            (TurnState::Idle, TurnState::Selected(_)) => true,
            (TurnState::Selected(_), TurnState::Selected(_)) => true,
            (TurnState::Selected(a), TurnState::ContinuingJump(b))
            | (TurnState::Selected(a), TurnState::ContinuingFly(b))
            | (TurnState::ContinuingJump(a), TurnState::ContinuingJump(b))
            | (TurnState::ContinuingFly(a), TurnState::ContinuingFly(b)) => a == b,
            _ => false,
        };

        if !valid {
            error!(
                "[TURN_STATE] Invalid turn state transition: {:?} -> {:?}",
                self, next
            );
            return Err(GameError::illegal(format!(
                "invalid turn state transition {self:?} -> {next:?}"
            )));
        }

        *self = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_state_accepts_selection() {
        assert!(TurnState::Idle.accepts_selection());
        assert!(TurnState::Selected(PieceId(1)).accepts_selection());
        assert!(!TurnState::ContinuingJump(PieceId(1)).accepts_selection());
        assert!(!TurnState::ContinuingFly(PieceId(1)).accepts_selection());
    }

    #[test]
    fn test_valid_transitions() {
        let mut state = TurnState::default();

        state.transition_to(TurnState::Selected(PieceId(3))).unwrap();
        state.transition_to(TurnState::Selected(PieceId(4))).unwrap();
        state.transition_to(TurnState::ContinuingJump(PieceId(4))).unwrap();
        state.transition_to(TurnState::ContinuingJump(PieceId(4))).unwrap();
        state.transition_to(TurnState::Idle).unwrap();
        assert_eq!(state, TurnState::Idle);
    }

    #[test]
    fn test_invalid_transition_leaves_state() {
        let mut state = TurnState::Idle;
        assert!(state.transition_to(TurnState::ContinuingFly(PieceId(1))).is_err());
        assert_eq!(state, TurnState::Idle);

        let mut chain = TurnState::ContinuingJump(PieceId(2));
        assert!(chain.transition_to(TurnState::Selected(PieceId(5))).is_err());
        assert!(chain.transition_to(TurnState::ContinuingJump(PieceId(5))).is_err());
        assert_eq!(chain, TurnState::ContinuingJump(PieceId(2)));
    }
}
