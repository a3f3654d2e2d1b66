//! Action execution - commits a resolved candidate to the board
//!
//! Order of side effects for one step:
//!
//! 1. the mover leaves its square, the captured piece (if any) is removed
//!    from the board and from the opponent's ownership set
//! 2. the mover lands, `PieceMoved` then `PieceCaptured` are emitted
//! 3. a man on its king row is crowned (`PieceCrowned`) and the chain ends
//! 4. a capture re-probes the mover for another capture of the same family

use tracing::{debug, info};

use super::{Player, TurnProgress};
use crate::game::error::{GameError, GameResult};
use crate::game::events::{EventBus, GameEvent};
use crate::game::resources::{MoveHistory, MoveRecord, TurnState};
use crate::game::rules::{ActionKind, Board, CandidateAction};

/// Session-owned sinks an executed step writes to
pub struct ExecutionContext<'a> {
    pub events: &'a mut EventBus,
    pub history: &'a mut MoveHistory,
    pub turn_number: u32,
}

impl Player {
    /// Apply `action` for this player's piece
    ///
    /// The action must come from one of the piece's probes on the current
    /// board; a stale action fails before anything is mutated.
    pub fn execute(
        &mut self,
        board: &mut Board,
        opponent: &mut Player,
        action: CandidateAction,
        ctx: &mut ExecutionContext<'_>,
    ) -> GameResult<TurnProgress> {
        let piece = board
            .occupant(action.from)
            .copied()
            .ok_or(GameError::EmptySquare { square: action.from })?;
        if piece.id != action.piece || piece.side != self.side {
            return Err(GameError::illegal(format!(
                "{} is not on {}",
                action.piece, action.from
            )));
        }
        if !board.is_free(action.destination) {
            return Err(GameError::SquareOccupied {
                square: action.destination,
            });
        }
        if let Some(square) = action.captured {
            match board.occupant_side(square) {
                Some(side) if side == opponent.side => {}
                _ => {
                    return Err(GameError::illegal(format!(
                        "no opponent piece to capture on {square}"
                    )))
                }
            }
        }

        let mover = board.remove(action.from)?;
        let captured = match action.captured {
            Some(square) => {
                let victim = board.remove(square)?;
                opponent.release(victim.id);
                Some(victim)
            }
            None => None,
        };
        let mut landed = board.place(mover, action.destination)?;

        ctx.events.emit(GameEvent::PieceMoved {
            piece: landed,
            from: action.from,
            to: action.destination,
        });
        if let Some(victim) = captured {
            ctx.events.emit(GameEvent::PieceCaptured { piece: victim });
        }

        let crowned = landed.would_crown(board.size(), action.destination);
        if crowned {
            landed = board.crown(action.destination)?;
            info!("[PLAYER] {} crowned on {}", landed.id, action.destination);
            ctx.events.emit(GameEvent::PieceCrowned { piece: landed });
        }

        ctx.history.add_move(MoveRecord {
            side: self.side,
            piece: landed.id,
            kind: action.kind,
            from: action.from,
            to: action.destination,
            captured,
            crowned,
            turn_number: ctx.turn_number,
        });
        debug!("[PLAYER] {} executed {}", self.side, action);

        if crowned || !action.kind.is_capture() {
            return Ok(self.finish_turn());
        }

        let next = match action.kind {
            ActionKind::Jump if landed.has_jump(board) => TurnState::ContinuingJump(landed.id),
            ActionKind::FlyCapture if landed.has_fly_capture(board) => {
                TurnState::ContinuingFly(landed.id)
            }
            _ => return Ok(self.finish_turn()),
        };

        // Computer turns may execute without a prior selection
        if self.state == TurnState::Idle {
            self.state = TurnState::Selected(landed.id);
        }
        self.state.transition_to(next)?;
        self.selected = Some(landed.id);
        debug!("[PLAYER] {} continues chain: {:?}", self.side, next);
        Ok(TurnProgress::Continuing(next))
    }

    fn finish_turn(&mut self) -> TurnProgress {
        self.action_complete();
        TurnProgress::Complete
    }
}
