//! Player - a side's pieces, its turn state machine and the selection protocol
//!
//! Both the interactive and the computer-controlled side run through the same
//! [`Player`]: the computer only differs in where its `select` / `target`
//! inputs come from, which is recorded as the player's [`MoveSource`].
//!
//! # Selection Protocol
//!
//! - `select(square)` is accepted from `Idle` or `Selected`, for an own piece,
//!   and, when the forced-capture set is non-empty, only for its members.
//! - `target(square)` from `Selected` resolves the square in priority order
//!   fly-capture, jump, fly, move; only captures while a capture is forced.
//! - In a chain only the chained piece's next capture of the same family is
//!   accepted.
//!
//! Every rejection returns `IllegalAction` and leaves the player untouched.

mod execution;

pub use execution::ExecutionContext;

use tracing::debug;

use crate::game::ai::HeuristicSource;
use crate::game::error::{GameError, GameResult};
use crate::game::resources::{ForcedCaptureSet, TurnState};
use crate::game::rules::{ActionKind, Board};
use crate::game::types::{PieceId, Side, Square};

/// Where a side's inputs come from
#[derive(Debug, Default)]
pub enum MoveSource {
    /// Driven by external `select` / `target` events
    #[default]
    Interactive,
    /// Self-driving enumerate-score-execute loop
    Heuristic(HeuristicSource),
}

impl MoveSource {
    pub fn is_heuristic(&self) -> bool {
        matches!(self, MoveSource::Heuristic(_))
    }
}

/// Result of an executed action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnProgress {
    /// A capture chain continues with the given state
    Continuing(TurnState),
    /// The turn is resolved and control passes to the opponent
    Complete,
}

#[derive(Debug)]
pub struct Player {
    side: Side,
    /// Ownership set; the most recently selected piece is at the head
    pieces: Vec<PieceId>,
    selected: Option<PieceId>,
    state: TurnState,
    forced: ForcedCaptureSet,
    source: MoveSource,
}

impl Player {
    /// Take ownership of every piece of `side` currently on `board`
    pub fn new(side: Side, board: &Board, source: MoveSource) -> Self {
        Self {
            side,
            pieces: board.pieces(side).map(|piece| piece.id).collect(),
            selected: None,
            state: TurnState::Idle,
            forced: ForcedCaptureSet::default(),
            source,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn pieces(&self) -> &[PieceId] {
        &self.pieces
    }

    pub fn selected(&self) -> Option<PieceId> {
        self.selected
    }

    pub fn forced_captures(&self) -> &ForcedCaptureSet {
        &self.forced
    }

    pub fn source_mut(&mut self) -> &mut MoveSource {
        &mut self.source
    }

    pub fn is_computer(&self) -> bool {
        self.source.is_heuristic()
    }

    pub fn owns(&self, id: PieceId) -> bool {
        self.pieces.contains(&id)
    }

    /// Drop a captured piece from the ownership set
    pub fn release(&mut self, id: PieceId) {
        self.pieces.retain(|owned| *owned != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Prepare for a new turn: recompute the forced-capture set
    pub fn begin_turn(&mut self, board: &Board) {
        self.state = TurnState::Idle;
        self.selected = None;
        self.forced = ForcedCaptureSet::compute(board, self.side);
        if !self.forced.is_empty() {
            debug!(
                "[PLAYER] {} must capture with {:?}",
                self.side,
                self.forced.squares()
            );
        }
    }

    /// Select the own piece standing on `square`
    pub fn select(&mut self, board: &Board, square: Square) -> GameResult<PieceId> {
        if !self.state.accepts_selection() {
            return Err(GameError::illegal("a capture chain is in progress"));
        }
        let piece = board
            .occupant(square)
            .ok_or_else(|| GameError::illegal(format!("no piece on {square}")))?;
        if piece.side != self.side || !self.owns(piece.id) {
            return Err(GameError::illegal(format!(
                "piece on {square} does not belong to side {}",
                self.side
            )));
        }
        if !self.forced.is_empty() && !self.forced.contains(piece.id) {
            return Err(GameError::illegal(format!(
                "a capture is mandatory; {square} has none"
            )));
        }

        let id = piece.id;
        self.state.transition_to(TurnState::Selected(id))?;

        if let Some(previous) = self.selected.replace(id) {
            debug!("[PLAYER] {} deselected {}", self.side, previous);
        }
        if let Some(pos) = self.pieces.iter().position(|owned| *owned == id) {
            let id = self.pieces.remove(pos);
            self.pieces.insert(0, id);
        }

        debug!("[PLAYER] {} selected {} on {}", self.side, id, square);
        Ok(id)
    }

    /// Commit the active piece to `square`
    pub fn target(
        &mut self,
        board: &mut Board,
        opponent: &mut Player,
        square: Square,
        ctx: &mut ExecutionContext<'_>,
    ) -> GameResult<TurnProgress> {
        let id = self
            .state
            .active_piece()
            .ok_or_else(|| GameError::illegal("no piece selected"))?;
        let allowed: &[ActionKind] = match self.state {
            TurnState::ContinuingJump(_) => &[ActionKind::Jump],
            TurnState::ContinuingFly(_) => &[ActionKind::FlyCapture],
            _ if self.forced.is_empty() => &ActionKind::PRIORITY,
            _ => &ActionKind::CAPTURES,
        };

        let piece = *board.find(id).ok_or(GameError::PieceNotFound { id })?;
        let action = piece.action_to(board, square, allowed).ok_or_else(|| {
            GameError::illegal(format!("{} on {} cannot reach {}", id, piece.position, square))
        })?;

        self.execute(board, opponent, action, ctx)
    }

    /// Reset at the end of a fully resolved turn
    pub fn action_complete(&mut self) {
        self.forced.clear();
        self.selected = None;
        self.state = TurnState::Idle;
    }
}
