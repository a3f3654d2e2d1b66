//! Checkers piece movement rules
//!
//! Contains the per-piece legality probes for the four action kinds:
//!
//! - **Move**: a man's one-step forward diagonal
//! - **Fly**: a king's non-capturing slide along a free ray
//! - **Jump**: a two-step capture over an adjacent opponent
//! - **Fly-capture**: a king's long-range capture of the single opponent on a ray
//!
//! Every probe is a pure function of the piece and the board. The `moves`,
//! `flies`, `jumps` and `fly_captures` enumerations list every legal
//! destination with its [`Risk`]; the `can_*` probes keep the single safest
//! candidate, the first found on equal risk. Scan order is the fixed
//! [`Direction::ALL`] order, nearer squares first within a ray.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::board_state::Board;
use super::risk::{self, Risk};
use crate::game::types::{Direction, PieceId, Side, Square};

/// A piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub side: Side,
    pub position: Square,
    pub is_king: bool,
}

/// The four action families, in the priority order used for targeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    FlyCapture,
    Jump,
    Fly,
    Move,
}

impl ActionKind {
    /// Priority order for resolving a targeted square
    pub const PRIORITY: [ActionKind; 4] = [
        ActionKind::FlyCapture,
        ActionKind::Jump,
        ActionKind::Fly,
        ActionKind::Move,
    ];

    pub const CAPTURES: [ActionKind; 2] = [ActionKind::FlyCapture, ActionKind::Jump];

    pub fn is_capture(self) -> bool {
        matches!(self, ActionKind::FlyCapture | ActionKind::Jump)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionKind::FlyCapture => "fly-capture",
            ActionKind::Jump => "jump",
            ActionKind::Fly => "fly",
            ActionKind::Move => "move",
        };
        f.write_str(label)
    }
}

/// A legal action found while probing, with its recapture risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAction {
    pub kind: ActionKind,
    pub piece: PieceId,
    pub from: Square,
    pub destination: Square,
    /// Square of the opponent piece removed by a capture
    pub captured: Option<Square>,
    pub risk: Risk,
}

impl fmt::Display for CandidateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} -> {} ({})",
            self.kind, self.piece, self.from, self.destination, self.risk
        )
    }
}

/// Lowest-risk candidate, earliest on ties
pub fn safest(candidates: Vec<CandidateAction>) -> Option<CandidateAction> {
    candidates.into_iter().min_by_key(|candidate| candidate.risk)
}

impl Piece {
    /// Uncrowned piece
    pub fn man(id: PieceId, side: Side, position: Square) -> Self {
        Piece {
            id,
            side,
            position,
            is_king: false,
        }
    }

    /// Crowned piece
    pub fn king(id: PieceId, side: Side, position: Square) -> Self {
        Piece {
            is_king: true,
            ..Piece::man(id, side, position)
        }
    }

    /// Single-character rendering: side letter, upper case for kings
    pub fn symbol(&self) -> char {
        let c = match self.side {
            Side::A => 'a',
            Side::B => 'b',
        };
        if self.is_king {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    pub fn directions(&self) -> impl Iterator<Item = Direction> {
        Direction::for_piece(self.side, self.is_king)
    }

    /// Whether arriving on `destination` crowns this piece
    pub fn would_crown(&self, board_size: u8, destination: Square) -> bool {
        !self.is_king && destination.row == self.side.king_row(board_size)
    }

    fn candidate(
        &self,
        board: &Board,
        kind: ActionKind,
        destination: Square,
        captured: Option<Square>,
    ) -> Option<CandidateAction> {
        match risk::assess(board, self, destination, captured) {
            Ok(risk) => Some(CandidateAction {
                kind,
                piece: self.id,
                from: self.position,
                destination,
                captured,
                risk,
            }),
            Err(err) => {
                warn!(
                    "[PIECE] {} risk assessment failed for {} -> {}: {}",
                    self.id, self.position, destination, err
                );
                None
            }
        }
    }

    /// One-step forward moves of a man
    pub fn moves(&self, board: &Board) -> Vec<CandidateAction> {
        if self.is_king {
            return Vec::new();
        }
        self.directions()
            .filter_map(|dir| board.step_move_target(self.side, false, self.position, dir))
            .filter_map(|target| self.candidate(board, ActionKind::Move, target, None))
            .collect()
    }

    /// Every free square along the four rays of a king
    pub fn flies(&self, board: &Board) -> Vec<CandidateAction> {
        if !self.is_king {
            return Vec::new();
        }
        Direction::ALL
            .into_iter()
            .flat_map(|dir| board.fly_path(self.position, dir))
            .filter_map(|target| self.candidate(board, ActionKind::Fly, target, None))
            .collect()
    }

    /// Two-step captures; men only jump forward
    pub fn jumps(&self, board: &Board) -> Vec<CandidateAction> {
        self.directions()
            .filter_map(|dir| board.jump_target(self.side, self.position, dir))
            .filter_map(|jump| {
                self.candidate(board, ActionKind::Jump, jump.landing, Some(jump.over))
            })
            .collect()
    }

    /// Every legal landing of every long-range capture of a king
    pub fn fly_captures(&self, board: &Board) -> Vec<CandidateAction> {
        if !self.is_king {
            return Vec::new();
        }
        let mut candidates = Vec::new();
        for dir in Direction::ALL {
            let Some(path) = board.fly_capture_path(self.side, self.position, dir) else {
                continue;
            };
            for landing in path.landings {
                if let Some(candidate) =
                    self.candidate(board, ActionKind::FlyCapture, landing, Some(path.captured))
                {
                    candidates.push(candidate);
                }
            }
        }
        candidates
    }

    pub fn can_move(&self, board: &Board) -> Option<CandidateAction> {
        safest(self.moves(board))
    }

    pub fn can_fly(&self, board: &Board) -> Option<CandidateAction> {
        safest(self.flies(board))
    }

    pub fn can_jump(&self, board: &Board) -> Option<CandidateAction> {
        safest(self.jumps(board))
    }

    /// Safest landing over all rays; each ray contributes its safest landing
    pub fn can_fly_capture(&self, board: &Board) -> Option<CandidateAction> {
        safest(self.fly_captures(board))
    }

    /// Best capture: fly-capture for kings, jump otherwise
    pub fn capture_candidate(&self, board: &Board) -> Option<CandidateAction> {
        if self.is_king {
            self.can_fly_capture(board).or_else(|| self.can_jump(board))
        } else {
            self.can_jump(board)
        }
    }

    /// Best non-capturing action: fly for kings, move otherwise
    pub fn quiet_candidate(&self, board: &Board) -> Option<CandidateAction> {
        if self.is_king {
            self.can_fly(board)
        } else {
            self.can_move(board)
        }
    }

    pub fn has_jump(&self, board: &Board) -> bool {
        self.directions()
            .any(|dir| board.jump_target(self.side, self.position, dir).is_some())
    }

    pub fn has_fly_capture(&self, board: &Board) -> bool {
        self.is_king
            && Direction::ALL
                .into_iter()
                .any(|dir| board.fly_capture_path(self.side, self.position, dir).is_some())
    }

    pub fn has_capture(&self, board: &Board) -> bool {
        self.has_fly_capture(board) || self.has_jump(board)
    }

    pub fn has_any_action(&self, board: &Board) -> bool {
        self.has_capture(board)
            || self
                .directions()
                .any(|dir| board.step_move_target(self.side, self.is_king, self.position, dir).is_some())
    }

    /// All candidates of one kind
    pub fn candidates(&self, board: &Board, kind: ActionKind) -> Vec<CandidateAction> {
        match kind {
            ActionKind::FlyCapture => self.fly_captures(board),
            ActionKind::Jump => self.jumps(board),
            ActionKind::Fly => self.flies(board),
            ActionKind::Move => self.moves(board),
        }
    }

    /// First action, in `allowed` priority order, that lands on `destination`
    pub fn action_to(
        &self,
        board: &Board,
        destination: Square,
        allowed: &[ActionKind],
    ) -> Option<CandidateAction> {
        allowed.iter().find_map(|&kind| {
            self.candidates(board, kind)
                .into_iter()
                .find(|candidate| candidate.destination == destination)
        })
    }
}
