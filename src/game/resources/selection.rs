//! Forced-capture set of the active side
//!
//! Computed at the start of every turn. When non-empty only its members may
//! be selected and only captures may be played; the presentation layer reads
//! it to highlight the pieces that must capture.

use crate::game::rules::{ActionKind, Board};
use crate::game::types::{PieceId, Side, Square};

/// A piece that has a capture available, with its pre-assigned intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedCapture {
    pub piece: PieceId,
    pub square: Square,
    /// `FlyCapture` for kings that can fly-capture, `Jump` otherwise
    pub intent: ActionKind,
}

/// Pieces of the active side that have at least one legal capture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForcedCaptureSet {
    entries: Vec<ForcedCapture>,
}

impl ForcedCaptureSet {
    /// Scan every piece of `side`; kings come first, then men, each group in
    /// row-major order
    pub fn compute(board: &Board, side: Side) -> Self {
        let mut kings = Vec::new();
        let mut men = Vec::new();

        for piece in board.pieces(side) {
            if !piece.has_capture(board) {
                continue;
            }
            let entry = ForcedCapture {
                piece: piece.id,
                square: piece.position,
                intent: if piece.has_fly_capture(board) {
                    ActionKind::FlyCapture
                } else {
                    ActionKind::Jump
                },
            };
            if piece.is_king {
                kings.push(entry);
            } else {
                men.push(entry);
            }
        }

        kings.extend(men);
        Self { entries: kings }
    }

    pub fn contains(&self, piece: PieceId) -> bool {
        self.entries.iter().any(|entry| entry.piece == piece)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ForcedCapture] {
        &self.entries
    }

    /// Squares to highlight
    pub fn squares(&self) -> Vec<Square> {
        self.entries.iter().map(|entry| entry.square).collect()
    }
}
