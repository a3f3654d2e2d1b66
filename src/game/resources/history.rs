//! Move history tracking resource
//!
//! Chronological record of every executed sub-step of the current game, one
//! entry per move, fly, jump or fly-capture (a triple jump is three records).
//! Kept in memory only; it is dropped with the session.

use crate::game::rules::{ActionKind, Piece};
use crate::game::types::{PieceId, Side, Square};

/// One executed action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub side: Side,
    pub piece: PieceId,
    pub kind: ActionKind,
    pub from: Square,
    pub to: Square,
    /// Opponent piece removed by this step
    pub captured: Option<Piece>,
    /// The mover was crowned on arrival
    pub crowned: bool,
    /// Turn number the step belongs to
    pub turn_number: u32,
}

/// Complete step history of the current game
#[derive(Debug, Default, Clone)]
pub struct MoveHistory {
    moves: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn add_move(&mut self, record: MoveRecord) {
        self.moves.push(record);
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> {
        self.moves.iter()
    }

    /// Number of pieces of `side` captured so far
    pub fn captured_count(&self, side: Side) -> usize {
        self.moves
            .iter()
            .filter_map(|record| record.captured)
            .filter(|piece| piece.side == side)
            .count()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }
}
