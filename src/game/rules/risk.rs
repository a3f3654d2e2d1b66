//! Recapture risk of a candidate destination
//!
//! Risk only ranks non-capturing candidates against each other and picks a
//! landing square among several legal ones; it never competes with the
//! mandatory-capture rule.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::error::GameResult;
use crate::game::rules::board_state::{Board, ThreatKind};
use crate::game::rules::piece_moves::Piece;
use crate::game::types::Square;

/// Vulnerability of a piece after an action, lower is safer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Risk {
    BecomesKing = 0,
    NoCapture = 1,
    CaptureByPiece = 2,
    CaptureByKing = 3,
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Risk::BecomesKing => "becomes-king",
            Risk::NoCapture => "no-capture",
            Risk::CaptureByPiece => "capture-by-piece",
            Risk::CaptureByKing => "capture-by-king",
        };
        f.write_str(label)
    }
}

/// Score `piece` arriving on `destination`, optionally capturing the piece
/// on `captured` on the way
///
/// A man reaching its king row is always `BecomesKing`. Otherwise the action
/// is played on a scratch copy of the board and the opponent's threats
/// against the destination are classified.
pub fn assess(
    board: &Board,
    piece: &Piece,
    destination: Square,
    captured: Option<Square>,
) -> GameResult<Risk> {
    if piece.would_crown(board.size(), destination) {
        return Ok(Risk::BecomesKing);
    }

    let mut scratch = board.clone();
    let moving = scratch.remove(piece.position)?;
    if let Some(square) = captured {
        scratch.remove(square)?;
    }
    scratch.place(moving, destination)?;

    let risk = match scratch.find_threatening_piece(destination, piece.side.opponent()) {
        Some(threat) if threat.kind == ThreatKind::King => Risk::CaptureByKing,
        Some(_) => Risk::CaptureByPiece,
        None => Risk::NoCapture,
    };
    Ok(risk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{Parity, PieceId, Side};

    fn board_with(pieces: &[(Side, bool, (u8, u8))]) -> Board {
        let mut board = Board::empty(8, Parity::Even);
        for (i, &(side, king, pos)) in pieces.iter().enumerate() {
            let mut piece = Piece::man(PieceId(i as u16), side, pos.into());
            piece.is_king = king;
            board.place(piece, pos.into()).unwrap();
        }
        board
    }

    #[test]
    fn test_risk_ordering() {
        assert!(Risk::BecomesKing < Risk::NoCapture);
        assert!(Risk::NoCapture < Risk::CaptureByPiece);
        assert!(Risk::CaptureByPiece < Risk::CaptureByKing);
    }

    #[test]
    fn test_king_row_is_becomes_king() {
        let board = board_with(&[(Side::A, false, (6, 0)), (Side::B, true, (5, 3))]);
        let piece = *board.occupant(Square::new(6, 0)).unwrap();
        let risk = assess(&board, &piece, Square::new(7, 1), None).unwrap();
        assert_eq!(risk, Risk::BecomesKing);
    }

    #[test]
    fn test_adjacent_man_in_front() {
        // B men move toward row 0, so a B man on (4,4) can jump (3,3) into (2,2)
        let board = board_with(&[(Side::A, false, (2, 2)), (Side::B, false, (4, 4))]);
        let piece = *board.occupant(Square::new(2, 2)).unwrap();
        let risk = assess(&board, &piece, Square::new(3, 3), None).unwrap();
        assert_eq!(risk, Risk::CaptureByPiece);
    }

    #[test]
    fn test_adjacent_man_behind_cannot_capture() {
        // B man on (2,4) would have to move backward to jump (3,3)
        let board = board_with(&[(Side::A, false, (2, 2)), (Side::B, false, (2, 4))]);
        let piece = *board.occupant(Square::new(2, 2)).unwrap();
        let risk = assess(&board, &piece, Square::new(3, 3), None).unwrap();
        assert_eq!(risk, Risk::NoCapture);
    }

    #[test]
    fn test_distant_king_on_ray() {
        let board = board_with(&[(Side::A, false, (2, 2)), (Side::B, true, (6, 6))]);
        let piece = *board.occupant(Square::new(2, 2)).unwrap();
        let risk = assess(&board, &piece, Square::new(3, 3), None).unwrap();
        assert_eq!(risk, Risk::CaptureByKing);
    }

    #[test]
    fn test_blocked_landing_removes_threat() {
        // the square behind (3,3) seen from the B man is (2,2), held by an A piece
        let board = board_with(&[
            (Side::A, false, (2, 4)),
            (Side::A, false, (2, 2)),
            (Side::B, false, (4, 4)),
        ]);
        let piece = *board.occupant(Square::new(2, 4)).unwrap();
        let risk = assess(&board, &piece, Square::new(3, 3), None).unwrap();
        assert_eq!(risk, Risk::NoCapture);
    }
}
