//! Error types for game module
//!
//! Provides custom error types for the rule engine including board bounds,
//! occupancy, state-machine rejections and terminal game conditions.

use crate::game::types::{PieceId, Side, Square};

/// Errors that can occur in game logic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Coordinates never derived from a real tile or candidate
    #[error("Square ({row}, {col}) is outside the board")]
    OutOfBounds { row: i32, col: i32 },

    /// Placement onto a tile that already holds a piece
    #[error("Square {square} is already occupied")]
    SquareOccupied { square: Square },

    /// Removal from a tile that holds no piece
    #[error("Square {square} holds no piece")]
    EmptySquare { square: Square },

    /// Piece id not present on the board
    #[error("Piece {id} not found on the board")]
    PieceNotFound { id: PieceId },

    /// Input not legal in the current turn state; nothing changed
    #[error("Illegal action: {reason}")]
    IllegalAction { reason: String },

    /// A side has neither a move nor a capture on its turn
    #[error("Side {side} has no legal action")]
    NoLegalAction { side: Side },

    /// Input after the game has been decided
    #[error("Game is over, {winner} won")]
    GameOver { winner: Side },
}

impl GameError {
    pub fn illegal(reason: impl Into<String>) -> Self {
        GameError::IllegalAction {
            reason: reason.into(),
        }
    }
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
