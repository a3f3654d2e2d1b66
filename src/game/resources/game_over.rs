//! Game over state tracking and result management
//!
//! A checkers game has no draw condition in this engine: a side loses when it
//! has no pieces left, when it has no legal action at the start of its turn,
//! or when the computer player surrenders.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::types::Side;

/// Why the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// The loser's last piece was captured
    NoPieces,
    /// The loser could neither move nor capture on its turn
    NoLegalAction,
    /// The computer player found nothing to play and gave up
    Surrender,
}

/// The game's end state
///
/// Starts as `Playing`; `Won` is terminal and disables all further input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameOverState {
    #[default]
    Playing,
    Won {
        winner: Side,
        reason: GameOverReason,
    },
}

impl GameOverState {
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameOverState::Playing)
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            GameOverState::Playing => None,
            GameOverState::Won { winner, .. } => Some(*winner),
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GameOverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverState::Playing => write!(f, "Game in progress"),
            GameOverState::Won { winner, reason } => {
                let why = match reason {
                    GameOverReason::NoPieces => "has no pieces left",
                    GameOverReason::NoLegalAction => "has no legal action",
                    GameOverReason::Surrender => "surrendered",
                };
                write!(f, "Side {winner} wins: side {} {why}", winner.opponent())
            }
        }
    }
}
