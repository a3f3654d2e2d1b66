//! Notifications from the engine to the presentation layer
//!
//! The engine never renders anything. Every observable change is published as
//! a [`GameEvent`] to each receiver handed out by [`EventBus::subscribe`];
//! receivers that have been dropped are pruned on the next emit.
//!
//! # Ordering
//!
//! One executed step emits `PieceMoved`, then `PieceCaptured`, then
//! `PieceCrowned`, each only when it applies. When the turn resolves,
//! `TurnChanged` names the new active side before that side is checked for
//! pieces and legal actions, so a game that ends at the handover emits
//! `TurnChanged` followed by `GameOver`.

use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::resources::GameOverReason;
use crate::game::rules::Piece;
use crate::game::types::{Side, Square};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// `piece` is the state after arrival
    PieceMoved { piece: Piece, from: Square, to: Square },
    PieceCaptured { piece: Piece },
    PieceCrowned { piece: Piece },
    TurnChanged { side: Side },
    GameOver { winner: Side, reason: GameOverReason },
}

#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<GameEvent>>,
}

impl EventBus {
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn emit(&mut self, event: GameEvent) {
        debug!("[EVENT] {:?}", event);
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
