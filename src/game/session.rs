//! Game session - the explicit context every operation runs against
//!
//! Owns the board, both players, the active side, the event bus and the move
//! history. Input adapters talk to the session only; it routes `select` and
//! `target` to the active player and hands control over when a turn resolves.
//!
//! # Turn Flow
//!
//! ```text
//! begin_turn ──▶ select/target ... ──▶ Complete ──▶ turn_over ──▶ begin_turn
//!     │                                                   │
//!     └── no pieces / no legal action ──▶ GameOver ◀──────┘
//! ```

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use tracing::{debug, info, warn};

use crate::core::error::CoreResult;
use crate::core::settings::EngineSettings;
use crate::game::ai::{choose_action, AiStep, HeuristicSource, TurnReport};
use crate::game::error::{GameError, GameResult};
use crate::game::events::{EventBus, GameEvent};
use crate::game::player::{ExecutionContext, MoveSource, Player, TurnProgress};
use crate::game::resources::{
    CurrentTurn, ForcedCaptureSet, GameOverReason, GameOverState, MoveHistory,
};
use crate::game::rules::Board;
use crate::game::types::{PieceId, Side, Square};

#[derive(Debug)]
pub struct GameSession {
    board: Board,
    /// Indexed by [`Side::index`]
    players: [Player; 2],
    turn: CurrentTurn,
    game_over: GameOverState,
    events: EventBus,
    history: MoveHistory,
    /// Set while a background worker owns the computer's turn
    computer_turn_in_flight: bool,
}

impl GameSession {
    /// Standard setup described by `settings`
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSettings` when `settings` fail validation.
    pub fn new(settings: &EngineSettings) -> CoreResult<Self> {
        settings.validate()?;
        let board = Board::new_game(settings.board_size, settings.playable_parity);
        let sources = Side::BOTH.map(|side| {
            if !settings.computer_side.controls(side) {
                return MoveSource::Interactive;
            }
            let source = match (settings.shuffle_scan_order, settings.seed) {
                (false, _) => HeuristicSource::new(),
                (true, Some(seed)) => HeuristicSource::seeded(seed.wrapping_add(side.index() as u64)),
                (true, None) => HeuristicSource::shuffled(),
            };
            MoveSource::Heuristic(source)
        });
        Ok(Self::with_board(board, settings.first_side, sources))
    }

    /// Session over an arbitrary position; `sources` is indexed by side
    pub fn with_board(board: Board, first_side: Side, sources: [MoveSource; 2]) -> Self {
        let [source_a, source_b] = sources;
        let players = [
            Player::new(Side::A, &board, source_a),
            Player::new(Side::B, &board, source_b),
        ];

        let mut session = Self {
            board,
            players,
            turn: CurrentTurn::new(first_side),
            game_over: GameOverState::Playing,
            events: EventBus::default(),
            history: MoveHistory::default(),
            computer_turn_in_flight: false,
        };
        info!(
            "[SESSION] New {}x{} game, side {} to move",
            session.board.size(),
            session.board.size(),
            first_side
        );
        session.begin_turn();
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_side(&self) -> Side {
        self.turn.side
    }

    pub fn current_turn(&self) -> &CurrentTurn {
        &self.turn
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn game_over(&self) -> &GameOverState {
        &self.game_over
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn is_computer(&self, side: Side) -> bool {
        self.player(side).is_computer()
    }

    /// Whether any driver currently runs a computer turn on this session
    pub fn computer_turn_in_flight(&self) -> bool {
        self.computer_turn_in_flight
    }

    pub(crate) fn claim_computer_turn(&mut self) {
        self.computer_turn_in_flight = true;
    }

    pub(crate) fn release_computer_turn(&mut self) {
        self.computer_turn_in_flight = false;
    }

    /// Pieces the active side must capture with, for highlighting
    pub fn forced_capture_set(&self) -> &ForcedCaptureSet {
        self.player(self.turn.side).forced_captures()
    }

    /// New receiver for every event emitted from now on
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// `side` selects the piece on `square`
    pub fn select(&mut self, side: Side, square: Square) -> GameResult<PieceId> {
        self.check_input(side)?;
        self.players[side.index()].select(&self.board, square)
    }

    /// `side` commits its selected or chained piece to `square`
    pub fn target(&mut self, side: Side, square: Square) -> GameResult<TurnProgress> {
        self.check_input(side)?;

        let mut ctx = ExecutionContext {
            events: &mut self.events,
            history: &mut self.history,
            turn_number: self.turn.turn_number,
        };
        let (player, opponent) = split_players(&mut self.players, side);
        let progress = player.target(&mut self.board, opponent, square, &mut ctx)?;

        if progress == TurnProgress::Complete {
            self.turn_over();
        }
        Ok(progress)
    }

    /// Play one computer sub-step for the active side
    pub fn computer_step(&mut self) -> GameResult<AiStep> {
        self.check_running()?;
        let side = self.turn.side;

        let player = &mut self.players[side.index()];
        let state = player.state();
        let MoveSource::Heuristic(source) = player.source_mut() else {
            return Err(GameError::illegal(format!("side {side} is not computer controlled")));
        };

        let Some(action) = choose_action(&self.board, side, state, source) else {
            warn!("[AI] Side {} has nothing to play and surrenders", side);
            self.end_game(side.opponent(), GameOverReason::Surrender);
            return Ok(AiStep::Surrendered);
        };
        debug!("[AI] Side {} chose {}", side, action);

        let mut ctx = ExecutionContext {
            events: &mut self.events,
            history: &mut self.history,
            turn_number: self.turn.turn_number,
        };
        let (player, opponent) = split_players(&mut self.players, side);
        let progress = player.execute(&mut self.board, opponent, action, &mut ctx)?;

        if progress == TurnProgress::Complete {
            self.turn_over();
        }
        Ok(AiStep::Executed { action, progress })
    }

    /// Play the computer's whole turn on the calling thread
    pub fn play_computer_turn(&mut self, think_delay: Duration) -> GameResult<TurnReport> {
        let side = self.turn.side;
        let start = Instant::now();
        let mut report = TurnReport::new(side);

        while !self.game_over.is_game_over() && self.turn.side == side {
            if !think_delay.is_zero() {
                thread::sleep(think_delay);
            }
            match self.computer_step()? {
                AiStep::Executed { action, .. } => report.actions.push(action),
                AiStep::Surrendered => report.surrendered = true,
            }
        }

        report.thinking_time = start.elapsed();
        Ok(report)
    }

    /// `side` gives up; the opponent wins
    pub fn surrender(&mut self, side: Side) -> GameResult<()> {
        self.check_running()?;
        self.end_game(side.opponent(), GameOverReason::Surrender);
        Ok(())
    }

    fn check_running(&self) -> GameResult<()> {
        match self.game_over.winner() {
            Some(winner) => Err(GameError::GameOver { winner }),
            None => Ok(()),
        }
    }

    fn check_input(&self, side: Side) -> GameResult<()> {
        self.check_running()?;
        if side != self.turn.side {
            return Err(GameError::illegal(format!("it is not side {side}'s turn")));
        }
        if self.is_computer(side) {
            return Err(GameError::illegal(format!(
                "side {side} is computer controlled"
            )));
        }
        Ok(())
    }

    fn turn_over(&mut self) {
        self.turn.switch();
        info!(
            "[SESSION] Turn {}: side {} to move",
            self.turn.turn_number, self.turn.side
        );
        self.events.emit(GameEvent::TurnChanged {
            side: self.turn.side,
        });
        self.begin_turn();
    }

    fn begin_turn(&mut self) {
        let side = self.turn.side;
        if self.board.count(side) == 0 {
            self.end_game(side.opponent(), GameOverReason::NoPieces);
            return;
        }
        if !self.board.pieces(side).any(|piece| piece.has_any_action(&self.board)) {
            self.end_game(side.opponent(), GameOverReason::NoLegalAction);
            return;
        }
        self.players[side.index()].begin_turn(&self.board);
    }

    fn end_game(&mut self, winner: Side, reason: GameOverReason) {
        self.game_over = GameOverState::Won { winner, reason };
        for player in &mut self.players {
            player.action_complete();
        }
        info!("[SESSION] {}", self.game_over);
        self.events.emit(GameEvent::GameOver { winner, reason });
    }
}

/// Mutable access to the player of `side` and its opponent
fn split_players(players: &mut [Player; 2], side: Side) -> (&mut Player, &mut Player) {
    let [a, b] = players;
    match side {
        Side::A => (a, b),
        Side::B => (b, a),
    }
}
