//! Heuristic move selection and the background turn driver
//!
//! # Decision
//!
//! 1. Inside a chain only the chained piece's next capture of the same family
//!    is considered.
//! 2. Otherwise every piece's best capture is collected; kings rank ahead of
//!    men, then lower risk, then discovery order.
//! 3. Without captures every piece's best non-capture is collected and sorted
//!    by risk, ties kept in discovery order.
//! 4. No candidate at all means the computer surrenders.
//!
//! # Driver
//!
//! [`AiDriver`] plays a whole computer turn on a worker thread. The worker
//! locks the shared session for each sub-step only and sleeps the thinking
//! delay unlocked, so the presentation keeps reading the board in between.
//! At most one worker is in flight per session: the claim is held on the
//! [`GameSession`] itself, so every driver sharing it is refused.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, TryRecvError};
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use super::resource::HeuristicSource;
use crate::game::error::{GameError, GameResult};
use crate::game::player::TurnProgress;
use crate::game::resources::TurnState;
use crate::game::rules::{Board, CandidateAction};
use crate::game::session::GameSession;
use crate::game::types::Side;

/// Outcome of one computer sub-step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiStep {
    Executed {
        action: CandidateAction,
        progress: TurnProgress,
    },
    /// Nothing to play; the opponent has been declared the winner
    Surrendered,
}

impl AiStep {
    /// The executed action, `None` on surrender
    pub fn executed(self) -> Option<CandidateAction> {
        match self {
            AiStep::Executed { action, .. } => Some(action),
            AiStep::Surrendered => None,
        }
    }
}

/// Everything the computer did during one turn
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub side: Side,
    pub actions: Vec<CandidateAction>,
    pub surrendered: bool,
    pub thinking_time: Duration,
}

impl TurnReport {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            actions: Vec::new(),
            surrendered: false,
            thinking_time: Duration::ZERO,
        }
    }
}

/// Running totals over the computer turns played so far
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AIStatistics {
    pub turns: u32,
    pub actions: u32,
    pub captures: u32,
    pub last_thinking_time: Duration,
}

impl AIStatistics {
    pub fn record(&mut self, report: &TurnReport) {
        self.turns += 1;
        self.actions += report.actions.len() as u32;
        self.captures += report
            .actions
            .iter()
            .filter(|action| action.kind.is_capture())
            .count() as u32;
        self.last_thinking_time = report.thinking_time;
    }
}

/// Pick the computer's next action for `side`
///
/// `state` is the side's current turn state; a chain restricts the choice to
/// the chained piece.
pub fn choose_action(
    board: &Board,
    side: Side,
    state: TurnState,
    source: &mut HeuristicSource,
) -> Option<CandidateAction> {
    match state {
        TurnState::ContinuingJump(id) => {
            return board.find(id).and_then(|piece| piece.can_jump(board));
        }
        TurnState::ContinuingFly(id) => {
            return board.find(id).and_then(|piece| piece.can_fly_capture(board));
        }
        TurnState::Idle | TurnState::Selected(_) => {}
    }

    let pieces = source.scan_order(board.pieces(side).copied().collect());

    let mut captures: Vec<(bool, CandidateAction)> = pieces
        .iter()
        .filter_map(|piece| {
            piece
                .capture_candidate(board)
                .map(|candidate| (piece.is_king, candidate))
        })
        .collect();
    if !captures.is_empty() {
        captures.sort_by_key(|(is_king, candidate)| (!is_king, candidate.risk));
        debug!(
            "[AI] {} capture candidates for side {}",
            captures.len(),
            side
        );
        return captures.first().map(|(_, candidate)| *candidate);
    }

    let mut quiet: Vec<CandidateAction> = pieces
        .iter()
        .filter_map(|piece| piece.quiet_candidate(board))
        .collect();
    quiet.sort_by_key(|candidate| candidate.risk);
    debug!("[AI] {} quiet candidates for side {}", quiet.len(), side);
    quiet.first().copied()
}

/// Handle to an in-flight computer turn
pub struct PendingAITurn {
    side: Side,
    receiver: Receiver<GameResult<TurnReport>>,
    handle: JoinHandle<()>,
}

impl PendingAITurn {
    pub fn side(&self) -> Side {
        self.side
    }
}

/// Runs computer turns on a worker thread
pub struct AiDriver {
    think_delay: Duration,
    pending: Option<PendingAITurn>,
    stats: AIStatistics,
}

impl AiDriver {
    pub fn new(think_delay: Duration) -> Self {
        Self {
            think_delay,
            pending: None,
            stats: AIStatistics::default(),
        }
    }

    pub fn think_delay(&self) -> Duration {
        self.think_delay
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn statistics(&self) -> &AIStatistics {
        &self.stats
    }

    /// Start the computer's turn if it is due
    ///
    /// Returns `false` when any worker already runs a turn on `session`, the
    /// game is over or
    /// the active side is interactive.
    pub fn spawn_if_needed(&mut self, session: &Arc<Mutex<GameSession>>) -> bool {
        let side = {
            let mut guard = session.lock();
            if should_skip_ai_spawn(self.pending.as_ref(), &guard) {
                return false;
            }
            guard.claim_computer_turn();
            guard.active_side()
        };

        let (tx, rx) = bounded(1);
        let shared = Arc::clone(session);
        let delay = self.think_delay;

        info!("[AI] ========== AI TASK SPAWNED ==========");
        info!("[AI] Side: {} | Think delay: {:?}", side, delay);

        let handle = thread::spawn(move || {
            let result = {
                let _claim = TurnClaim(&shared);
                run_turn(&shared, side, delay)
            };
            if tx.send(result).is_err() {
                warn!("[AI] Turn finished but nobody is waiting for the report");
            }
        });

        self.pending = Some(PendingAITurn {
            side,
            receiver: rx,
            handle,
        });
        true
    }

    /// Collect the finished turn without blocking
    pub fn poll(&mut self) -> Option<GameResult<TurnReport>> {
        let pending = self.pending.as_ref()?;
        match pending.receiver.try_recv() {
            Ok(result) => Some(self.finish(result)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                let side = pending.side;
                Some(self.finish(Err(worker_lost(side))))
            }
        }
    }

    /// Block until the in-flight turn finishes
    pub fn wait(&mut self) -> Option<GameResult<TurnReport>> {
        let pending = self.pending.as_ref()?;
        let result = pending
            .receiver
            .recv()
            .unwrap_or_else(|_| Err(worker_lost(pending.side)));
        Some(self.finish(result))
    }

    fn finish(&mut self, result: GameResult<TurnReport>) -> GameResult<TurnReport> {
        if let Some(pending) = self.pending.take() {
            if pending.handle.join().is_err() {
                error!("[AI] Worker for side {} panicked", pending.side);
            }
        }
        match &result {
            Ok(report) => {
                info!("[AI] ========== AI TURN COMPLETE ==========");
                info!(
                    "[AI] Side {} played {} action(s) in {:.2}s{}",
                    report.side,
                    report.actions.len(),
                    report.thinking_time.as_secs_f32(),
                    if report.surrendered { " and surrendered" } else { "" }
                );
                self.stats.record(report);
            }
            Err(err) => error!("[AI] Turn failed: {}", err),
        }
        result
    }
}

fn worker_lost(side: Side) -> GameError {
    GameError::illegal(format!("computer worker for side {side} stopped without a report"))
}

/// Releases the session's computer-turn claim when the worker finishes,
/// including by panic
struct TurnClaim<'a>(&'a Arc<Mutex<GameSession>>);

impl Drop for TurnClaim<'_> {
    fn drop(&mut self) {
        self.0.lock().release_computer_turn();
    }
}

/// Helper to check conditions for spawning a computer turn
fn should_skip_ai_spawn(pending: Option<&PendingAITurn>, session: &GameSession) -> bool {
    if pending.is_some() {
        return true;
    }
    if session.computer_turn_in_flight() {
        debug!("[AI] Another driver already runs this session's computer turn");
        return true;
    }
    if session.game_over().is_game_over() {
        return true;
    }
    !session.is_computer(session.active_side())
}

/// Play sub-steps until the turn passes, sleeping `delay` before each one
fn run_turn(
    session: &Arc<Mutex<GameSession>>,
    side: Side,
    delay: Duration,
) -> GameResult<TurnReport> {
    let start = Instant::now();
    let mut report = TurnReport::new(side);

    loop {
        if !delay.is_zero() {
            thread::sleep(delay);
        }

        let mut guard = session.lock();
        if guard.game_over().is_game_over() || guard.active_side() != side {
            break;
        }
        match guard.computer_step()? {
            AiStep::Executed { action, progress } => {
                report.actions.push(action);
                if progress == TurnProgress::Complete {
                    break;
                }
            }
            AiStep::Surrendered => {
                report.surrendered = true;
                break;
            }
        }
    }

    report.thinking_time = start.elapsed();
    Ok(report)
}
