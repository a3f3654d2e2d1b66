//! Game Flow Integration Tests
//!
//! Drives full turns through [`GameSession`] the way a presentation layer
//! would:
//! - Captures, chains and crowning
//! - Forced-capture selection rules
//! - Win conditions
//! - Computer move choice
//! - Event order seen by subscribers

use crossbeam_channel::Receiver;
use xfcheckers::core::EngineSettings;
use xfcheckers::game::ai::{ComputerSide, HeuristicSource};
use xfcheckers::game::resources::{GameOverReason, GameOverState, TurnState};
use xfcheckers::game::rules::{ActionKind, Board, Piece, Risk};
use xfcheckers::game::{
    GameEvent, GameSession, MoveSource, Parity, PieceId, Side, Square, TurnProgress,
};

/// Board with the given `(side, is_king, (row, col))` pieces; ids follow the
/// slice order
fn create_board(parity: Parity, pieces: &[(Side, bool, (u8, u8))]) -> Board {
    let mut board = Board::empty(8, parity);
    for (i, &(side, king, (row, col))) in pieces.iter().enumerate() {
        let square = Square::new(row, col);
        let id = PieceId(i as u16);
        let piece = if king {
            Piece::king(id, side, square)
        } else {
            Piece::man(id, side, square)
        };
        board.place(piece, square).unwrap();
    }
    board
}

fn hot_seat(board: Board, first_side: Side) -> GameSession {
    GameSession::with_board(
        board,
        first_side,
        [MoveSource::Interactive, MoveSource::Interactive],
    )
}

fn computer_a(board: Board) -> GameSession {
    GameSession::with_board(
        board,
        Side::A,
        [
            MoveSource::Heuristic(HeuristicSource::new()),
            MoveSource::Interactive,
        ],
    )
}

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

fn drain(events: &Receiver<GameEvent>) -> Vec<GameEvent> {
    events.try_iter().collect()
}

/// Standard opening with B's man from (5,4) advanced to (3,2)
fn scenario_a_board() -> Board {
    let mut board = Board::standard();
    let man = board.remove(sq(5, 4)).unwrap();
    board.place(man, sq(3, 2)).unwrap();
    board
}

// ============================================================================
// Capture Tests
// ============================================================================

#[test]
fn test_scenario_a_jump_from_opening() {
    //! A's man on (2,1) jumps B's man on (3,2) and lands on (4,3); nothing
    //! else is capturable from there, so the turn passes to B
    let mut session = hot_seat(scenario_a_board(), Side::A);
    let events = session.subscribe();

    session.select(Side::A, sq(2, 1)).unwrap();
    let progress = session.target(Side::A, sq(4, 3)).unwrap();

    assert_eq!(progress, TurnProgress::Complete);
    assert_eq!(session.board().count(Side::B), 11, "B lost exactly one piece");
    assert_eq!(session.board().count(Side::A), 12);
    assert_eq!(session.board().occupant_side(sq(4, 3)), Some(Side::A));
    assert!(session.board().is_free(sq(2, 1)));
    assert!(session.board().is_free(sq(3, 2)));
    assert_eq!(session.active_side(), Side::B);

    let record = session.history().last_move().unwrap();
    assert_eq!(record.kind, ActionKind::Jump);
    assert_eq!(record.captured.map(|p| p.side), Some(Side::B));

    let kinds: Vec<&str> = drain(&events)
        .iter()
        .map(|event| match event {
            GameEvent::PieceMoved { .. } => "moved",
            GameEvent::PieceCaptured { .. } => "captured",
            GameEvent::PieceCrowned { .. } => "crowned",
            GameEvent::TurnChanged { .. } => "turn",
            GameEvent::GameOver { .. } => "over",
        })
        .collect();
    assert_eq!(kinds, vec!["moved", "captured", "turn"]);
}

#[test]
fn test_multi_jump_chain() {
    //! After the first jump the same man must keep jumping; selection is
    //! locked and quiet moves are refused until the chain ends
    let board = create_board(
        Parity::Odd,
        &[
            (Side::A, false, (2, 1)),
            (Side::B, false, (3, 2)),
            (Side::B, false, (5, 4)),
            (Side::B, false, (7, 0)),
        ],
    );
    let mut session = hot_seat(board, Side::A);

    session.select(Side::A, sq(2, 1)).unwrap();
    let progress = session.target(Side::A, sq(4, 3)).unwrap();
    assert_eq!(
        progress,
        TurnProgress::Continuing(TurnState::ContinuingJump(PieceId(0)))
    );
    assert_eq!(session.active_side(), Side::A, "Chain keeps the turn");

    assert!(session.select(Side::A, sq(4, 3)).is_err(), "No re-selection mid-chain");
    assert!(session.target(Side::A, sq(5, 2)).is_err(), "No quiet move mid-chain");
    assert_eq!(
        session.player(Side::A).state(),
        TurnState::ContinuingJump(PieceId(0))
    );

    let progress = session.target(Side::A, sq(6, 5)).unwrap();
    assert_eq!(progress, TurnProgress::Complete);
    assert_eq!(session.board().count(Side::B), 1);
    assert_eq!(session.active_side(), Side::B);
    assert_eq!(session.player(Side::A).state(), TurnState::Idle);
}

#[test]
fn test_fly_capture_chain() {
    let board = create_board(
        Parity::Odd,
        &[
            (Side::A, true, (0, 1)),
            (Side::B, false, (2, 3)),
            (Side::B, false, (4, 3)),
            (Side::B, false, (7, 6)),
        ],
    );
    let mut session = hot_seat(board, Side::A);

    assert_eq!(
        session.forced_capture_set().entries()[0].intent,
        ActionKind::FlyCapture
    );
    session.select(Side::A, sq(0, 1)).unwrap();
    let progress = session.target(Side::A, sq(3, 4)).unwrap();
    assert_eq!(
        progress,
        TurnProgress::Continuing(TurnState::ContinuingFly(PieceId(0)))
    );

    let before = session.board().clone();
    assert!(session.select(Side::A, sq(3, 4)).is_err(), "No re-selection mid-chain");
    assert!(session.target(Side::A, sq(4, 5)).is_err(), "No plain fly mid-chain");
    assert!(session.target(Side::A, sq(2, 3)).is_err(), "No fly onto the captured square");
    assert_eq!(
        session.player(Side::A).state(),
        TurnState::ContinuingFly(PieceId(0))
    );
    assert_eq!(session.board(), &before);
    assert_eq!(session.active_side(), Side::A);

    let progress = session.target(Side::A, sq(5, 2)).unwrap();
    assert_eq!(progress, TurnProgress::Complete);
    assert_eq!(session.board().count(Side::B), 1);
    assert_eq!(session.history().captured_count(Side::B), 2);
}

// ============================================================================
// Crowning Tests
// ============================================================================

#[test]
fn test_scenario_b_plain_move_crowns_and_ends_turn() {
    let board = create_board(
        Parity::Odd,
        &[(Side::A, false, (6, 1)), (Side::B, false, (5, 6))],
    );
    let mut session = hot_seat(board, Side::A);
    let events = session.subscribe();

    session.select(Side::A, sq(6, 1)).unwrap();
    let progress = session.target(Side::A, sq(7, 2)).unwrap();

    assert_eq!(progress, TurnProgress::Complete);
    let piece = session.board().occupant(sq(7, 2)).unwrap();
    assert!(piece.is_king, "Reaching row 7 crowns immediately");
    assert_eq!(session.active_side(), Side::B);
    assert!(session.history().last_move().unwrap().crowned);
    assert!(drain(&events)
        .iter()
        .any(|e| matches!(e, GameEvent::PieceCrowned { piece } if piece.position == sq(7, 2))));
}

#[test]
fn test_crowning_capture_ends_chain() {
    //! From the crowning square a fly-capture of (6,5) would be legal for a
    //! king, but crowning ends the turn
    let board = create_board(
        Parity::Odd,
        &[
            (Side::A, false, (5, 2)),
            (Side::B, false, (6, 3)),
            (Side::B, false, (6, 5)),
        ],
    );
    let mut session = hot_seat(board, Side::A);
    let events = session.subscribe();

    session.select(Side::A, sq(5, 2)).unwrap();
    let progress = session.target(Side::A, sq(7, 4)).unwrap();

    assert_eq!(progress, TurnProgress::Complete);
    assert!(session.board().occupant(sq(7, 4)).unwrap().is_king);
    assert_eq!(session.board().occupant_side(sq(6, 5)), Some(Side::B));
    assert_eq!(session.active_side(), Side::B);
    assert_eq!(session.player(Side::A).state(), TurnState::Idle);

    let events = drain(&events);
    assert!(matches!(events[0], GameEvent::PieceMoved { .. }));
    assert!(matches!(events[1], GameEvent::PieceCaptured { .. }));
    assert!(matches!(events[2], GameEvent::PieceCrowned { .. }));
    assert_eq!(events[3], GameEvent::TurnChanged { side: Side::B });
}

// ============================================================================
// Forced Capture Tests
// ============================================================================

#[test]
fn test_forced_capture_restricts_selection() {
    let mut session = hot_seat(scenario_a_board(), Side::A);

    let forced = session.forced_capture_set().squares();
    assert_eq!(forced, vec![sq(2, 1), sq(2, 3)]);

    assert!(session.select(Side::A, sq(2, 5)).is_err());
    assert_eq!(session.player(Side::A).state(), TurnState::Idle);

    let id = session.select(Side::A, sq(2, 1)).unwrap();
    assert_eq!(session.player(Side::A).pieces()[0], id, "Selected piece moves to the head");

    assert!(session.select(Side::A, sq(2, 7)).is_err());
    assert_eq!(session.player(Side::A).state(), TurnState::Selected(id));

    assert!(
        session.target(Side::A, sq(3, 0)).is_err(),
        "A quiet move is refused while a capture is mandatory"
    );
    assert_eq!(session.player(Side::A).state(), TurnState::Selected(id));

    let other = session.select(Side::A, sq(2, 3)).unwrap();
    assert_eq!(session.player(Side::A).state(), TurnState::Selected(other));
}

#[test]
fn test_rejected_input_leaves_board_untouched() {
    let mut session = hot_seat(Board::standard(), Side::A);
    let before = session.board().clone();

    assert!(session.select(Side::A, sq(5, 0)).is_err(), "Opponent's piece");
    assert!(session.select(Side::A, sq(3, 2)).is_err(), "Empty square");
    assert!(session.target(Side::A, sq(3, 2)).is_err(), "Nothing selected");
    assert!(session.select(Side::B, sq(5, 0)).is_err(), "Out of turn");

    session.select(Side::A, sq(2, 1)).unwrap();
    assert!(session.target(Side::A, sq(4, 3)).is_err(), "Too far for a man");
    assert!(session.target(Side::A, sq(1, 0)).is_err(), "Backward");

    assert_eq!(session.board(), &before);
    assert!(session.history().is_empty());
}

// ============================================================================
// Win Condition Tests
// ============================================================================

#[test]
fn test_scenario_c_blocked_side_loses() {
    //! After A's move B still has a man, but it stands on row 0 and cannot
    //! move or capture
    let board = create_board(
        Parity::Odd,
        &[(Side::A, false, (3, 2)), (Side::B, false, (0, 1))],
    );
    let mut session = hot_seat(board, Side::A);
    let events = session.subscribe();

    session.select(Side::A, sq(3, 2)).unwrap();
    session.target(Side::A, sq(4, 3)).unwrap();

    assert_eq!(
        session.game_over(),
        &GameOverState::Won {
            winner: Side::A,
            reason: GameOverReason::NoLegalAction
        }
    );
    assert_eq!(
        drain(&events).last(),
        Some(&GameEvent::GameOver {
            winner: Side::A,
            reason: GameOverReason::NoLegalAction
        })
    );
    assert!(session.select(Side::B, sq(0, 1)).is_err());
}

#[test]
fn test_capturing_last_piece_wins() {
    let board = create_board(
        Parity::Odd,
        &[(Side::A, false, (2, 1)), (Side::B, false, (3, 2))],
    );
    let mut session = hot_seat(board, Side::A);

    session.select(Side::A, sq(2, 1)).unwrap();
    session.target(Side::A, sq(4, 3)).unwrap();

    assert_eq!(
        session.game_over(),
        &GameOverState::Won {
            winner: Side::A,
            reason: GameOverReason::NoPieces
        }
    );
}

// ============================================================================
// Computer Player Tests
// ============================================================================

#[test]
fn test_scenario_d_computer_picks_safer_landing() {
    let board = create_board(
        Parity::Even,
        &[
            (Side::A, true, (3, 3)),
            (Side::B, false, (5, 5)),
            (Side::B, false, (7, 5)),
        ],
    );
    let mut session = computer_a(board);

    let action = session.computer_step().unwrap().executed().unwrap();
    assert_eq!(action.kind, ActionKind::FlyCapture);
    assert_eq!(action.destination, sq(7, 7));
    assert_eq!(action.risk, Risk::NoCapture);
    assert!(session.board().is_free(sq(5, 5)));
    assert_eq!(session.active_side(), Side::B);
}

#[test]
fn test_computer_prefers_king_row() {
    let board = create_board(
        Parity::Odd,
        &[
            (Side::A, false, (2, 1)),
            (Side::A, false, (6, 1)),
            (Side::B, false, (5, 6)),
        ],
    );
    let mut session = computer_a(board);

    let action = session.computer_step().unwrap().executed().unwrap();
    assert_eq!(action.risk, Risk::BecomesKing);
    assert_eq!(action.destination.row, 7);
}

#[test]
fn test_computer_never_skips_capture() {
    //! The jump lands where B can recapture; the quiet move of the man on
    //! (0,7) is safe, yet the capture is played
    let board = create_board(
        Parity::Odd,
        &[
            (Side::A, false, (0, 7)),
            (Side::A, false, (2, 1)),
            (Side::B, false, (3, 2)),
            (Side::B, false, (5, 4)),
        ],
    );
    let mut session = computer_a(board);

    let action = session.computer_step().unwrap().executed().unwrap();
    assert_eq!(action.kind, ActionKind::Jump);
    assert_eq!(action.risk, Risk::CaptureByPiece);
}

#[test]
fn test_computer_plays_whole_chain() {
    let board = create_board(
        Parity::Odd,
        &[
            (Side::A, false, (2, 1)),
            (Side::B, false, (3, 2)),
            (Side::B, false, (5, 4)),
            (Side::B, false, (7, 0)),
        ],
    );
    let mut session = computer_a(board);

    let report = session
        .play_computer_turn(std::time::Duration::ZERO)
        .unwrap();
    assert_eq!(report.actions.len(), 2);
    assert!(!report.surrendered);
    assert_eq!(session.board().count(Side::B), 1);
    assert_eq!(session.active_side(), Side::B);
}

#[test]
fn test_self_play_respects_direction_rule() {
    //! Seeded computer-vs-computer game; after every step no man is offered
    //! a backward destination and piece counts never grow
    let settings = EngineSettings {
        computer_side: ComputerSide::Both,
        shuffle_scan_order: true,
        seed: Some(11),
        think_delay_ms: 0,
        ..Default::default()
    };
    let mut session = GameSession::new(&settings).unwrap();
    let mut counts = (12, 12);

    for _ in 0..400 {
        if session.game_over().is_game_over() {
            break;
        }
        session.computer_step().unwrap();

        let board = session.board();
        for side in Side::BOTH {
            for piece in board.pieces(side).filter(|p| !p.is_king) {
                for candidate in piece.moves(board).iter().chain(piece.jumps(board).iter()) {
                    let delta = candidate.destination.row as i32 - piece.position.row as i32;
                    assert_eq!(delta.signum(), side.forward() as i32, "Men only move forward");
                }
            }
        }

        let now = (board.count(Side::A), board.count(Side::B));
        assert!(now.0 <= counts.0 && now.1 <= counts.1);
        counts = now;
    }
}

// ============================================================================
// Round-Trip Tests
// ============================================================================

#[test]
fn test_round_trip_restores_occupancy() {
    let board = create_board(
        Parity::Odd,
        &[(Side::A, true, (0, 1)), (Side::B, true, (7, 6))],
    );
    let mut session = hot_seat(board.clone(), Side::A);

    session.select(Side::A, sq(0, 1)).unwrap();
    session.target(Side::A, sq(2, 3)).unwrap();
    session.select(Side::B, sq(7, 6)).unwrap();
    session.target(Side::B, sq(5, 4)).unwrap();
    session.select(Side::A, sq(2, 3)).unwrap();
    session.target(Side::A, sq(0, 1)).unwrap();
    session.select(Side::B, sq(5, 4)).unwrap();
    session.target(Side::B, sq(7, 6)).unwrap();

    assert_eq!(session.board(), &board);
    assert_eq!(session.history().len(), 4);
    assert_eq!(session.current_turn().turn_number, 3);
}
