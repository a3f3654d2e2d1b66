//! Headless text front-end
//!
//! Plays the part of the presentation layer: reads `select` / `target`
//! commands from stdin for the interactive side, runs computer turns through
//! the [`AiDriver`], prints every engine event and redraws the board.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use tracing::{info, warn};

use xfcheckers::core::logging::init_tracing;
use xfcheckers::core::settings_persistence::{load_or_default, save_to};
use xfcheckers::game::ai::{AiDriver, ComputerSide};
use xfcheckers::game::{GameEvent, GameSession, Side, Square};

#[derive(Parser, Debug)]
#[command(name = "xfcheckers")]
#[command(about = "Checkers against a heuristic computer opponent")]
struct Cli {
    /// Settings file; defaults to settings.json in the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board edge length (even, 4..=16)
    #[arg(long)]
    size: Option<u8>,

    /// Sides played by the computer: a, b, both or none
    #[arg(long)]
    computer: Option<ComputerSide>,

    /// Pause before each computer step, e.g. "250ms" or "1s"
    #[arg(long, value_parser = humantime::parse_duration)]
    think: Option<Duration>,

    /// Shuffle the computer's scan order with this seed
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many full turns
    #[arg(long)]
    max_turns: Option<u32>,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_config: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

enum Command {
    Select(Square),
    Target(Square),
    Board,
    Quit,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = load_or_default(cli.config.as_deref());
    if let Some(size) = cli.size {
        settings.board_size = size;
    }
    if let Some(computer) = cli.computer {
        settings.computer_side = computer;
    }
    if let Some(think) = cli.think {
        settings.set_think_delay(think);
    }
    if let Some(seed) = cli.seed {
        settings.seed = Some(seed);
        settings.shuffle_scan_order = true;
    }
    settings.validate().context("invalid settings")?;

    if cli.save_config {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => xfcheckers::core::settings_persistence::default_settings_path()?,
        };
        save_to(&path, &settings).context("failed to save settings")?;
    }

    let session = Arc::new(Mutex::new(GameSession::new(&settings)?));
    let events = session.lock().subscribe();
    let mut driver = AiDriver::new(settings.think_delay());

    print_board(&session);
    info!(
        "[MAIN] Computer plays {}; think delay {}",
        settings.computer_side,
        humantime::format_duration(settings.think_delay())
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if reached_turn_limit(&session, cli.max_turns) {
            println!("Turn limit reached");
            break;
        }
        if session.lock().game_over().is_game_over() {
            break;
        }

        if driver.spawn_if_needed(&session) {
            if let Some(Err(e)) = driver.wait() {
                warn!("[MAIN] Computer turn failed: {}", e);
                break;
            }
            drain_events(&events);
            print_board(&session);
            continue;
        }

        let side = session.lock().active_side();
        print_prompt(&session, side)?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Board => print_board(&session),
            Command::Select(square) => {
                let result = session.lock().select(side, square);
                match result {
                    Ok(id) => println!("Selected {id} on {square}"),
                    Err(e) => println!("Rejected: {e}"),
                }
            }
            Command::Target(square) => {
                let result = session.lock().target(side, square);
                match result {
                    Ok(_) => {
                        drain_events(&events);
                        print_board(&session);
                    }
                    Err(e) => println!("Rejected: {e}"),
                }
            }
        }
    }

    drain_events(&events);
    let guard = session.lock();
    println!("{}", guard.game_over());
    let stats = driver.statistics();
    if stats.turns > 0 {
        println!(
            "Computer: {} turns, {} actions, {} captures",
            stats.turns, stats.actions, stats.captures
        );
    }
    Ok(())
}

fn parse_command(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let mut coordinate = |name: &str| -> Result<u8> {
        words
            .next()
            .with_context(|| format!("missing {name}"))?
            .parse::<u8>()
            .with_context(|| format!("{name} must be a number"))
    };

    match verb {
        "select" | "s" => Ok(Command::Select(Square::new(
            coordinate("row")?,
            coordinate("col")?,
        ))),
        "target" | "t" => Ok(Command::Target(Square::new(
            coordinate("row")?,
            coordinate("col")?,
        ))),
        "board" | "b" => Ok(Command::Board),
        "quit" | "q" => Ok(Command::Quit),
        "" => bail!("commands: select R C, target R C, board, quit"),
        other => bail!("unknown command '{other}'"),
    }
}

fn reached_turn_limit(session: &Arc<Mutex<GameSession>>, max_turns: Option<u32>) -> bool {
    max_turns.is_some_and(|max| session.lock().current_turn().turn_number > max)
}

fn print_prompt(session: &Arc<Mutex<GameSession>>, side: Side) -> Result<()> {
    let guard = session.lock();
    let forced = guard.forced_capture_set();
    if !forced.is_empty() {
        let squares: Vec<String> = forced.squares().iter().map(ToString::to_string).collect();
        println!("Side {side} must capture with {}", squares.join(" "));
    }
    let selected = guard
        .player(side)
        .selected()
        .and_then(|id| guard.board().find(id));
    if let Some(piece) = selected {
        println!("Side {side} has {} on {} selected", piece.id, piece.position);
    }
    print!("{side}> ");
    io::stdout().flush()?;
    Ok(())
}

fn print_board(session: &Arc<Mutex<GameSession>>) {
    println!("{}", session.lock().board());
}

fn drain_events(events: &Receiver<GameEvent>) {
    for event in events.try_iter() {
        match event {
            GameEvent::PieceMoved { piece, from, to } => {
                println!("{} {} moved {} -> {}", piece.side, piece.id, from, to)
            }
            GameEvent::PieceCaptured { piece } => {
                println!("{} {} captured on {}", piece.side, piece.id, piece.position)
            }
            GameEvent::PieceCrowned { piece } => {
                println!("{} {} crowned on {}", piece.side, piece.id, piece.position)
            }
            GameEvent::TurnChanged { side } => println!("Side {side} to move"),
            GameEvent::GameOver { winner, reason } => {
                println!("Game over: side {winner} wins ({reason:?})")
            }
        }
    }
}
