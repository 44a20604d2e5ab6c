mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use twin_shooter::commands::Command;
use twin_shooter::config::GameConfig;
use twin_shooter::session::GameSession;

use display::Viewport;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

#[derive(Parser, Debug)]
#[command(name = "twin_shooter", version, about = "Terminal arcade shooter")]
struct Cli {
    /// TOML file overriding field geometry, sizes and speeds
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for enemy placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Log destination (the terminal itself is taken by the game screen)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("twin_shooter=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// A pointer drag in progress: where it began and where the player was then.
/// The player follows the drag delta, not the absolute pointer position.
struct Drag {
    col: u16,
    row: u16,
    player_x: f32,
    player_y: f32,
}

enum Flow {
    Continue,
    Quit,
}

/// Translate one terminal event into session commands.
fn handle_event(
    ev: Event,
    session: &mut GameSession,
    view: &Viewport,
    drag: &mut Option<Drag>,
) -> Flow {
    let player = session.world().player.clone();
    let step = session.config().player_speed;

    match ev {
        Event::Key(KeyEvent { code, kind, modifiers, .. }) if kind != KeyEventKind::Release => {
            let command = match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Flow::Quit;
                }
                KeyCode::Char(' ') => Command::Fire,
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    if session.is_running() {
                        Command::Pause
                    } else {
                        Command::Resume
                    }
                }
                KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char('n') | KeyCode::Char('N') => {
                    Command::Restart
                }
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::MovePlayer {
                    x: player.x - step,
                    y: player.y,
                },
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Command::MovePlayer {
                    x: player.x + step,
                    y: player.y,
                },
                KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::MovePlayer {
                    x: player.x,
                    y: player.y - step,
                },
                KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::MovePlayer {
                    x: player.x,
                    y: player.y + step,
                },
                _ => return Flow::Continue,
            };
            session.apply(command);
        }
        Event::Mouse(MouseEvent { kind, column, row, .. }) => match kind {
            MouseEventKind::Down(MouseButton::Left) if session.is_running() => {
                *drag = Some(Drag {
                    col: column,
                    row,
                    player_x: player.x,
                    player_y: player.y,
                });
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(d) = drag.as_ref() {
                    let (dx, dy) = view
                        .cells_to_field(column as i32 - d.col as i32, row as i32 - d.row as i32);
                    session.apply(Command::MovePlayer {
                        x: d.player_x + dx,
                        y: d.player_y + dy,
                    });
                }
            }
            MouseEventKind::Up(MouseButton::Left) => *drag = None,
            _ => {}
        },
        _ => {}
    }
    Flow::Continue
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drain input, pump the session, draw, sleep out the rest of the frame.
/// Spawn time is measured between pumps, so it tracks the wall clock even
/// when a frame runs long.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut drag: Option<Drag> = None;
    let mut last_pump = Instant::now();

    loop {
        let frame_start = Instant::now();
        let (cols, rows) = terminal::size()?;
        let view = Viewport::new(cols, rows, session.config());

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Flow::Quit = handle_event(ev, session, &view, &mut drag) {
                return Ok(());
            }
        }
        if !session.is_running() {
            drag = None;
        }

        let now = Instant::now();
        session.pump(now - last_pump);
        last_pump = now;

        display::render(out, &session.snapshot(), &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("twin_shooter.log"));
    init_logging(&log_path)?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut session = GameSession::new(config, rng);
    let result = game_loop(&mut out, &mut session, &rx);
    info!(score = session.score(), "quit");

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal I/O failed")
}
