//! Terminal Tetris runner (default binary).
//!
//! Drives the core state machine from crossterm key events and a fixed
//! tick, feeding every event it reports to the board view (and the journal,
//! when one is requested).

mod cli;
mod journal;

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use term_tetris::core::{Game, Output, PieceSource, SystemClock};
use term_tetris::input::map_key;
use term_tetris::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};
use term_tetris::types::TICK_MS;

use cli::Args;
use journal::Journal;

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.to_config()?;
    init_logging(&args)?;

    let seed = args.seed();
    let mut journal = args.journal.as_deref().map(Journal::create).transpose()?;
    info!(
        height = config.height,
        width = config.width,
        fall_delay_ms = config.fall_delay.as_millis() as u64,
        seed,
        scripted = !args.pieces.is_empty(),
        "starting"
    );
    let game = Game::with_sources(config, args.piece_source(seed), SystemClock::new());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game, journal.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("exiting");
    match journal {
        Some(journal) => journal.close(result),
        None => result,
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = args.log_file.as_deref() else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("create log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run<S: PieceSource>(
    term: &mut TerminalRenderer,
    mut game: Game<S, SystemClock>,
    mut journal: Option<&mut Journal>,
) -> Result<()> {
    let mut view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut emit = |output: Output, view: &mut BoardView| -> Result<()> {
        debug!(event = output.as_str(), "output");
        view.apply(&output);
        if let Some(journal) = journal.as_deref_mut() {
            journal.record(&output)?;
        }
        Ok(())
    };

    let tick_duration = Duration::from_millis(TICK_MS);
    let mut last_tick = Instant::now();

    loop {
        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = map_key(key, game.state()) {
                        if let Some(output) = game.action(action) {
                            emit(output, &mut view)?;
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if game.is_over() {
            return Ok(());
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if let Some(output) = game.tick() {
                emit(output, &mut view)?;
            }
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
    }
}
