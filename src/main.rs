//! Terminal runner (default binary).
//!
//! The engine pushes every change through a rendezvous channel, so events are
//! drained and drawn on a dedicated render thread while the main thread polls
//! the keyboard and forwards commands to the game.

use std::fs::File;
use std::io::BufWriter;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event};

use blockfall::core::catalog;
use blockfall::engine::{EngineConfig, Game};
use blockfall::input::{map_key, should_quit};
use blockfall::term::{BoardView, FrameBuffer, TerminalRenderer, FRAME_HEIGHT, FRAME_WIDTH};
use blockfall::types::{Command, GameEvent, GameStatus};
use blockfall::EventLog;

const POLL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    let (game, events) = Game::new(config).context("failed to create game")?;
    let log = EventLog::from_env();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let quit = Arc::new(AtomicBool::new(false));
    let render_quit = Arc::clone(&quit);
    let render = thread::Builder::new()
        .name("blockfall-render".to_string())
        .spawn(move || {
            let result = render_loop(&mut term, events, log, &render_quit);
            render_quit.store(true, Ordering::SeqCst);
            (term, result)
        })
        .context("failed to spawn render thread")?;

    let input_result = input_loop(&game, &quit);
    quit.store(true, Ordering::SeqCst);

    let render_result = match render.join() {
        Ok((mut term, result)) => {
            // Always try to restore terminal state.
            let _ = term.exit();
            result
        }
        Err(_) => {
            let _ = TerminalRenderer::new().exit();
            Err(anyhow!("render thread panicked"))
        }
    };

    input_result.and(render_result)
}

fn input_loop(game: &Game, quit: &AtomicBool) -> Result<()> {
    while !quit.load(Ordering::SeqCst) {
        if !event::poll(POLL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if should_quit(key) {
            return Ok(());
        }
        if let Some(command) = map_key(key) {
            if accepts(game.status(), command) {
                game.apply(command);
            }
        }
    }
    Ok(())
}

/// Keys only reach the engine when they can take effect, so
/// stray presses do not print diagnostics over the board.
fn accepts(status: GameStatus, command: Command) -> bool {
    if command.is_player_input() {
        return status == GameStatus::Gaming;
    }
    match command {
        Command::Start => status.can_start(),
        _ => status >= GameStatus::Gaming,
    }
}

fn render_loop(
    term: &mut TerminalRenderer,
    events: Receiver<GameEvent>,
    mut log: Option<EventLog<BufWriter<File>>>,
    quit: &AtomicBool,
) -> Result<()> {
    let mut view = BoardView::new(catalog::get());
    let mut fb = FrameBuffer::new(FRAME_WIDTH, FRAME_HEIGHT);
    view.render(&mut fb);
    term.present(&fb)?;

    while !quit.load(Ordering::SeqCst) {
        let event = match events.recv_timeout(POLL) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        if let Some(writer) = log.as_mut() {
            if let Err(err) = writer.record(&event) {
                eprintln!("[Blockfall] event log disabled: {err:#}");
                log = None;
            }
        }

        view.apply(&event);
        view.render(&mut fb);
        term.present(&fb)?;
    }

    if let Some(mut writer) = log {
        writer.flush()?;
    }
    Ok(())
}
