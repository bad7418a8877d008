//! The threaded game handle.
//!
//! A [`Game`] is a monitor: one mutex around the [`GameState`], one condition
//! variable the fall worker parks on while the game is paused. Every public
//! operation holds the lock for its whole inspect-and-mutate step, so player
//! input and automatic falling never interleave inside a step.
//!
//! Events are emitted while the lock is held. With the default rendezvous
//! channel each emit waits for the consumer, so the receiver must be drained
//! on a thread that never calls into the `Game` itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use blockfall_core::types::{Command, GameEvent, GameStatus};
use blockfall_core::{catalog, FallOutcome, GameSnapshot, GameState, SimpleRng};

use crate::config::EngineConfig;
use crate::error::EngineError;

type State = GameState<SyncSender<GameEvent>>;

struct Shared {
    state: Mutex<State>,
    resumed: Condvar,
    closed: AtomicBool,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wake(&self) {
        self.resumed.notify_all();
    }
}

/// A live game with its own fall worker.
pub struct Game {
    shared: Arc<Shared>,
    start_delay: Duration,
}

impl Game {
    /// Build a game and the receiving end of its event stream.
    ///
    /// Initializes the shape catalog on first use.
    pub fn new(config: EngineConfig) -> Result<(Self, Receiver<GameEvent>), EngineError> {
        config.validate()?;
        let shapes = catalog::init()?;

        let rng = match config.seed {
            Some(seed) => SimpleRng::new(seed),
            None => SimpleRng::from_clock(),
        };
        let (tx, rx) = mpsc::sync_channel(config.event_buffer);
        let state = GameState::new(shapes, rng, tx).with_fall_intervals(config.fall_intervals_ms);

        let game = Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                resumed: Condvar::new(),
                closed: AtomicBool::new(false),
            }),
            start_delay: config.start_delay(),
        };
        Ok((game, rx))
    }

    /// Start (or restart after game over) and launch the fall worker.
    pub fn start(&self) -> bool {
        let epoch = {
            let mut state = self.shared.lock();
            if !state.start() {
                return false;
            }
            state.epoch()
        };
        // A worker from the previous round may still be parked.
        self.shared.wake();
        self.spawn_worker(epoch);
        true
    }

    pub fn pause(&self) -> bool {
        self.shared.lock().pause()
    }

    pub fn resume(&self) -> bool {
        let resumed = self.shared.lock().resume();
        if resumed {
            self.shared.wake();
        }
        resumed
    }

    pub fn toggle_pause(&self) -> bool {
        let toggled = self.shared.lock().toggle_pause();
        if toggled {
            self.shared.wake();
        }
        toggled
    }

    pub fn move_left(&self) -> bool {
        self.shared.lock().move_left()
    }

    pub fn move_right(&self) -> bool {
        self.shared.lock().move_right()
    }

    pub fn rotate(&self) -> bool {
        self.shared.lock().rotate()
    }

    pub fn drop_down(&self) -> bool {
        self.shared.lock().drop_down()
    }

    /// Dispatch a control command.
    pub fn apply(&self, command: Command) -> bool {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::TogglePause => self.toggle_pause(),
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::Rotate => self.rotate(),
            Command::DropDown => self.drop_down(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.shared.lock().status()
    }

    pub fn score(&self) -> u64 {
        self.shared.lock().score()
    }

    pub fn level(&self) -> u8 {
        self.shared.lock().level()
    }

    pub fn rows_cleared(&self) -> u32 {
        self.shared.lock().rows_cleared()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.shared.lock().snapshot()
    }

    fn spawn_worker(&self, epoch: u64) {
        let shared = Arc::clone(&self.shared);
        let start_delay = self.start_delay;
        let spawned = thread::Builder::new()
            .name(format!("blockfall-fall-{epoch}"))
            .spawn(move || run_worker(shared, epoch, start_delay));
        if let Err(err) = spawned {
            eprintln!("[Engine] failed to spawn fall worker: {err}");
        }
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.shared.closed.store(true, Ordering::SeqCst);
        self.shared.wake();
    }
}

/// Fall loop for one round. Exits on game over, on a newer `start()`, or when
/// the `Game` is dropped.
fn run_worker(shared: Arc<Shared>, epoch: u64, start_delay: Duration) {
    thread::sleep(start_delay);
    loop {
        let interval = {
            let mut state = shared.lock();
            while state.status() == GameStatus::Paused
                && state.epoch() == epoch
                && !shared.closed.load(Ordering::SeqCst)
            {
                state = shared
                    .resumed
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner);
            }
            if state.epoch() != epoch || shared.closed.load(Ordering::SeqCst) {
                return;
            }
            match state.fall_step() {
                FallOutcome::Fell | FallOutcome::Landed => {}
                FallOutcome::GameOver | FallOutcome::Idle => return,
            }
            Duration::from_millis(state.fall_interval_ms())
        };
        thread::sleep(interval);
    }
}
