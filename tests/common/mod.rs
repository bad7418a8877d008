//! Shared helpers for the threaded engine tests.

#![allow(dead_code)]

use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use blockfall::engine::EngineConfig;
use blockfall::types::{GameEvent, GameStatus, Transition};

/// Engine settings that make a round take milliseconds instead of minutes.
pub fn quick_config(seed: u32) -> EngineConfig {
    EngineConfig {
        seed: Some(seed),
        start_delay_ms: 0,
        fall_intervals_ms: [10, 9, 8, 7, 6, 5],
        event_buffer: 0,
    }
}

/// Drains a game's event stream on its own thread.
pub struct Collector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl Collector {
    pub fn spawn(rx: Receiver<GameEvent>) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        thread::spawn(move || {
            for event in rx {
                sink.lock().unwrap().push(event);
            }
        });
        Self { events }
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Poll until `pred` holds for the events seen so far.
    pub fn wait_for(&self, timeout: Duration, pred: impl Fn(&[GameEvent]) -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if pred(&self.events.lock().unwrap()) {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        pred(&self.events.lock().unwrap())
    }
}

pub fn is_fall(event: &GameEvent) -> bool {
    matches!(
        event,
        GameEvent::Moving {
            transition: Transition::Moved,
            ..
        }
    )
}

pub fn is_moving(event: &GameEvent) -> bool {
    matches!(event, GameEvent::Moving { .. })
}

pub fn position_of(events: &[GameEvent], status: GameStatus) -> Option<usize> {
    events
        .iter()
        .rposition(|e| *e == GameEvent::StateChanged(status))
}
