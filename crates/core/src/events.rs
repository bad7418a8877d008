//! Event sinks - where a game delivers its notifications.
//!
//! `GameState` is generic over the sink so the rules can be driven with a
//! plain `Vec` in tests and with a bounded channel under the threaded engine.

use std::sync::mpsc::SyncSender;

use crate::types::GameEvent;

/// Receiver of game notifications, in emission order.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Blocks until the consumer takes the event (or the buffer has room).
///
/// A hung-up receiver drops the event; the game keeps running headless.
impl EventSink for SyncSender<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        let _ = self.send(event);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameStatus;
    use std::sync::mpsc;

    #[test]
    fn test_vec_sink_keeps_order() {
        let mut sink = Vec::new();
        sink.emit(GameEvent::ScoreChanged { score: 0 });
        sink.emit(GameEvent::StateChanged(GameStatus::Gaming));
        assert_eq!(sink[0].kind(), "scoreChanged");
        assert_eq!(sink[1].kind(), "stateChanged");
    }

    #[test]
    fn test_channel_sink_ignores_hangup() {
        let (mut tx, rx) = mpsc::sync_channel(1);
        tx.emit(GameEvent::LevelChanged { level: 1 });
        assert_eq!(rx.recv().ok(), Some(GameEvent::LevelChanged { level: 1 }));
        drop(rx);
        tx.emit(GameEvent::LevelChanged { level: 2 });
    }
}
