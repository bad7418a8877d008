//! Event log: every consumed `GameEvent` as one JSON object per line.
//!
//! Enabled by `BLOCKFALL_EVENT_LOG=<path>`; lines are appended.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::{GameEvent, Row};

/// Serialized form of a [`GameEvent`], tagged by event kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventRecord {
    #[serde(rename_all = "camelCase")]
    Moving {
        /// `None` for a spawn.
        from: Option<[i32; 2]>,
        to: [i32; 2],
        transition: String,
        prev_shape: u8,
        shape: u8,
    },
    NextPreview {
        shape: u8,
    },
    StateChanged {
        status: String,
    },
    LevelChanged {
        level: u8,
    },
    ScoreChanged {
        score: u64,
    },
    RedrawArea {
        top: usize,
        bottom: usize,
        rows: Vec<Row>,
    },
    HighlightRow {
        row: usize,
    },
}

impl From<&GameEvent> for EventRecord {
    fn from(event: &GameEvent) -> Self {
        match event {
            GameEvent::Moving {
                moving,
                transition,
                prev_shape,
                shape,
            } => EventRecord::Moving {
                from: moving
                    .from
                    .is_valid()
                    .then_some([moving.from.col, moving.from.row]),
                to: [moving.to.col, moving.to.row],
                transition: transition.as_str().to_string(),
                prev_shape: prev_shape.0,
                shape: shape.0,
            },
            GameEvent::NextPreview { shape } => EventRecord::NextPreview { shape: shape.0 },
            GameEvent::StateChanged(status) => EventRecord::StateChanged {
                status: status.as_str().to_string(),
            },
            GameEvent::LevelChanged { level } => EventRecord::LevelChanged { level: *level },
            GameEvent::ScoreChanged { score } => EventRecord::ScoreChanged { score: *score },
            GameEvent::RedrawArea { top, bottom, rows } => EventRecord::RedrawArea {
                top: *top,
                bottom: *bottom,
                rows: rows.clone(),
            },
            GameEvent::HighlightRow { row } => EventRecord::HighlightRow { row: *row },
        }
    }
}

#[derive(Serialize)]
struct LogLine<'a> {
    seq: u64,
    #[serde(flatten)]
    record: &'a EventRecord,
}

pub struct EventLog<W: Write> {
    out: W,
    buf: Vec<u8>,
    seq: u64,
}

impl EventLog<BufWriter<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }

    /// Open the log named by `BLOCKFALL_EVENT_LOG`, if any.
    ///
    /// An unusable path is reported and logging stays off.
    pub fn from_env() -> Option<Self> {
        let path = std::env::var("BLOCKFALL_EVENT_LOG")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())?;
        match Self::open(&path) {
            Ok(log) => Some(log),
            Err(err) => {
                eprintln!("[Blockfall] event log disabled: {err:#}");
                None
            }
        }
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(512),
            seq: 0,
        }
    }

    pub fn record(&mut self, event: &GameEvent) -> Result<()> {
        let record = EventRecord::from(event);
        self.buf.clear();
        serde_json::to_writer(
            &mut self.buf,
            &LogLine {
                seq: self.seq,
                record: &record,
            },
        )?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        self.seq += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Number of lines written so far.
    pub fn len(&self) -> u64 {
        self.seq
    }

    pub fn is_empty(&self) -> bool {
        self.seq == 0
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
