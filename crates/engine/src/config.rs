//! Engine configuration, read from the environment.

use std::env;
use std::time::Duration;

use thiserror::Error;

use blockfall_core::types::{FALL_INTERVALS_MS, LEVELS, START_DELAY_MS};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("fall interval for level {level} is zero")]
    ZeroInterval { level: usize },
    #[error("fall interval for level {level} ({ms}ms) is not faster than the level before")]
    NotDecreasing { level: usize, ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Fixed RNG seed; `None` seeds from the clock.
    pub seed: Option<u32>,
    /// Delay between `start()` and the first fall step.
    pub start_delay_ms: u64,
    /// Fall interval per level, strictly decreasing.
    pub fall_intervals_ms: [u64; LEVELS],
    /// Event channel capacity; 0 hands each event over synchronously.
    pub event_buffer: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            start_delay_ms: START_DELAY_MS,
            fall_intervals_ms: FALL_INTERVALS_MS,
            event_buffer: 0,
        }
    }
}

impl EngineConfig {
    /// Create from `BLOCKFALL_*` environment variables.
    ///
    /// Values that do not parse keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let number = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        let seed = lookup("BLOCKFALL_SEED").and_then(|s| s.trim().parse().ok());
        let start_delay_ms = number("BLOCKFALL_START_DELAY_MS").unwrap_or(defaults.start_delay_ms);
        let fall_intervals_ms = lookup("BLOCKFALL_FALL_INTERVALS_MS")
            .and_then(|s| parse_intervals(&s))
            .unwrap_or(defaults.fall_intervals_ms);
        let event_buffer = number("BLOCKFALL_EVENT_BUFFER")
            .map(|n| n as usize)
            .unwrap_or(defaults.event_buffer);

        Self {
            seed,
            start_delay_ms,
            fall_intervals_ms,
            event_buffer,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (level, &ms) in self.fall_intervals_ms.iter().enumerate() {
            if ms == 0 {
                return Err(ConfigError::ZeroInterval { level });
            }
            if level > 0 && ms >= self.fall_intervals_ms[level - 1] {
                return Err(ConfigError::NotDecreasing { level, ms });
            }
        }
        Ok(())
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }
}

/// Parse exactly `LEVELS` comma-separated millisecond values.
fn parse_intervals(s: &str) -> Option<[u64; LEVELS]> {
    let mut out = [0; LEVELS];
    let mut parts = s.split(',');
    for slot in out.iter_mut() {
        *slot = parts.next()?.trim().parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}
