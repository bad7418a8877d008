//! RNG module - seedable shape selection
//!
//! A small LCG keeps games reproducible: the same seed yields the same
//! sequence of spawned shapes, which the tests and benchmarks rely on.

use std::time::{SystemTime, UNIX_EPOCH};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Seed from the wall clock, for interactive sessions.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
            .unwrap_or(1);
        Self::new(nanos)
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m, with m = 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max), uniformly.
    ///
    /// `max` is clamped to `1..=65536`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        const SPAN: u32 = 1 << 16;
        let max = max.clamp(1, SPAN);
        // Draws past the last whole multiple of `max` would favor low values.
        let limit = SPAN - SPAN % max;
        loop {
            // Low LCG bits cycle with short periods; draw from the high half.
            let x = self.next_u32() >> 16;
            if x < limit {
                return x % max;
            }
        }
    }

    /// Current internal state (reseeding with it continues the sequence).
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
