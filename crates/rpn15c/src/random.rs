//! RAN#: a seeded uniform generator.
//!
//! The state is a 53-bit integer `k`; the current value is `k / 2⁵³`, which
//! is exactly representable, so `RCL RAN#` followed by `STO RAN#` resumes
//! the same sequence.

use serde::{Deserialize, Serialize};

const BITS: u32 = 53;
const MASK: u64 = (1 << BITS) - 1;
const SCALE: f64 = (1u64 << BITS) as f64;

// Full-period LCG modulo 2⁵³: a ≡ 1 (mod 4), c odd.
const MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const INCREMENT: u64 = 1_442_695_040_888_963_407;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Random {
    state: u64,
}

impl Random {
    pub fn new(seed: f64) -> Self {
        let mut random = Self::default();
        random.seed(seed);
        random
    }

    /// STO RAN#: the fractional part of `|seed|` becomes the state.
    pub fn seed(&mut self, seed: f64) {
        let fraction = seed.abs().fract();
        self.state = ((fraction * SCALE) as u64) & MASK;
    }

    /// RCL RAN#: the current seed as a number in [0, 1).
    pub fn current(&self) -> f64 {
        self.state as f64 / SCALE
    }

    /// Advance and return the next value in [0, 1).
    pub fn next_value(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT)
            & MASK;
        self.current()
    }

    /// Raw state, for snapshots.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Restore a raw state. Bits above the generator width are dropped.
    pub fn set_state(&mut self, state: u64) {
        self.state = state & MASK;
    }
}
