//! Implementation of a saturating counter.

use crate::branch::Outcome;

/// Configuration for building a [`SaturatingCounter`].
#[derive(Clone, Copy, Debug)]
pub struct SaturatingCounterConfig {
    /// The largest value the counter can reach.
    pub max: u8,

    /// The value the counter holds at construction.
    pub init: u8,
}

impl SaturatingCounterConfig {
    /// A two-bit counter starting in the strongly not-taken state.
    pub fn two_bit() -> Self {
        Self { max: 3, init: 0 }
    }

    /// A two-bit counter starting at the taken threshold.
    pub fn two_bit_weakly_taken() -> Self {
        Self { max: 3, init: 2 }
    }

    pub fn storage_bits(&self) -> usize {
        (self.max.ilog2() + 1) as usize
    }

    pub fn build(self) -> SaturatingCounter {
        debug_assert!(self.init <= self.max);
        SaturatingCounter {
            cfg: self,
            ctr: self.init,
        }
    }
}

/// An n-bit saturating counter used to follow the behavior of a branch.
///
/// Values at or above the midpoint predict 'taken'; a taken outcome moves
/// the counter up, a not-taken outcome moves it down, and both stop at the
/// bounds instead of wrapping.
#[derive(Clone, Copy, Debug)]
pub struct SaturatingCounter {
    cfg: SaturatingCounterConfig,
    ctr: u8,
}

impl SaturatingCounter {
    /// Return the current counter value.
    pub fn value(&self) -> u8 {
        self.ctr
    }

    pub fn increment(&mut self) {
        if self.ctr < self.cfg.max {
            self.ctr += 1;
        }
    }

    pub fn decrement(&mut self) {
        self.ctr = self.ctr.saturating_sub(1);
    }

    /// Reset the counter to its initial value.
    pub fn reset(&mut self) {
        self.ctr = self.cfg.init;
    }

    /// Return the current predicted direction.
    pub fn predict(&self) -> Outcome {
        Outcome::from(self.ctr >= self.cfg.max / 2 + 1)
    }

    /// Update the state of the counter.
    pub fn update(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::T => self.increment(),
            Outcome::N => self.decrement(),
        }
    }
}
