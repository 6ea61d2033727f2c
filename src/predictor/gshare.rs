//! A global-history predictor indexed by hashing history bits into the
//! program counter.

use crate::branch::Outcome;
use crate::history::HistoryRegister;
use crate::predictor::{
    BranchPredictor, BuildError, CounterTable, SaturatingCounterConfig,
};

/// Number of outcome bits retained by the global history register.
const HISTORY_BITS: usize = 32;

/// A one-level predictor whose table index is the XOR of program counter
/// bits and global branch history bits.
///
/// Branches that share low address bits but arrive along different outcome
/// histories land in different counters, at the cost of occasional aliasing.
pub struct Gshare {
    table: CounterTable,
    ghr: HistoryRegister,
}

impl Gshare {
    pub fn new(table_size: usize) -> Result<Self, BuildError> {
        Ok(Self {
            table: CounterTable::new(
                table_size,
                SaturatingCounterConfig::two_bit(),
            )?,
            ghr: HistoryRegister::new(HISTORY_BITS),
        })
    }

    fn index(&self, pc: u32) -> usize {
        let mask = self.table.index_mask();
        (pc as usize & mask) ^ (self.ghr.value() & mask)
    }
}

impl BranchPredictor for Gshare {
    fn name(&self) -> &'static str { "Gshare" }

    fn reset(&mut self) {
        self.table.reset();
        self.ghr.clear();
    }

    fn predict(&self, pc: u32) -> Outcome {
        self.table.get(self.index(pc)).predict()
    }

    fn update(&mut self, pc: u32, outcome: Outcome) {
        // The counter is selected with the history the prediction saw;
        // the outcome enters the register afterwards.
        let idx = self.index(pc);
        self.table.get_mut(idx).update(outcome);
        self.ghr.shift_in(outcome);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn predict_is_a_pure_read() {
        let p = Gshare::new(16).unwrap();
        assert_eq!(p.predict(0x40), p.predict(0x40));
        assert_eq!(p.predict(0x40), Outcome::N);
    }

    #[test]
    fn index_moves_with_history() {
        let mut p = Gshare::new(4).unwrap();
        assert_eq!(p.index(1), 1);
        p.update(1, Outcome::T);
        // History bit 1 now flips the index
        assert_eq!(p.index(1), 0);
        p.update(1, Outcome::T);
        assert_eq!(p.index(1), 2);
    }

    #[test]
    fn warms_up_on_a_repeated_taken_branch() {
        let mut p = Gshare::new(4).unwrap();
        let mut misses = 0;
        for _ in 0..5 {
            if p.predict(1) != Outcome::T {
                misses += 1;
            }
            p.update(1, Outcome::T);
        }
        // The index settles once the masked history is all ones; the counter
        // it lands on needs two taken outcomes to cross the threshold.
        assert_eq!(misses, 4);
        for _ in 0..5 {
            assert_eq!(p.predict(1), Outcome::T);
            p.update(1, Outcome::T);
        }
    }

    #[test]
    fn reset_discards_history_and_counters() {
        let mut p = Gshare::new(16).unwrap();
        for _ in 0..8 {
            p.update(3, Outcome::T);
        }
        p.reset();
        assert_eq!(p.ghr.value(), 0);
        assert_eq!(p.predict(3), Outcome::N);
    }
}
