//! A meta-predictor choosing per-address between local-history and
//! global-history strategies.

use crate::branch::Outcome;
use crate::history::{HistoryRegister, LocalHistoryTable};
use crate::predictor::{
    BranchPredictor, BuildError, CounterTable, SaturatingCounterConfig,
};

/// Number of outcome bits retained by each history register.
const HISTORY_BITS: usize = 32;

/// A tournament predictor: a local-history component, a global-history
/// component, and a chooser table that arbitrates between them per address.
///
/// The chooser counters read as a direction over components: at or above
/// the threshold the global component provides the prediction, below it the
/// local component does. Chooser entries start at the threshold, so a fresh
/// predictor leans global.
pub struct Tournament {
    /// Per-address outcome histories feeding the local component
    local_history: LocalHistoryTable,

    /// Local prediction counters, indexed by local history
    local_table: CounterTable,

    /// Global prediction counters, indexed by pc XOR global history
    global_table: CounterTable,

    /// Arbitration counters, indexed by pc
    chooser: CounterTable,

    /// Shared global history register
    ghr: HistoryRegister,
}

impl Tournament {
    pub fn new(table_size: usize) -> Result<Self, BuildError> {
        let ctr = SaturatingCounterConfig::two_bit();
        Ok(Self {
            local_history: LocalHistoryTable::new(table_size, HISTORY_BITS)?,
            local_table: CounterTable::new(table_size, ctr)?,
            global_table: CounterTable::new(table_size, ctr)?,
            chooser: CounterTable::new(
                table_size,
                SaturatingCounterConfig::two_bit_weakly_taken(),
            )?,
            ghr: HistoryRegister::new(HISTORY_BITS),
        })
    }

    fn local_index(&self, pc: u32) -> usize {
        let mask = self.local_table.index_mask();
        (self.local_history.get(pc as usize).value() ^ pc as usize) & mask
    }

    fn global_index(&self, pc: u32) -> usize {
        let mask = self.global_table.index_mask();
        (pc as usize & mask) ^ (self.ghr.value() & mask)
    }
}

impl BranchPredictor for Tournament {
    fn name(&self) -> &'static str { "Tournament" }

    fn reset(&mut self) {
        self.local_history.clear();
        self.local_table.reset();
        self.global_table.reset();
        self.chooser.reset();
        self.ghr.clear();
    }

    fn predict(&self, pc: u32) -> Outcome {
        let local = self.local_table.get(self.local_index(pc)).predict();
        let global = self.global_table.get(self.global_index(pc)).predict();
        match self.chooser.get(pc as usize).predict() {
            Outcome::T => global,
            Outcome::N => local,
        }
    }

    fn update(&mut self, pc: u32, outcome: Outcome) {
        // Snapshot indices and component predictions before touching any
        // state, so they match what predict() derived for this branch.
        let local_idx = self.local_index(pc);
        let global_idx = self.global_index(pc);
        let local = self.local_table.get(local_idx).predict();
        let global = self.global_table.get(global_idx).predict();

        // The chooser moves toward whichever component was right, and only
        // when exactly one of them was.
        if local != outcome && global == outcome {
            self.chooser.get_mut(pc as usize).increment();
        } else if local == outcome && global != outcome {
            self.chooser.get_mut(pc as usize).decrement();
        }

        self.local_table.get_mut(local_idx).update(outcome);
        self.local_history.get_mut(pc as usize).shift_in(outcome);

        self.global_table.get_mut(global_idx).update(outcome);
        self.ghr.shift_in(outcome);
    }
}
