//! A one-level predictor indexed by the program counter alone.

use crate::branch::Outcome;
use crate::predictor::{
    BranchPredictor, BuildError, CounterTable, SaturatingCounterConfig,
};

/// A PC-indexed table of counters with no history input.
///
/// Every execution of the same branch (and of any branch aliasing to the
/// same low address bits) trains the same counter.
pub struct Bimodal {
    table: CounterTable,
}

impl Bimodal {
    pub fn new(table_size: usize) -> Result<Self, BuildError> {
        Ok(Self {
            table: CounterTable::new(
                table_size,
                SaturatingCounterConfig::two_bit(),
            )?,
        })
    }
}

impl BranchPredictor for Bimodal {
    fn name(&self) -> &'static str { "Bimodal" }

    fn reset(&mut self) {
        self.table.reset();
    }

    fn predict(&self, pc: u32) -> Outcome {
        self.table.get(pc as usize).predict()
    }

    fn update(&mut self, pc: u32, outcome: Outcome) {
        self.table.get_mut(pc as usize).update(outcome);
    }
}
