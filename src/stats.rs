//! Helpers for collecting statistics while replaying a trace.

use std::collections::BTreeMap;

use bitvec::prelude::*;
use itertools::Itertools;

use crate::branch::{Outcome, TraceRecord};

/// Container for statistics recorded over one simulation run.
pub struct RunStats {
    /// Per-branch statistics (indexed by program counter value).
    pub data: BTreeMap<u32, BranchData>,

    /// Number of times any branch instruction was executed
    pub branches: u64,

    /// Number of incorrect predictions
    pub mispredicts: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
            branches: 0,
            mispredicts: 0,
        }
    }

    /// Return the number of correct predictions.
    pub fn hits(&self) -> u64 {
        self.branches - self.mispredicts
    }

    /// Return the fraction of branches mispredicted, or [None] when no
    /// branches were replayed.
    pub fn mispredict_rate(&self) -> Option<f64> {
        if self.branches == 0 {
            None
        } else {
            Some(self.mispredicts as f64 / self.branches as f64)
        }
    }

    /// Record one replayed branch and the prediction made for it.
    pub fn update(&mut self, record: &TraceRecord, prediction: Outcome) {
        let miss = prediction != record.outcome;
        self.branches += 1;
        if miss {
            self.mispredicts += 1;
        }

        let data = self.data.entry(record.pc).or_insert_with(BranchData::new);
        data.occ += 1;
        data.pat.push(record.outcome.into());
        if miss {
            data.misses += 1;
        }
    }

    /// Returns a reference to data collected for a particular branch.
    pub fn get(&self, pc: u32) -> Option<&BranchData> {
        self.data.get(&pc)
    }

    /// Returns the number of unique observed branch instructions.
    pub fn num_unique_branches(&self) -> usize {
        self.data.len()
    }

    /// Return up to `n` branches ranked by misprediction count.
    pub fn most_mispredicted(&self, n: usize) -> Vec<(u32, &BranchData)> {
        self.data.iter()
            .sorted_by(|x, y| x.1.misses.cmp(&y.1.misses))
            .rev()
            .take(n)
            .map(|(pc, data)| (*pc, data))
            .collect()
    }

    /// Collapse the run into its final counts.
    pub fn summary(&self) -> Summary {
        Summary {
            branches: self.branches,
            mispredicts: self.mispredicts,
        }
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for per-branch statistics.
pub struct BranchData {
    /// Number of times this branch was encountered.
    pub occ: usize,

    /// Number of incorrect predictions for this branch.
    pub misses: usize,

    /// Record of all observed outcomes for this branch.
    pub pat: BitVec,
}

impl BranchData {
    pub fn new() -> Self {
        Self {
            occ: 0,
            misses: 0,
            pat: BitVec::new(),
        }
    }

    /// Return the misprediction rate for this branch.
    pub fn mispredict_rate(&self) -> f64 {
        self.misses as f64 / self.occ as f64
    }

    pub fn times_taken(&self) -> usize {
        self.pat.count_ones()
    }

    pub fn is_always_taken(&self) -> bool {
        self.pat.count_ones() == self.pat.len()
    }

    pub fn is_never_taken(&self) -> bool {
        self.pat.count_zeros() == self.pat.len()
    }
}

impl Default for BranchData {
    fn default() -> Self {
        Self::new()
    }
}

/// Final counts for one run, formatted for humans.
///
/// An empty run renders its rate as undefined instead of dividing by zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub branches: u64,
    pub mispredicts: u64,
}

impl Summary {
    pub fn rate(&self) -> Option<f64> {
        if self.branches == 0 {
            None
        } else {
            Some(self.mispredicts as f64 / self.branches as f64)
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.rate() {
            Some(rate) => write!(
                f,
                "{}/{} mispredicted ({:.2}%)",
                self.mispredicts,
                self.branches,
                rate * 100.0
            ),
            None => write!(f, "0/0 mispredicted (rate undefined)"),
        }
    }
}
